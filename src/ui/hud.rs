use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::session::Snapshot;

const HUD_MARGIN_X: u16 = 1;

/// Values shown next to the board that the snapshot does not carry.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    /// Best score known to the driver, shown in the HUD and start menu.
    pub high_score: u32,
    /// High score as it stood when the current session began.
    pub reference_high_score: u32,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD under the board and returns the area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, info: &HudInfo<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let hud_area = Rect {
        x: hud_area.x.saturating_add(HUD_MARGIN_X),
        width: hud_area.width.saturating_sub(HUD_MARGIN_X * 2),
        ..hud_area
    };

    frame.render_widget(
        Paragraph::new(hud_line(
            snapshot.score,
            snapshot.cells.len(),
            info.high_score.max(snapshot.high_score),
            usize::from(hud_area.width),
            info.theme,
        )),
        hud_area,
    );

    play_area
}

/// Points and length on the left, high score pushed to the right edge.
fn hud_line(
    score: u32,
    length: usize,
    high_score: u32,
    available_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let left = format!("Points: {score}  Length: {length}");
    let right = format!("High Score: {high_score}");
    let gap = available_width
        .saturating_sub(left.width() + right.width())
        .max(1);

    Line::from(vec![
        Span::styled(
            left,
            Style::default()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(theme.hud_muted)),
    ])
}
