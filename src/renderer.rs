use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{Theme, BORDER_HALF_BLOCK, GLYPH_FULL, GLYPH_HALF_LOWER, GLYPH_HALF_UPPER};
use crate::grid::Grid;
use crate::session::{GameState, Snapshot};
use crate::snake::Cell;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_end_menu, render_pause_menu, render_start_menu};

/// Popup drawn over the board, chosen by the driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    None,
    Start,
    Paused,
}

/// Renders the full game frame from a snapshot.
///
/// Two grid rows share one terminal row: the upper cell is the foreground of
/// a `▀`, the lower cell its background.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, overlay: Overlay, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, hud_info);

    let theme = hud_info.theme;
    let board = board_area(play_area, snapshot.grid);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg));

    let inner = block.inner(board);
    frame.render_widget(block, board);
    render_cells(frame, inner, snapshot, theme);

    match overlay {
        Overlay::Start => render_start_menu(frame, play_area, hud_info.high_score, theme),
        Overlay::Paused => render_pause_menu(frame, play_area, theme),
        Overlay::None if snapshot.state != GameState::Running => render_end_menu(
            frame,
            play_area,
            snapshot,
            hud_info.reference_high_score,
            theme,
        ),
        Overlay::None => {}
    }
}

/// Centres the bordered board inside `area`, clipped to fit.
#[must_use]
pub fn board_area(area: Rect, grid: Grid) -> Rect {
    let width = grid.width.saturating_add(2).min(area.width);
    let height = grid.height.div_ceil(2).saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let colors = paint_grid(snapshot, theme);
    let grid = snapshot.grid;
    let width = usize::from(grid.width);
    let color_at = |x: u16, y: u16| -> Color {
        if y >= grid.height {
            return theme.play_bg;
        }
        colors[usize::from(y) * width + usize::from(x)]
    };

    let buffer = frame.buffer_mut();
    for row in 0..grid.height.div_ceil(2) {
        let y = inner.y.saturating_add(row);
        if y >= inner.bottom() {
            break;
        }

        for column in 0..grid.width {
            let x = inner.x.saturating_add(column);
            if x >= inner.right() {
                break;
            }

            let upper = color_at(column, row * 2);
            let lower = color_at(column, row * 2 + 1);
            let (glyph, style) = stacked_cell(upper, lower, theme.play_bg);
            buffer.set_string(x, y, glyph, style);
        }
    }
}

/// Returns one colour per grid cell, row-major.
fn paint_grid(snapshot: &Snapshot, theme: &Theme) -> Vec<Color> {
    let grid = snapshot.grid;
    let mut colors = vec![theme.play_bg; grid.total_cells()];
    let mut paint = |cell: Cell, color: Color| {
        if grid.contains(cell) {
            let index = usize::try_from(cell.y * i32::from(grid.width) + cell.x).unwrap_or(0);
            colors[index] = color;
        }
    };

    if let Some(goal) = snapshot.goal {
        paint(goal, theme.goal);
    }
    for segment in snapshot.cells.iter().skip(1) {
        paint(*segment, theme.snake_body);
    }
    if let Some(head) = snapshot.head() {
        paint(head, theme.snake_head);
    }

    colors
}

fn stacked_cell(upper: Color, lower: Color, background: Color) -> (&'static str, Style) {
    if upper == lower {
        if upper == background {
            return (" ", Style::new().bg(background));
        }
        return (GLYPH_FULL, Style::new().fg(upper).bg(background));
    }

    if upper == background {
        return (GLYPH_HALF_LOWER, Style::new().fg(lower).bg(background));
    }

    (GLYPH_HALF_UPPER, Style::new().fg(upper).bg(lower))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use ratatui::Terminal;

    use crate::config::{SessionConfig, THEME_CLASSIC};
    use crate::grid::Grid;
    use crate::session::GameSession;
    use crate::ui::hud::HudInfo;

    use super::{board_area, render, stacked_cell, Overlay};

    #[test]
    fn board_is_centred_and_halved_vertically() {
        let area = Rect::new(0, 0, 60, 30);

        let board = board_area(area, Grid::new(40, 40));

        assert_eq!(board, Rect::new(9, 4, 42, 22));
    }

    #[test]
    fn board_is_clipped_to_small_terminals() {
        let area = Rect::new(0, 0, 10, 5);

        let board = board_area(area, Grid::new(40, 40));

        assert_eq!(board, Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn stacked_cells_pick_matching_half_blocks() {
        let bg = Color::Black;

        assert_eq!(stacked_cell(bg, bg, bg).0, " ");
        assert_eq!(stacked_cell(Color::Red, Color::Red, bg).0, "█");
        assert_eq!(stacked_cell(bg, Color::Green, bg).0, "▄");
        assert_eq!(stacked_cell(Color::Green, bg, bg).0, "▀");
        assert_eq!(stacked_cell(Color::Green, Color::Red, bg).0, "▀");
    }

    #[test]
    fn frame_renders_with_hud() {
        let session =
            GameSession::new_with_seed(SessionConfig::default(), 3, 1).expect("config is valid");
        let snapshot = session.snapshot();
        let info = HudInfo {
            high_score: 3,
            reference_high_score: 3,
            theme: &THEME_CLASSIC,
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test backend");

        terminal
            .draw(|frame| render(frame, &snapshot, Overlay::None, &info))
            .expect("draw succeeds");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Points: 0"));
        assert!(text.contains("High Score: 3"));
    }
}
