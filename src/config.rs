use ratatui::style::Color;
use ratatui::symbols::border;

use crate::error::ConfigError;
use crate::grid::Grid;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 40;

/// Default snake length at session start.
pub const DEFAULT_INITIAL_LENGTH: u16 = 3;

/// Score at which a session is won.
pub const DEFAULT_WIN_SCORE: u32 = 30;

/// Fixed tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 80;

/// Input polling slice used by the frontend loop.
pub const INPUT_POLL_INTERVAL_MS: u64 = 16;

/// Parameters shared by every session created from one manager.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionConfig {
    pub grid: Grid,
    pub initial_length: u16,
    pub win_score: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: Grid::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
            initial_length: DEFAULT_INITIAL_LENGTH,
            win_score: DEFAULT_WIN_SCORE,
        }
    }
}

impl SessionConfig {
    /// Checks that a centred, horizontal starting snake fits the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Grid { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        // The head sits at the centre column and the body trails to the left.
        if self.initial_length > width / 2 + 1 {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                width,
            });
        }

        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }

        Ok(())
    }
}

/// Colours used by the terminal frontend.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub goal: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake, red apple.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    goal: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
///
/// - Top row + top corners: `▄` (solid bottom -> play area below)
/// - Bottom row + bottom corners: `▀` (solid top -> play area above)
/// - Left and right columns: `█`
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Upper half-block glyph for compositing.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Lower half-block glyph for compositing.
pub const GLYPH_HALF_LOWER: &str = "▄";

/// Full block glyph, used when both stacked cells are filled.
pub const GLYPH_FULL: &str = "█";

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use crate::grid::Grid;

    use super::SessionConfig;

    #[test]
    fn default_config_is_valid() {
        let config = SessionConfig::default();

        assert_eq!(config.grid, Grid::new(40, 40));
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.win_score, 30);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let base = SessionConfig::default();

        let empty = SessionConfig {
            grid: Grid::new(0, 10),
            ..base
        };
        assert_eq!(
            empty.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 10
            })
        );

        let zero = SessionConfig {
            initial_length: 0,
            ..base
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroLength));

        let unwinnable = SessionConfig {
            win_score: 0,
            ..base
        };
        assert_eq!(unwinnable.validate(), Err(ConfigError::ZeroWinScore));
    }

    #[test]
    fn snake_must_fit_left_of_centre() {
        let fits = SessionConfig {
            grid: Grid::new(6, 3),
            initial_length: 4,
            win_score: 5,
        };
        let too_long = SessionConfig {
            initial_length: 5,
            ..fits
        };

        assert_eq!(fits.validate(), Ok(()));
        assert_eq!(
            too_long.validate(),
            Err(ConfigError::SnakeTooLong {
                length: 5,
                width: 6
            })
        );
    }
}
