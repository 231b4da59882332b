//! Screen geometry
//!
//! The character grid is fixed at build time from the video mode and the
//! font cell size.

use crate::screen::ScreenBuffer;
use crate::terminal::Terminal;

/// Horizontal resolution in pixels
pub const WIDTH: usize = 640;

/// Vertical resolution in pixels
pub const HEIGHT: usize = 480;

/// Glyph cell width in pixels
pub const FONT_WIDTH: usize = 8;

/// Glyph cell height in pixels
pub const FONT_HEIGHT: usize = 16;

/// Text columns
pub const COLUMNS: usize = WIDTH / FONT_WIDTH;

/// Text rows, including the status row
pub const ROWS: usize = HEIGHT / FONT_HEIGHT;

/// Backing storage for one text row (code, background, foreground)
pub const ROW_BYTES: usize = COLUMNS * 3;

/// Screen buffer at the built-in geometry
pub type DefaultScreen = ScreenBuffer<COLUMNS, ROWS>;

/// Terminal at the built-in geometry
pub type DefaultTerminal = Terminal<COLUMNS, ROWS>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_80_by_30() {
        assert_eq!(COLUMNS, 80);
        assert_eq!(ROWS, 30);
        assert_eq!(ROW_BYTES, 240);
    }
}
