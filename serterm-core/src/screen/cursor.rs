//! Cursor position and its on-screen marker

use super::buffer::ScreenBuffer;

/// Code drawn in place of the glyph under a visible cursor
pub const CURSOR_MARKER: u8 = b'_';

/// Cursor position in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl Cursor {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn home() -> Self {
        Self { x: 0, y: 0 }
    }
}

/// Marker glyph swapped into the screen at the cursor cell
///
/// The marker must be lifted before any screen mutation and placed again
/// afterwards, so the true glyph is what every edit sees.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorOverlay {
    visible: bool,
    /// Cell holding the marker and the code it replaced
    under: Option<(Cursor, u8)>,
}

impl CursorOverlay {
    pub const fn new() -> Self {
        Self {
            visible: false,
            under: None,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Change visibility; takes effect on the next [`place`](Self::place)
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Original code at `pos` if the marker currently covers it
    pub fn covered(&self, pos: Cursor) -> Option<u8> {
        match self.under {
            Some((at, code)) if at == pos => Some(code),
            _ => None,
        }
    }

    /// Restore the glyph under the marker
    pub fn lift<const C: usize, const R: usize>(&mut self, screen: &mut ScreenBuffer<C, R>) {
        if let Some((at, code)) = self.under.take() {
            screen.set_code(at.x, at.y, code);
        }
    }

    /// Draw the marker at `pos` if visible
    pub fn place<const C: usize, const R: usize>(
        &mut self,
        screen: &mut ScreenBuffer<C, R>,
        pos: Cursor,
    ) {
        self.lift(screen);
        if !self.visible {
            return;
        }
        if let Some(glyph) = screen.glyph(pos.x, pos.y) {
            self.under = Some((pos, glyph.code));
            screen.set_code(pos.x, pos.y, CURSOR_MARKER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{Attrs, Color, Glyph};

    const TEXT: Attrs = Attrs::new(Color::WHITE, Color::SEMIBLUE);

    #[test]
    fn test_marker_round_trip() {
        let mut screen: ScreenBuffer<4, 2> = ScreenBuffer::new(TEXT);
        screen.put(1, 1, Glyph::new(b'k', TEXT));

        let mut overlay = CursorOverlay::new();
        overlay.set_visible(true);
        overlay.place(&mut screen, Cursor::new(1, 1));
        assert_eq!(screen.glyph(1, 1).map(|g| g.code), Some(CURSOR_MARKER));
        assert_eq!(overlay.covered(Cursor::new(1, 1)), Some(b'k'));

        overlay.lift(&mut screen);
        assert_eq!(screen.glyph(1, 1).map(|g| g.code), Some(b'k'));
        assert_eq!(overlay.covered(Cursor::new(1, 1)), None);
    }

    #[test]
    fn test_hidden_marker_not_drawn() {
        let mut screen: ScreenBuffer<4, 2> = ScreenBuffer::new(TEXT);
        let mut overlay = CursorOverlay::new();
        overlay.set_visible(true);
        overlay.place(&mut screen, Cursor::home());

        overlay.set_visible(false);
        overlay.place(&mut screen, Cursor::new(2, 0));
        assert_eq!(screen.glyph(0, 0).map(|g| g.code), Some(b' '));
        assert_eq!(screen.glyph(2, 0).map(|g| g.code), Some(b' '));
    }

    #[test]
    fn test_moving_marker_restores_previous_cell() {
        let mut screen: ScreenBuffer<4, 2> = ScreenBuffer::new(TEXT);
        screen.put(0, 0, Glyph::new(b'x', TEXT));
        let mut overlay = CursorOverlay::new();
        overlay.set_visible(true);

        overlay.place(&mut screen, Cursor::home());
        overlay.place(&mut screen, Cursor::new(1, 0));
        assert_eq!(screen.glyph(0, 0).map(|g| g.code), Some(b'x'));
        assert_eq!(screen.glyph(1, 0).map(|g| g.code), Some(CURSOR_MARKER));
    }
}
