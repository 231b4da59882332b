//! CSI command dispatch

use crate::screen::{Color, Cursor};

use super::escape::CsiSequence;
use super::Terminal;

/// DEC private mode: text cursor visibility
const DECTCEM: u16 = 25;

impl<const COLS: usize, const ROWS: usize> Terminal<COLS, ROWS> {
    pub(super) fn dispatch(&mut self, seq: &CsiSequence) {
        match seq.action {
            b'A' => {
                let n = usize::from(seq.param_or(0, 1));
                self.cursor.y = self.cursor.y.saturating_sub(n);
            }
            b'B' => {
                let n = usize::from(seq.param_or(0, 1));
                self.cursor.y = self.cursor.y.saturating_add(n);
                self.clamp_cursor();
            }
            b'C' => {
                let n = usize::from(seq.param_or(0, 1));
                self.cursor.x = self.cursor.x.saturating_add(n);
                self.clamp_cursor();
            }
            b'D' => {
                let n = usize::from(seq.param_or(0, 1));
                self.cursor.x = self.cursor.x.saturating_sub(n);
            }
            b'H' => {
                // 1-based, first parameter is the column
                self.cursor.x = usize::from(seq.param(0)).saturating_sub(1);
                self.cursor.y = usize::from(seq.param(1)).saturating_sub(1);
                self.clamp_cursor();
            }
            b'K' => {
                let Cursor { x, y } = self.cursor;
                match seq.param(0) {
                    0 => self.screen.erase_line_from(x, y, self.attrs),
                    1 => self.screen.erase_line_to(x, y, self.attrs),
                    2 => self.screen.erase_line(y, self.attrs),
                    _ => {}
                }
            }
            b'J' => {
                let Cursor { x, y } = self.cursor;
                match seq.param(0) {
                    0 => self.screen.erase_below(x, y, self.attrs),
                    1 => self.screen.erase_above(x, y, self.attrs),
                    // No scrollback, so 3 is the same as 2
                    2 | 3 => {
                        self.screen.clear(self.attrs);
                        self.cursor = Cursor::home();
                    }
                    _ => {}
                }
            }
            b'S' => {
                let n = usize::from(seq.param_or(0, 1));
                self.screen.scroll_up(n, self.attrs);
            }
            b'h' | b'l' => {
                if seq.private && seq.param(0) == DECTCEM {
                    self.overlay.set_visible(seq.action == b'h');
                }
            }
            b'm' => self.select_graphic_rendition(seq),
            b's' => self.saved = self.cursor,
            b'u' => {
                self.cursor = self.saved;
                self.clamp_cursor();
            }
            other => {
                trace!("csi: unhandled final {=u8:#x}", other);
            }
        }
    }

    /// Only the first recognized parameter of the sequence takes effect
    fn select_graphic_rendition(&mut self, seq: &CsiSequence) {
        match seq.param(0) {
            0 => self.attrs = self.colors.text(),
            7 => self.attrs = self.attrs.swapped(),
            n @ 30..=37 => {
                if let Some(color) = Color::ansi(usize::from(n - 30)) {
                    self.attrs.fg = color;
                }
            }
            38 if seq.param(1) == 5 => self.attrs.fg = raw_color(seq.param(2)),
            n @ 40..=47 => {
                if let Some(color) = Color::ansi(usize::from(n - 40)) {
                    self.attrs.bg = color;
                }
            }
            48 if seq.param(1) == 5 => self.attrs.bg = raw_color(seq.param(2)),
            _ => {}
        }
    }
}

/// Palette index from an SGR parameter, low byte only
fn raw_color(param: u16) -> Color {
    Color((param & 0xFF) as u8)
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::screen::{Attrs, Color, Cursor, Glyph};
    use crate::terminal::Terminal;
    use serterm_hal::beeper::SilentBell;

    type Small = Terminal<10, 5>;

    fn term() -> Small {
        Terminal::new(&Settings {
            status_line: false,
            ..Settings::default()
        })
    }

    fn feed(term: &mut Small, bytes: &[u8]) {
        term.print(bytes, &mut SilentBell);
    }

    fn code(term: &Small, x: usize, y: usize) -> u8 {
        term.cell(x, y).map(|g| g.code).unwrap_or(0)
    }

    fn fill(term: &mut Small) {
        for y in 0..5 {
            term.write_str(y, 0, "abcdefghij");
        }
        feed(term, b"\x1b[H");
    }

    #[test]
    fn test_relative_motion_defaults_and_clamps() {
        let mut term = term();
        feed(&mut term, b"\x1b[B\x1b[C");
        assert_eq!(term.cursor(), Cursor::new(1, 1));
        feed(&mut term, b"\x1b[0C");
        assert_eq!(term.cursor(), Cursor::new(2, 1));

        feed(&mut term, b"\x1b[99B\x1b[99C");
        assert_eq!(term.cursor(), Cursor::new(9, 4));
        feed(&mut term, b"\x1b[99A\x1b[99D");
        assert_eq!(term.cursor(), Cursor::home());
    }

    #[test]
    fn test_down_never_scrolls() {
        let mut term = term();
        feed(&mut term, b"top\x1b[20B");
        assert_eq!(code(&term, 0, 0), b't');
        assert_eq!(term.cursor().y, 4);
    }

    #[test]
    fn test_absolute_position_column_first() {
        let mut term = term();
        feed(&mut term, b"\x1b[3;2H");
        assert_eq!(term.cursor(), Cursor::new(2, 1));

        feed(&mut term, b"\x1b[H");
        assert_eq!(term.cursor(), Cursor::home());

        feed(&mut term, b"\x1b[200;300H");
        assert_eq!(term.cursor(), Cursor::new(9, 4));
    }

    #[test]
    fn test_erase_in_line() {
        let mut term = term();
        fill(&mut term);
        feed(&mut term, b"\x1b[5C\x1b[K");
        assert_eq!(code(&term, 4, 0), b'e');
        assert_eq!(code(&term, 5, 0), b' ');
        assert_eq!(term.cursor(), Cursor::new(5, 0));

        feed(&mut term, b"\x1b[B\x1b[1K");
        assert_eq!(code(&term, 5, 1), b' ');
        assert_eq!(code(&term, 6, 1), b'g');

        feed(&mut term, b"\x1b[B\x1b[2K");
        assert_eq!(code(&term, 9, 2), b' ');
        assert_eq!(code(&term, 0, 3), b'a');
    }

    #[test]
    fn test_erase_in_display() {
        let mut term = term();
        fill(&mut term);
        feed(&mut term, b"\x1b[3;3H\x1b[J");
        assert_eq!(code(&term, 1, 2), b'b');
        assert_eq!(code(&term, 2, 2), b' ');
        assert_eq!(code(&term, 0, 4), b' ');
        assert_eq!(term.cursor(), Cursor::new(2, 2));

        fill(&mut term);
        feed(&mut term, b"\x1b[3;3H\x1b[1J");
        assert_eq!(code(&term, 9, 1), b' ');
        assert_eq!(code(&term, 2, 2), b' ');
        assert_eq!(code(&term, 3, 2), b'd');
    }

    #[test]
    fn test_clear_variants_are_identical() {
        let mut a = term();
        let mut b = term();
        fill(&mut a);
        fill(&mut b);
        feed(&mut a, b"\x1b[4;4H\x1b[2J");
        feed(&mut b, b"\x1b[4;4H\x1b[3J");
        assert_eq!(a.cursor(), Cursor::home());
        assert_eq!(b.cursor(), Cursor::home());
        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(a.cell(x, y), b.cell(x, y));
            }
        }
    }

    #[test]
    fn test_scroll_up() {
        let mut term = term();
        feed(&mut term, b"1\r\n2\r\n3\x1b[2S");
        assert_eq!(code(&term, 0, 0), b'3');
        assert_eq!(code(&term, 0, 1), b' ');
        assert_eq!(term.cursor(), Cursor::new(1, 2));
    }

    #[test]
    fn test_cursor_visibility_needs_private_flag() {
        let mut term = term();
        term.banner();
        feed(&mut term, b"\x1b[25l");
        assert!(term.cursor_visible());
        feed(&mut term, b"\x1b[?12l");
        assert!(term.cursor_visible());
        feed(&mut term, b"\x1b[?25l");
        assert!(!term.cursor_visible());
        feed(&mut term, b"\x1b[?25h");
        assert!(term.cursor_visible());
    }

    #[test]
    fn test_sgr_colors() {
        let mut term = term();
        let defaults = term.colors().text();

        feed(&mut term, b"\x1b[31m");
        assert_eq!(term.attrs().fg, Color::RED);
        feed(&mut term, b"\x1b[44m");
        assert_eq!(term.attrs().bg, Color::BLUE);
        feed(&mut term, b"\x1b[7m");
        assert_eq!(term.attrs(), Attrs::new(Color::BLUE, Color::RED));
        feed(&mut term, b"\x1b[38;5;300m");
        assert_eq!(term.attrs().fg, Color(300u16 as u8));
        feed(&mut term, b"\x1b[48;5;17m");
        assert_eq!(term.attrs().bg, Color(17));
        feed(&mut term, b"\x1b[m");
        assert_eq!(term.attrs(), defaults);
    }

    #[test]
    fn test_sgr_first_clause_only() {
        let mut term = term();
        feed(&mut term, b"\x1b[31;42m");
        assert_eq!(term.attrs().fg, Color::RED);
        assert_eq!(term.attrs().bg, term.colors().text_bg);

        // 38 without ;5 matches nothing
        feed(&mut term, b"\x1b[38;2;1m");
        assert_eq!(term.attrs().fg, Color::RED);
    }

    #[test]
    fn test_sgr_applies_to_new_glyphs() {
        let mut term = term();
        feed(&mut term, b"\x1b[32mg");
        let expected = Glyph::new(b'g', Attrs::new(Color::GREEN, term.colors().text_bg));
        assert_eq!(term.cell(0, 0), Some(expected));
    }

    #[test]
    fn test_save_restore_position_only() {
        let mut term = term();
        feed(&mut term, b"\x1b[4;2H\x1b[s\x1b[31m\x1b[H\x1b[u");
        assert_eq!(term.cursor(), Cursor::new(3, 1));
        assert_eq!(term.attrs().fg, Color::RED);
    }

    #[test]
    fn test_unknown_final_is_noop() {
        let mut term = term();
        feed(&mut term, b"ab\x1b[5z\x1b[2@c");
        assert_eq!(term.cursor(), Cursor::new(3, 0));
        assert_eq!(code(&term, 2, 0), b'c');
        assert!(!term.in_sequence());
    }
}
