//! ANSI/VT100 terminal interpreter
//!
//! [`Terminal`] owns the screen, cursor, current colors and escape parser.
//! Host bytes go in through [`Terminal::handle`] one at a time; nothing
//! else mutates the screen except the explicit helpers used by the status
//! line and the configuration surface.

mod csi;
pub mod escape;

use serterm_hal::Bell;

use crate::config::{ColorScheme, LinePolicy, Settings};
use crate::screen::{Attrs, Cursor, CursorOverlay, Glyph, ScreenBuffer};

use escape::{c0, Action, EscapeParser};

/// Identification shown at startup
pub const BANNER: &str = concat!("serterm v", env!("CARGO_PKG_VERSION"));

/// Tab stops every N columns
pub const TAB_WIDTH: usize = 8;

/// Escape interpreter bound to a `COLS` x `ROWS` screen
pub struct Terminal<const COLS: usize, const ROWS: usize> {
    screen: ScreenBuffer<COLS, ROWS>,
    cursor: Cursor,
    saved: Cursor,
    attrs: Attrs,
    colors: ColorScheme,
    policy: LinePolicy,
    parser: EscapeParser,
    overlay: CursorOverlay,
}

impl<const COLS: usize, const ROWS: usize> Terminal<COLS, ROWS> {
    /// Create a blank terminal with the given settings
    ///
    /// The cursor starts hidden at home; see [`banner`](Self::banner).
    pub fn new(settings: &Settings) -> Self {
        let attrs = settings.colors.text();
        let mut screen = ScreenBuffer::new(attrs);
        screen.set_status_line(settings.status_line, attrs);

        Self {
            screen,
            cursor: Cursor::home(),
            saved: Cursor::home(),
            attrs,
            colors: settings.colors,
            policy: settings.policy,
            parser: EscapeParser::new(),
            overlay: CursorOverlay::new(),
        }
    }

    /// Process one byte from the host (or local loopback)
    pub fn handle(&mut self, byte: u8, bell: &mut impl Bell) {
        self.overlay.lift(&mut self.screen);

        match self.parser.feed(byte) {
            Action::None => {}
            Action::Print(ch) => self.put_char(ch),
            Action::Control(ch) => self.control(ch, bell),
            Action::Csi(seq) => self.dispatch(&seq),
        }

        self.overlay.place(&mut self.screen, self.cursor);
    }

    /// Process a run of bytes
    pub fn print(&mut self, bytes: &[u8], bell: &mut impl Bell) {
        for &byte in bytes {
            self.handle(byte, bell);
        }
    }

    /// Clear, show the identification centered on the top row, then park
    /// the cursor two rows down and make it visible
    pub fn banner(&mut self) {
        self.reset();
        self.edit(|term| {
            let col = COLS.saturating_sub(BANNER.len()) / 2;
            term.screen.write_str_attr(0, col, BANNER, term.attrs);
            term.cursor = Cursor::new(0, 2);
            term.clamp_cursor();
        });
        self.overlay.set_visible(true);
        self.overlay.place(&mut self.screen, self.cursor);
    }

    /// Clear the screen, home the cursor, restore default colors and drop
    /// any partial escape sequence
    pub fn reset(&mut self) {
        self.edit(|term| {
            term.parser.reset();
            term.attrs = term.colors.text();
            term.screen.clear(term.attrs);
            term.cursor = Cursor::home();
            term.saved = Cursor::home();
        });
    }

    /// Apply line policy, colors and status line visibility
    ///
    /// The current write colors switch to the new text colors.
    pub fn apply(&mut self, settings: &Settings) {
        self.edit(|term| {
            term.policy = settings.policy;
            term.colors = settings.colors;
            term.attrs = settings.colors.text();
            term.screen.set_status_line(settings.status_line, term.attrs);
            term.clamp_cursor();
        });
    }

    pub fn set_policy(&mut self, policy: LinePolicy) {
        self.policy = policy;
    }

    /// Reserve or release the status row
    pub fn set_status_line(&mut self, enabled: bool) {
        self.edit(|term| {
            term.screen.set_status_line(enabled, term.colors.text());
            term.clamp_cursor();
        });
    }

    /// Redraw the status row in status colors
    pub fn write_status(&mut self, left: &str, right: &str) {
        let attrs = self.colors.status();
        self.edit(|term| term.screen.write_status(left, right, attrs));
    }

    /// Clear the addressable region in explicit colors and home the cursor
    pub fn clear_with(&mut self, attrs: Attrs) {
        self.edit(|term| {
            term.screen.clear(attrs);
            term.cursor = Cursor::home();
        });
    }

    /// Write text at (col, row) keeping the cell colors
    pub fn write_str(&mut self, row: usize, col: usize, text: &str) {
        self.edit(|term| term.screen.write_str(row, col, text));
    }

    /// Write text at (col, row) in explicit colors
    pub fn write_str_attr(&mut self, row: usize, col: usize, text: &str, attrs: Attrs) {
        self.edit(|term| term.screen.write_str_attr(row, col, text, attrs));
    }

    /// Draw a frame with the font's box glyphs
    pub fn draw_box(&mut self, row: usize, col: usize, width: usize, height: usize, attrs: Attrs) {
        self.edit(|term| term.screen.draw_box(row, col, width, height, attrs));
    }

    /// Screen contents as displayed, cursor marker included
    pub fn screen(&self) -> &ScreenBuffer<COLS, ROWS> {
        &self.screen
    }

    /// Cell contents with the cursor marker removed
    pub fn cell(&self, x: usize, y: usize) -> Option<Glyph> {
        let mut glyph = self.screen.glyph(x, y)?;
        if let Some(code) = self.overlay.covered(Cursor::new(x, y)) {
            glyph.code = code;
        }
        Some(glyph)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn saved_cursor(&self) -> Cursor {
        self.saved
    }

    /// Colors applied to newly written glyphs
    pub fn attrs(&self) -> Attrs {
        self.attrs
    }

    pub fn colors(&self) -> ColorScheme {
        self.colors
    }

    pub fn policy(&self) -> LinePolicy {
        self.policy
    }

    pub fn cursor_visible(&self) -> bool {
        self.overlay.visible()
    }

    /// Check if an escape sequence is partially received
    pub fn in_sequence(&self) -> bool {
        self.parser.in_sequence()
    }

    /// Addressable rows
    pub fn lines(&self) -> usize {
        self.screen.lines()
    }

    /// Run a screen mutation with the cursor marker lifted
    fn edit<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.overlay.lift(&mut self.screen);
        f(self);
        self.overlay.place(&mut self.screen, self.cursor);
    }

    fn put_char(&mut self, ch: u8) {
        self.screen
            .put(self.cursor.x, self.cursor.y, Glyph::new(ch, self.attrs));

        if self.cursor.x + 1 < COLS {
            self.cursor.x += 1;
        } else if self.policy.autowrap {
            self.cursor.x = 0;
            self.line_feed();
        }
        // Without autowrap the cursor stays on the last column
    }

    fn control(&mut self, ch: u8, bell: &mut impl Bell) {
        match ch {
            c0::BEL => bell.ring(),
            c0::BS => {
                self.cursor.x = self.cursor.x.saturating_sub(1);
                if self.policy.backspace_erases {
                    self.screen
                        .put(self.cursor.x, self.cursor.y, Glyph::blank(self.attrs));
                }
            }
            c0::HT => {
                let next = (self.cursor.x / TAB_WIDTH + 1) * TAB_WIDTH;
                if next < COLS {
                    self.cursor.x = next;
                }
            }
            c0::CR => {
                self.cursor.x = 0;
                if self.policy.cr_implies_lf {
                    self.line_feed();
                }
            }
            c0::LF => {
                self.line_feed();
                if self.policy.lf_implies_cr {
                    self.cursor.x = 0;
                }
            }
            c0::FF => {
                self.screen.clear(self.attrs);
                self.cursor = Cursor::home();
            }
            _ => {}
        }
    }

    /// Move down one row, scrolling at the bottom of the addressable region
    fn line_feed(&mut self) {
        let lines = self.screen.lines();
        if self.cursor.y + 1 < lines {
            self.cursor.y += 1;
        } else {
            self.cursor.y = lines - 1;
            self.screen.scroll_up(1, self.attrs);
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor.x = self.cursor.x.min(COLS.saturating_sub(1));
        self.cursor.y = self.cursor.y.min(self.screen.lines().saturating_sub(1));
    }
}
