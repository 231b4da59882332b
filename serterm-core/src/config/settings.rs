//! Runtime settings
//!
//! Edited through the configuration surface and applied when it exits.

use serterm_hal::SerialConfig;

use crate::screen::{Attrs, Color};

/// Line discipline flags for the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinePolicy {
    /// Wrap to the next line after writing the last column
    pub autowrap: bool,
    /// Backspace blanks the cell it moves onto
    pub backspace_erases: bool,
    /// CR also performs a line feed
    pub cr_implies_lf: bool,
    /// LF also performs a carriage return
    pub lf_implies_cr: bool,
}

impl Default for LinePolicy {
    fn default() -> Self {
        Self {
            autowrap: true,
            backspace_erases: false,
            cr_implies_lf: false,
            lf_implies_cr: false,
        }
    }
}

/// The four user-selectable colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorScheme {
    pub text_fg: Color,
    pub text_bg: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl ColorScheme {
    /// Attributes for terminal text (and the SGR 0 reset)
    pub const fn text(&self) -> Attrs {
        Attrs::new(self.text_fg, self.text_bg)
    }

    /// Attributes for the status row
    pub const fn status(&self) -> Attrs {
        Attrs::new(self.status_fg, self.status_bg)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            text_fg: Color::WHITE,
            text_bg: Color::SEMIBLUE,
            status_fg: Color::BLACK,
            status_bg: Color::LIGHTGRAY,
        }
    }
}

/// All runtime-configurable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Host link baud rate and framing
    pub serial: SerialConfig,
    /// Interpreter line discipline
    pub policy: LinePolicy,
    /// Reserve the last row for the status line
    pub status_line: bool,
    /// Text and status colors
    pub colors: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            policy: LinePolicy::default(),
            status_line: true,
            colors: ColorScheme::default(),
        }
    }
}
