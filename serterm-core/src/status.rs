//! Status line content

use core::fmt::Write;

use heapless::String;
use serterm_hal::SerialConfig;

use crate::mode::Mode;
use crate::terminal::Terminal;

/// Room for the right-hand status text
pub const STATUS_TEXT_LEN: usize = 24;

/// Serial setting as shown on the status line, e.g. `115200 8N1`
pub fn serial_text(config: &SerialConfig) -> String<STATUS_TEXT_LEN> {
    let mut text = String::new();
    // "115200 7O1" is well within capacity
    let _ = write!(text, "{}", config);
    text
}

/// Redraw the status row: mode on the left, serial setting on the right
pub fn draw<const C: usize, const R: usize>(
    terminal: &mut Terminal<C, R>,
    mode: Mode,
    serial: &SerialConfig,
) {
    terminal.write_status(mode.label(), &serial_text(serial));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use serterm_hal::{BaudRate, Framing};

    #[test]
    fn test_serial_text() {
        let config = SerialConfig::new(BaudRate::B9600, Framing::SevenOdd);
        assert_eq!(serial_text(&config).as_str(), "9600 7O1");
        assert_eq!(serial_text(&SerialConfig::default()).as_str(), "115200 8N1");
    }

    #[test]
    fn test_draw_layout() {
        let mut terminal: Terminal<20, 3> = Terminal::new(&Settings::default());
        draw(&mut terminal, Mode::Local, &SerialConfig::default());

        let row = terminal.screen().row(2).unwrap();
        let text: [u8; 20] = core::array::from_fn(|i| row[i].code);
        assert_eq!(&text, b"LOCAL     115200 8N1");
    }

    #[test]
    fn test_draw_without_status_line() {
        let settings = Settings {
            status_line: false,
            ..Settings::default()
        };
        let mut terminal: Terminal<20, 3> = Terminal::new(&settings);
        draw(&mut terminal, Mode::Online, &SerialConfig::default());
        assert_eq!(terminal.cell(0, 2).map(|g| g.code), Some(b' '));
    }
}
