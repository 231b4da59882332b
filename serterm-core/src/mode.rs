//! Keystroke routing
//!
//! Every token from the key queue passes through [`ModeController::dispatch`]:
//!
//! ```text
//!            Alt+L                 Alt+C
//!   LOCAL ◄─────────► ONLINE ◄─────────────► CONFIG
//!     │                          exit           ▲
//!     └─────────────────────────────────────────┘
//!                       Alt+C
//! ```
//!
//! Alt tokens are checked first in every mode. Everything else goes to the
//! host (ONLINE), back into the interpreter (LOCAL) or to the configuration
//! surface (CONFIG).

use serterm_hal::Bell;

use crate::config::Settings;
use crate::keyboard::{AltKey, KeyToken};
use crate::ring::RingBuffer;
use crate::screen::{Attrs, Color};
use crate::terminal::escape::c0;
use crate::terminal::Terminal;

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Keys go to the host
    #[default]
    Online,
    /// Keys are echoed into the local interpreter
    Local,
    /// Keys edit the settings
    Config,
}

impl Mode {
    /// Name shown on the status line
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Online => "ONLINE",
            Mode::Local => "LOCAL",
            Mode::Config => "CONFIG",
        }
    }
}

/// Result of handing a key to the configuration surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigStatus {
    /// Stay in CONFIG
    Editing,
    /// Leave CONFIG and apply the edited settings
    Exit,
}

/// Screen-based settings editor
///
/// Owns the whole screen while CONFIG is active.
pub trait ConfigSurface {
    /// Draw the surface for a fresh edit of `settings`
    fn enter<const C: usize, const R: usize>(
        &mut self,
        settings: &Settings,
        terminal: &mut Terminal<C, R>,
    );

    /// Handle one key
    fn key<const C: usize, const R: usize>(
        &mut self,
        token: KeyToken,
        settings: &mut Settings,
        terminal: &mut Terminal<C, R>,
    ) -> ConfigStatus;
}

/// Read-only settings page; Escape or Enter leaves it
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigScreen;

impl ConfigScreen {
    /// Colors of the configuration page
    pub const ATTRS: Attrs = Attrs::new(Color::WHITE, Color::DARKGREEN);

    pub const TITLE: &'static str = "TERMINAL CONFIGURATION";
}

impl ConfigSurface for ConfigScreen {
    fn enter<const C: usize, const R: usize>(
        &mut self,
        settings: &Settings,
        terminal: &mut Terminal<C, R>,
    ) {
        use core::fmt::Write;

        terminal.clear_with(Self::ATTRS);
        terminal.write_str(0, 0, Self::TITLE);

        let mut line: heapless::String<40> = heapless::String::new();
        let _ = write!(line, "Serial      {}", settings.serial);
        terminal.write_str(2, 2, &line);

        let flags = [
            ("Autowrap    ", settings.policy.autowrap),
            ("BS erases   ", settings.policy.backspace_erases),
            ("CR -> CRLF  ", settings.policy.cr_implies_lf),
            ("LF -> CRLF  ", settings.policy.lf_implies_cr),
            ("Status line ", settings.status_line),
        ];
        for (row, (name, on)) in flags.iter().enumerate() {
            line.clear();
            let _ = write!(line, "{}{}", name, if *on { "on" } else { "off" });
            terminal.write_str(3 + row, 2, &line);
        }
    }

    fn key<const C: usize, const R: usize>(
        &mut self,
        token: KeyToken,
        _settings: &mut Settings,
        _terminal: &mut Terminal<C, R>,
    ) -> ConfigStatus {
        match token {
            KeyToken::Byte(c0::ESC) | KeyToken::Byte(c0::CR) => ConfigStatus::Exit,
            _ => ConfigStatus::Editing,
        }
    }
}

/// What a dispatched token changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// Now in this mode (also reported when CONFIG is entered again)
    Entered(Mode),
    /// CONFIG finished; the edited settings should be applied
    ConfigExited(Settings),
}

/// Current mode plus the settings being edited in CONFIG
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    draft: Settings,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Settings as edited so far in CONFIG
    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    /// Route one token
    pub fn dispatch<const C: usize, const R: usize, const T: usize>(
        &mut self,
        token: KeyToken,
        settings: &Settings,
        terminal: &mut Terminal<C, R>,
        tx: &mut RingBuffer<u8, T>,
        bell: &mut impl Bell,
        surface: &mut impl ConfigSurface,
    ) -> Option<ModeEvent> {
        if let KeyToken::Alt(alt) = token {
            return self.command(alt, settings, terminal, surface);
        }

        match self.mode {
            Mode::Online => {
                for byte in token.expand() {
                    if !tx.try_push(byte) {
                        warn!("mode: tx queue full, byte dropped");
                    }
                }
                None
            }
            Mode::Local => {
                for byte in token.expand() {
                    terminal.handle(byte, bell);
                }
                None
            }
            Mode::Config => match surface.key(token, &mut self.draft, terminal) {
                ConfigStatus::Editing => None,
                ConfigStatus::Exit => {
                    self.mode = Mode::Online;
                    info!("mode: leaving config");
                    Some(ModeEvent::ConfigExited(self.draft))
                }
            },
        }
    }

    fn command<const C: usize, const R: usize>(
        &mut self,
        alt: AltKey,
        settings: &Settings,
        terminal: &mut Terminal<C, R>,
        surface: &mut impl ConfigSurface,
    ) -> Option<ModeEvent> {
        match alt {
            AltKey::Config => {
                // Entering again starts the edit over
                self.draft = *settings;
                self.mode = Mode::Config;
                surface.enter(&self.draft, terminal);
                info!("mode: config");
                Some(ModeEvent::Entered(Mode::Config))
            }
            AltKey::ToggleLocal => {
                let next = match self.mode {
                    Mode::Online => Mode::Local,
                    Mode::Local => Mode::Online,
                    Mode::Config => return None,
                };
                self.mode = next;
                info!("mode: {}", next);
                Some(ModeEvent::Entered(next))
            }
            AltKey::Record | AltKey::Transmit => {
                debug!("mode: {} has no action", alt);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Cursor;
    use serterm_hal::beeper::SilentBell;
    use crate::keyboard::SpecialKey;

    type Small = Terminal<40, 12>;

    struct Fixture {
        modes: ModeController,
        settings: Settings,
        terminal: Small,
        tx: RingBuffer<u8, 16>,
        surface: ConfigScreen,
    }

    impl Fixture {
        fn new() -> Self {
            let settings = Settings::default();
            Self {
                modes: ModeController::new(),
                terminal: Terminal::new(&settings),
                settings,
                tx: RingBuffer::new(),
                surface: ConfigScreen,
            }
        }

        fn send(&mut self, token: KeyToken) -> Option<ModeEvent> {
            self.modes.dispatch(
                token,
                &self.settings,
                &mut self.terminal,
                &mut self.tx,
                &mut SilentBell,
                &mut self.surface,
            )
        }

        fn drain_tx(&mut self, out: &mut [u8]) -> usize {
            let mut n = 0;
            while let Some(b) = self.tx.try_pop() {
                out[n] = b;
                n += 1;
            }
            n
        }
    }

    #[test]
    fn test_online_forwards_expanded() {
        let mut fx = Fixture::new();
        assert_eq!(fx.send(KeyToken::Byte(b'x')), None);
        assert_eq!(fx.send(KeyToken::Special(SpecialKey::Up)), None);

        let mut out = [0u8; 8];
        let n = fx.drain_tx(&mut out);
        assert_eq!(&out[..n], b"x\x1b[A");
        assert_eq!(fx.terminal.cursor(), Cursor::home());
    }

    #[test]
    fn test_local_loops_back() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.send(KeyToken::Alt(AltKey::ToggleLocal)),
            Some(ModeEvent::Entered(Mode::Local))
        );
        fx.send(KeyToken::Byte(b'q'));
        fx.send(KeyToken::Special(SpecialKey::Down));

        assert!(fx.tx.is_empty());
        assert_eq!(fx.terminal.cell(0, 0).map(|g| g.code), Some(b'q'));
        assert_eq!(fx.terminal.cursor(), Cursor::new(1, 1));

        assert_eq!(
            fx.send(KeyToken::Alt(AltKey::ToggleLocal)),
            Some(ModeEvent::Entered(Mode::Online))
        );
    }

    #[test]
    fn test_config_enter_and_exit() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.send(KeyToken::Alt(AltKey::Config)),
            Some(ModeEvent::Entered(Mode::Config))
        );
        assert_eq!(fx.modes.mode(), Mode::Config);
        assert_eq!(fx.terminal.cell(0, 0).map(|g| g.code), Some(b'T'));
        assert_eq!(fx.terminal.cell(5, 5).map(|g| g.bg), Some(Color::DARKGREEN));

        // Toggle is ignored and text is not sent while configuring
        assert_eq!(fx.send(KeyToken::Alt(AltKey::ToggleLocal)), None);
        assert_eq!(fx.send(KeyToken::Byte(b'z')), None);
        assert!(fx.tx.is_empty());

        assert_eq!(
            fx.send(KeyToken::Byte(c0::ESC)),
            Some(ModeEvent::ConfigExited(fx.settings))
        );
        assert_eq!(fx.modes.mode(), Mode::Online);
    }

    #[test]
    fn test_config_reentry_redraws() {
        let mut fx = Fixture::new();
        fx.send(KeyToken::Alt(AltKey::Config));
        fx.terminal.write_str(0, 0, "XXXX");
        assert_eq!(
            fx.send(KeyToken::Alt(AltKey::Config)),
            Some(ModeEvent::Entered(Mode::Config))
        );
        assert_eq!(fx.terminal.cell(0, 0).map(|g| g.code), Some(b'T'));
    }

    #[test]
    fn test_placeholders_do_nothing() {
        let mut fx = Fixture::new();
        assert_eq!(fx.send(KeyToken::Alt(AltKey::Record)), None);
        assert_eq!(fx.send(KeyToken::Alt(AltKey::Transmit)), None);
        assert_eq!(fx.modes.mode(), Mode::Online);
        assert!(fx.tx.is_empty());
    }

    #[test]
    fn test_tx_overflow_drops_newest() {
        let mut fx = Fixture::new();
        for _ in 0..20 {
            fx.send(KeyToken::Byte(b'k'));
        }
        assert_eq!(fx.tx.len(), 15);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Mode::Online.label(), "ONLINE");
        assert_eq!(Mode::Local.label(), "LOCAL");
        assert_eq!(Mode::Config.label(), "CONFIG");
    }
}
