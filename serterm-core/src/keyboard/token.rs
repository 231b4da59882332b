//! Decoded key tokens
//!
//! Tokens sit in the key queue unexpanded. Special keys become their escape
//! strings only when they are sent to the host or looped back.

use heapless::Vec;

/// Longest byte string a single token expands to
pub const MAX_EXPANSION: usize = 4;

/// Navigation and function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
}

impl SpecialKey {
    /// All special keys in keymap code order (0x80 upwards)
    pub const ALL: [SpecialKey; 16] = [
        SpecialKey::Up,
        SpecialKey::Down,
        SpecialKey::Left,
        SpecialKey::Right,
        SpecialKey::Home,
        SpecialKey::End,
        SpecialKey::F1,
        SpecialKey::F2,
        SpecialKey::F3,
        SpecialKey::F4,
        SpecialKey::F5,
        SpecialKey::F6,
        SpecialKey::F7,
        SpecialKey::F8,
        SpecialKey::F9,
        SpecialKey::F10,
    ];

    /// First keymap code used for special keys
    pub const BASE_CODE: u8 = 0x80;

    /// Look up a keymap code (0x80-0x8F)
    pub fn from_code(code: u8) -> Option<Self> {
        let index = code.checked_sub(Self::BASE_CODE)?;
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Keymap code of this key
    pub fn code(self) -> u8 {
        Self::BASE_CODE + self as u8
    }

    /// Bytes sent for this key
    pub const fn sequence(self) -> &'static [u8] {
        match self {
            SpecialKey::Up => b"\x1b[A",
            SpecialKey::Down => b"\x1b[B",
            SpecialKey::Left => b"\x1b[D",
            SpecialKey::Right => b"\x1b[C",
            SpecialKey::Home => b"\x1b[H",
            SpecialKey::End => b"\x1b[K",
            SpecialKey::F1 => b"\x1b[OP",
            SpecialKey::F2 => b"\x1b[OQ",
            SpecialKey::F3 => b"\x1b[OR",
            SpecialKey::F4 => b"\x1b[OS",
            SpecialKey::F5 => b"\x1b[OT",
            SpecialKey::F6 => b"\x1b[OU",
            SpecialKey::F7 => b"\x1b[OV",
            SpecialKey::F8 => b"\x1b[OW",
            SpecialKey::F9 => b"\x1b[OX",
            SpecialKey::F10 => b"\x1b[OY",
        }
    }
}

/// Reserved alt-key commands, never sent as text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AltKey {
    /// Alt+C: open the configuration surface
    Config,
    /// Alt+L: switch between online and local loopback
    ToggleLocal,
    /// Alt+R: record (reserved)
    Record,
    /// Alt+T: transmit (reserved)
    Transmit,
}

impl AltKey {
    /// Map the unshifted character of a key held with alt
    pub fn from_letter(ch: u8) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            b'c' => Some(AltKey::Config),
            b'l' => Some(AltKey::ToggleLocal),
            b'r' => Some(AltKey::Record),
            b't' => Some(AltKey::Transmit),
            _ => None,
        }
    }
}

/// One decoded keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyToken {
    /// Single byte (printable or control)
    Byte(u8),
    /// Key that expands to an escape string
    Special(SpecialKey),
    /// Reserved mode command
    Alt(AltKey),
}

impl KeyToken {
    /// Bytes this token stands for; empty for alt tokens
    pub fn expand(self) -> Vec<u8, MAX_EXPANSION> {
        let mut out = Vec::new();
        match self {
            KeyToken::Byte(b) => {
                let _ = out.push(b);
            }
            KeyToken::Special(key) => {
                // Every sequence fits MAX_EXPANSION
                let _ = out.extend_from_slice(key.sequence());
            }
            KeyToken::Alt(_) => {}
        }
        out
    }

    pub fn is_alt(self) -> bool {
        matches!(self, KeyToken::Alt(_))
    }
}
