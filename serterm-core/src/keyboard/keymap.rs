//! HID usage code to character tables
//!
//! Each entry is an (unshifted, shifted) pair. Codes 0x80-0x8F stand for
//! the special keys of [`SpecialKey`](super::SpecialKey); 0 means the key
//! produces nothing.

use super::token::SpecialKey;

/// Entries per table; usage codes at or above this produce nothing
pub const KEYMAP_LEN: usize = 128;

type Table = [[u8; 2]; KEYMAP_LEN];

/// Keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Locale {
    #[default]
    Us,
    Uk,
}

impl Locale {
    /// Character for a usage code, 0 if unmapped
    pub fn lookup(self, keycode: u8, shifted: bool) -> u8 {
        let table = match self {
            Locale::Us => &US,
            Locale::Uk => &UK,
        };
        table
            .get(usize::from(keycode))
            .map(|pair| pair[usize::from(shifted)])
            .unwrap_or(0)
    }
}

const fn special(key: SpecialKey) -> [u8; 2] {
    let code = SpecialKey::BASE_CODE + key as u8;
    [code, code]
}

/// Keys whose meaning does not depend on the layout
const fn common() -> Table {
    let mut t = [[0u8; 2]; KEYMAP_LEN];

    let mut i = 0;
    while i < 26 {
        t[0x04 + i] = [b'a' + i as u8, b'A' + i as u8];
        i += 1;
    }

    t[0x1E] = [b'1', b'!'];
    t[0x1F] = [b'2', b'@'];
    t[0x20] = [b'3', b'#'];
    t[0x21] = [b'4', b'$'];
    t[0x22] = [b'5', b'%'];
    t[0x23] = [b'6', b'^'];
    t[0x24] = [b'7', b'&'];
    t[0x25] = [b'8', b'*'];
    t[0x26] = [b'9', b'('];
    t[0x27] = [b'0', b')'];

    t[0x28] = [b'\r', b'\r'];
    t[0x29] = [0x1B, 0x1B];
    t[0x2A] = [0x08, 0x08];
    t[0x2B] = [b'\t', b'\t'];
    t[0x2C] = [b' ', b' '];
    t[0x2D] = [b'-', b'_'];
    t[0x2E] = [b'=', b'+'];
    t[0x2F] = [b'[', b'{'];
    t[0x30] = [b']', b'}'];
    t[0x31] = [b'\\', b'|'];
    t[0x32] = [b'#', b'~'];
    t[0x33] = [b';', b':'];
    t[0x34] = [b'\'', b'"'];
    t[0x35] = [b'`', b'~'];
    t[0x36] = [b',', b'<'];
    t[0x37] = [b'.', b'>'];
    t[0x38] = [b'/', b'?'];

    // F1-F10 (F11/F12 unmapped)
    let mut f = 0;
    while f < 10 {
        let code = SpecialKey::BASE_CODE + SpecialKey::F1 as u8 + f as u8;
        t[0x3A + f] = [code, code];
        f += 1;
    }

    t[0x4A] = special(SpecialKey::Home);
    t[0x4C] = [0x7F, 0x7F];
    t[0x4D] = special(SpecialKey::End);
    t[0x4F] = special(SpecialKey::Right);
    t[0x50] = special(SpecialKey::Left);
    t[0x51] = special(SpecialKey::Down);
    t[0x52] = special(SpecialKey::Up);

    // Keypad
    t[0x54] = [b'/', b'/'];
    t[0x55] = [b'*', b'*'];
    t[0x56] = [b'-', b'-'];
    t[0x57] = [b'+', b'+'];
    t[0x58] = [b'\r', b'\r'];
    t[0x59] = [b'1', b'1'];
    t[0x5A] = [b'2', b'2'];
    t[0x5B] = [b'3', b'3'];
    t[0x5C] = [b'4', b'4'];
    t[0x5D] = [b'5', b'5'];
    t[0x5E] = [b'6', b'6'];
    t[0x5F] = [b'7', b'7'];
    t[0x60] = [b'8', b'8'];
    t[0x61] = [b'9', b'9'];
    t[0x62] = [b'0', b'0'];
    t[0x63] = [b'.', b'.'];
    t[0x64] = [b'\\', b'|'];
    t[0x67] = [b'=', b'='];

    t
}

const fn uk() -> Table {
    let mut t = common();
    t[0x1F] = [b'2', b'"'];
    // Pound sign has no ASCII code
    t[0x20] = [b'3', 0];
    t[0x34] = [b'\'', b'@'];
    t[0x35] = [b'`', 0];
    t
}

static US: Table = common();
static UK: Table = uk();
