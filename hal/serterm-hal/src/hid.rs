//! USB HID boot keyboard abstractions
//!
//! The USB host stack (enumeration, report descriptor parsing) is outside
//! this crate. What reaches the terminal is the 8-byte boot-protocol report:
//!
//! ```text
//! ┌──────────┬──────────┬───────────────────────────────┐
//! │ MODIFIER │ RESERVED │ KEYCODE[0..6]                 │
//! │ 1B       │ 1B       │ 6B (0 = no key in this slot)  │
//! └──────────┴──────────┴───────────────────────────────┘
//! ```

/// Length of a boot-protocol keyboard report
pub const BOOT_REPORT_LEN: usize = 8;

/// Maximum simultaneously reported non-modifier keys
pub const MAX_KEYS: usize = 6;

/// Usage code reported in every slot on phantom/rollover state
pub const KEY_ERROR_ROLL_OVER: u8 = 0x01;

/// Usage code of the caps lock key
pub const KEY_CAPS_LOCK: u8 = 0x39;

/// Output report bit for the num lock LED
pub const LED_NUM_LOCK: u8 = 0x01;
/// Output report bit for the caps lock LED
pub const LED_CAPS_LOCK: u8 = 0x02;
/// Output report bit for the scroll lock LED
pub const LED_SCROLL_LOCK: u8 = 0x04;

/// Modifier byte of a keyboard report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const LEFT_GUI: u8 = 0x08;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
    pub const RIGHT_GUI: u8 = 0x80;

    /// No modifiers held
    pub const fn none() -> Self {
        Self(0)
    }

    /// Either control key held
    pub const fn ctrl(self) -> bool {
        self.0 & (Self::LEFT_CTRL | Self::RIGHT_CTRL) != 0
    }

    /// Either shift key held
    pub const fn shift(self) -> bool {
        self.0 & (Self::LEFT_SHIFT | Self::RIGHT_SHIFT) != 0
    }

    /// Either alt key held
    pub const fn alt(self) -> bool {
        self.0 & (Self::LEFT_ALT | Self::RIGHT_ALT) != 0
    }
}

/// One keyboard state report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier keys held
    pub modifiers: Modifiers,
    /// Pressed keys (usage codes), 0 for empty slots
    pub keycodes: [u8; MAX_KEYS],
}

impl KeyboardReport {
    /// Create a report from modifiers and up to six keycodes
    pub fn new(modifiers: Modifiers, keys: &[u8]) -> Self {
        let mut keycodes = [0u8; MAX_KEYS];
        for (slot, &key) in keycodes.iter_mut().zip(keys) {
            *slot = key;
        }
        Self { modifiers, keycodes }
    }

    /// Parse an 8-byte boot-protocol report
    ///
    /// Returns `None` if the slice is shorter than a boot report.
    pub fn from_boot_report(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < BOOT_REPORT_LEN {
            return None;
        }

        let mut keycodes = [0u8; MAX_KEYS];
        keycodes.copy_from_slice(&bytes[2..2 + MAX_KEYS]);

        Some(Self {
            modifiers: Modifiers(bytes[0]),
            keycodes,
        })
    }

    /// Check whether a key is present in this report
    pub fn contains(&self, keycode: u8) -> bool {
        keycode != 0 && self.keycodes.contains(&keycode)
    }

    /// Check for the rollover error state (too many keys pressed)
    pub fn is_rollover_error(&self) -> bool {
        self.keycodes.contains(&KEY_ERROR_ROLL_OVER)
    }

    /// Iterate over non-empty keycode slots
    pub fn pressed(&self) -> impl Iterator<Item = u8> + '_ {
        self.keycodes.iter().copied().filter(|&k| k != 0)
    }
}

/// Attached keyboard, as seen through the USB host stack
pub trait KeyboardHost {
    /// Take the next pending report, if one arrived since the last poll
    fn poll_report(&mut self) -> Option<KeyboardReport>;

    /// Send the LED output report (bitmap of `LED_*` bits)
    fn set_leds(&mut self, leds: u8);
}
