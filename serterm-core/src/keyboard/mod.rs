//! Keyboard report decoding
//!
//! Turns successive HID boot reports into [`KeyToken`]s:
//!
//! 1. Caps lock toggles on the report where its key first appears
//! 2. Each key absent from the previous report decodes through the keymap
//! 3. The token is queued and armed for auto-repeat
//!
//! Keys that stay down produce nothing new until their repeat fires.

pub mod keymap;
pub mod repeat;
pub mod token;

pub use keymap::Locale;
pub use repeat::{RepeatSlot, RepeatSlots, REPEAT_DELAY_MS, REPEAT_INTERVAL_MS};
pub use token::{AltKey, KeyToken, SpecialKey};

use serterm_hal::hid::{KeyboardReport, Modifiers, KEY_CAPS_LOCK, LED_CAPS_LOCK, MAX_KEYS};

use crate::ring::RingBuffer;

/// Decode one pressed key
///
/// Returns `None` for keys that produce nothing (unmapped keys, caps lock,
/// ctrl combinations outside the control range).
pub fn decode(
    locale: Locale,
    keycode: u8,
    modifiers: Modifiers,
    caps_lock: bool,
) -> Option<KeyToken> {
    if keycode == KEY_CAPS_LOCK {
        return None;
    }

    let base = locale.lookup(keycode, false);
    let mut shift = modifiers.shift();
    if caps_lock && base.is_ascii_lowercase() {
        shift = !shift;
    }
    let ch = locale.lookup(keycode, shift);

    if modifiers.alt() {
        if let Some(alt) = AltKey::from_letter(base) {
            return Some(KeyToken::Alt(alt));
        }
    }

    if ch > 0x7F {
        return SpecialKey::from_code(ch).map(KeyToken::Special);
    }

    if modifiers.ctrl() {
        return match ch {
            0x60..=0x7F => Some(KeyToken::Byte(ch - 0x60)),
            0x40..=0x5F => Some(KeyToken::Byte(ch - 0x40)),
            _ => None,
        };
    }

    (ch != 0).then_some(KeyToken::Byte(ch))
}

/// Keyboard state carried between reports
pub struct KeyboardInput {
    locale: Locale,
    prev: KeyboardReport,
    caps_lock: bool,
    leds: u8,
    /// LED bitmap last handed to the keyboard, `None` before the first
    sent_leds: Option<u8>,
    repeat: RepeatSlots,
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl KeyboardInput {
    pub const fn new(locale: Locale) -> Self {
        Self {
            locale,
            prev: KeyboardReport {
                modifiers: Modifiers(0),
                keycodes: [0; MAX_KEYS],
            },
            caps_lock: false,
            leds: 0,
            sent_leds: None,
            repeat: RepeatSlots::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Keys currently armed for repeat
    pub fn held(&self) -> usize {
        self.repeat.active()
    }

    /// Process one keyboard report
    ///
    /// Newly pressed keys are decoded and pushed into `queue`; a full queue
    /// drops the token.
    pub fn process_report<const N: usize>(
        &mut self,
        report: &KeyboardReport,
        now_ms: u32,
        queue: &mut RingBuffer<KeyToken, N>,
    ) {
        if report.is_rollover_error() {
            trace!("keyboard: rollover report ignored");
            return;
        }

        if report.contains(KEY_CAPS_LOCK) && !self.prev.contains(KEY_CAPS_LOCK) {
            self.caps_lock = !self.caps_lock;
            if self.caps_lock {
                self.leds |= LED_CAPS_LOCK;
            } else {
                self.leds &= !LED_CAPS_LOCK;
            }
            debug!("keyboard: caps lock {}", self.caps_lock);
        }

        self.repeat.release_missing(report);

        for keycode in report.pressed() {
            if self.prev.contains(keycode) {
                continue;
            }

            let Some(token) = decode(self.locale, keycode, report.modifiers, self.caps_lock) else {
                continue;
            };

            push_token(queue, token);

            if !token.is_alt() {
                self.repeat.arm(keycode, token, now_ms);
            }
        }

        self.prev = *report;
    }

    /// Re-emit tokens of held keys whose repeat time has come
    pub fn poll_repeat<const N: usize>(
        &mut self,
        now_ms: u32,
        queue: &mut RingBuffer<KeyToken, N>,
    ) {
        self.repeat.fire_due(now_ms, |token| push_token(queue, token));
    }

    /// LED bitmap to send, if it changed since the last call
    pub fn take_led_change(&mut self) -> Option<u8> {
        if self.sent_leds == Some(self.leds) {
            return None;
        }
        self.sent_leds = Some(self.leds);
        Some(self.leds)
    }
}

fn push_token<const N: usize>(queue: &mut RingBuffer<KeyToken, N>, token: KeyToken) {
    if !queue.try_push(token) {
        warn!("keyboard: key queue full, token dropped");
    }
}
