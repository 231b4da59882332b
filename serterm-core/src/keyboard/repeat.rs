//! Per-key auto-repeat
//!
//! Timing compares against the loop's wrapping millisecond clock; it never
//! waits.

use serterm_hal::hid::{KeyboardReport, MAX_KEYS};

use super::token::KeyToken;

/// Hold time before the first repeat
pub const REPEAT_DELAY_MS: u32 = 500;

/// Time between repeats after the first
pub const REPEAT_INTERVAL_MS: u32 = 50;

/// A held key scheduled for re-emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatSlot {
    /// HID usage code of the physical key
    pub keycode: u8,
    /// Token decoded when the key went down
    pub token: KeyToken,
    /// Clock value at which the token fires again
    pub next_fire_ms: u32,
}

/// Wrapping-safe "deadline has passed" check
pub(crate) fn reached(now_ms: u32, deadline_ms: u32) -> bool {
    now_ms.wrapping_sub(deadline_ms) < u32::MAX / 2
}

/// Repeat slots for up to six held keys
#[derive(Debug, Clone, Default)]
pub struct RepeatSlots {
    slots: [Option<RepeatSlot>; MAX_KEYS],
}

impl RepeatSlots {
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_KEYS],
        }
    }

    /// Start repeating a freshly pressed key
    ///
    /// Returns `false` if every slot is taken.
    pub fn arm(&mut self, keycode: u8, token: KeyToken, now_ms: u32) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(RepeatSlot {
                    keycode,
                    token,
                    next_fire_ms: now_ms.wrapping_add(REPEAT_DELAY_MS),
                });
                true
            }
            None => false,
        }
    }

    /// Cancel every key missing from `report`
    pub fn release_missing(&mut self, report: &KeyboardReport) {
        for slot in self.slots.iter_mut() {
            if matches!(slot, Some(held) if !report.contains(held.keycode)) {
                *slot = None;
            }
        }
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.slots = [None; MAX_KEYS];
    }

    /// Number of keys being tracked
    pub fn active(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Hand every due token to `emit` and schedule its next repeat
    pub fn fire_due(&mut self, now_ms: u32, mut emit: impl FnMut(KeyToken)) {
        for held in self.slots.iter_mut().flatten() {
            if reached(now_ms, held.next_fire_ms) {
                emit(held.token);
                held.next_fire_ms = now_ms.wrapping_add(REPEAT_INTERVAL_MS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serterm_hal::hid::Modifiers;

    fn count_fires(slots: &mut RepeatSlots, now_ms: u32) -> usize {
        let mut fired = 0;
        slots.fire_due(now_ms, |_| fired += 1);
        fired
    }

    #[test]
    fn test_delay_then_interval() {
        let mut slots = RepeatSlots::new();
        assert!(slots.arm(0x04, KeyToken::Byte(b'a'), 1000));

        assert_eq!(count_fires(&mut slots, 1000 + REPEAT_DELAY_MS - 1), 0);
        assert_eq!(count_fires(&mut slots, 1000 + REPEAT_DELAY_MS), 1);

        let t = 1000 + REPEAT_DELAY_MS;
        assert_eq!(count_fires(&mut slots, t + REPEAT_INTERVAL_MS - 1), 0);
        assert_eq!(count_fires(&mut slots, t + REPEAT_INTERVAL_MS), 1);
    }

    #[test]
    fn test_release_cancels() {
        let mut slots = RepeatSlots::new();
        slots.arm(0x04, KeyToken::Byte(b'a'), 0);
        slots.arm(0x05, KeyToken::Byte(b'b'), 0);

        slots.release_missing(&KeyboardReport::new(Modifiers::none(), &[0x05]));
        assert_eq!(slots.active(), 1);

        let mut tokens = [None; 2];
        let mut n = 0;
        slots.fire_due(REPEAT_DELAY_MS, |t| {
            tokens[n] = Some(t);
            n += 1;
        });
        assert_eq!(tokens, [Some(KeyToken::Byte(b'b')), None]);
    }

    #[test]
    fn test_full_slots() {
        let mut slots = RepeatSlots::new();
        for k in 0..MAX_KEYS as u8 {
            assert!(slots.arm(0x04 + k, KeyToken::Byte(b'a' + k), 0));
        }
        assert!(!slots.arm(0x20, KeyToken::Byte(b'3'), 0));
        slots.clear();
        assert_eq!(slots.active(), 0);
    }

    #[test]
    fn test_clock_wrap() {
        let mut slots = RepeatSlots::new();
        let start = u32::MAX - 100;
        slots.arm(0x04, KeyToken::Byte(b'a'), start);
        assert_eq!(count_fires(&mut slots, start.wrapping_add(REPEAT_DELAY_MS - 1)), 0);
        assert_eq!(count_fires(&mut slots, start.wrapping_add(REPEAT_DELAY_MS)), 1);
    }
}
