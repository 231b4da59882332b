//! Audible bell
//!
//! The terminal rings the bell on BEL (0x07). The bell is driven from the
//! poll loop: [`Bell::ring`] only queues a beep, [`Bell::tick`] advances
//! the tone/gap timing against the loop's millisecond clock.

use embedded_hal::digital::OutputPin;

/// Tone duration per beep
pub const BEEP_TIME_MS: u32 = 100;

/// Silence between consecutive beeps
pub const BEEP_GAP_MS: u32 = 200;

/// Maximum queued beeps; further rings are dropped
pub const MAX_PENDING_BEEPS: u8 = 8;

/// Something that can sound the terminal bell
pub trait Bell {
    /// Queue one beep
    fn ring(&mut self);

    /// Advance timing; called once per poll loop iteration
    fn tick(&mut self, _now_ms: u32) {}
}

/// Bell that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBell;

impl Bell for SilentBell {
    fn ring(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum BeepPhase {
    /// Nothing sounding
    Idle,
    /// Tone on until the deadline
    Sounding { until_ms: u32 },
    /// Tone off until the deadline
    Gap { until_ms: u32 },
}

/// Buzzer on a GPIO pin
///
/// Each ring produces one tone of [`BEEP_TIME_MS`] followed by a gap of
/// [`BEEP_GAP_MS`], so a burst of BEL characters is heard as distinct
/// beeps.
pub struct Beeper<P: OutputPin> {
    pin: P,
    phase: BeepPhase,
    pending: u8,
}

impl<P: OutputPin> Beeper<P> {
    /// Create a new beeper, driving the pin low
    pub fn new(mut pin: P) -> Self {
        pin.set_low().ok();
        Self {
            pin,
            phase: BeepPhase::Idle,
            pending: 0,
        }
    }

    /// Number of beeps not yet finished
    pub fn pending(&self) -> u8 {
        self.pending
    }

    /// Check if the tone is currently on
    pub fn is_sounding(&self) -> bool {
        matches!(self.phase, BeepPhase::Sounding { .. })
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }

    fn start_tone(&mut self, now_ms: u32) {
        self.pin.set_high().ok();
        self.phase = BeepPhase::Sounding {
            until_ms: now_ms.wrapping_add(BEEP_TIME_MS),
        };
    }
}

/// Wrapping-safe "deadline has passed" check
fn reached(now_ms: u32, deadline_ms: u32) -> bool {
    now_ms.wrapping_sub(deadline_ms) < u32::MAX / 2
}

impl<P: OutputPin> Bell for Beeper<P> {
    fn ring(&mut self) {
        if self.pending < MAX_PENDING_BEEPS {
            self.pending += 1;
        }
    }

    fn tick(&mut self, now_ms: u32) {
        match self.phase {
            BeepPhase::Idle => {
                if self.pending > 0 {
                    self.start_tone(now_ms);
                }
            }
            BeepPhase::Sounding { until_ms } => {
                if reached(now_ms, until_ms) {
                    self.pin.set_low().ok();
                    self.phase = BeepPhase::Gap {
                        until_ms: now_ms.wrapping_add(BEEP_GAP_MS),
                    };
                }
            }
            BeepPhase::Gap { until_ms } => {
                if reached(now_ms, until_ms) {
                    self.pending = self.pending.saturating_sub(1);
                    if self.pending > 0 {
                        self.start_tone(now_ms);
                    } else {
                        self.phase = BeepPhase::Idle;
                    }
                }
            }
        }
    }
}
