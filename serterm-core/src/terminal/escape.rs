//! Escape sequence parser
//!
//! Splits the host byte stream into printable bytes, C0 controls and
//! complete CSI sequences:
//!
//! ```text
//!            ESC                 [
//! Ground ─────────► EscapeSeen ─────► CsiParams ──┐ 0-9 ; ?
//!   ▲                   │ other          │   ▲────┘ other bytes ignored
//!   └───────────────────┴────────────────┘ final byte 0x40..=0x7D
//! ```

/// C0 control codes handled by the interpreter
pub mod c0 {
    pub const BEL: u8 = 0x07;
    pub const BS: u8 = 0x08;
    pub const HT: u8 = 0x09;
    pub const LF: u8 = 0x0A;
    pub const FF: u8 = 0x0C;
    pub const CR: u8 = 0x0D;
    pub const ESC: u8 = 0x1B;
    pub const DEL: u8 = 0x7F;
}

/// Parameter slots per sequence
pub const MAX_PARAMS: usize = 5;

/// A complete CSI sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CsiSequence {
    /// Numeric parameters, zero when omitted
    pub params: [u16; MAX_PARAMS],
    /// Index of the last parameter slot reached
    pub count: usize,
    /// A `?` was seen
    pub private: bool,
    /// Final byte
    pub action: u8,
}

impl CsiSequence {
    /// Parameter by index, zero when omitted
    pub fn param(&self, index: usize) -> u16 {
        self.params.get(index).copied().unwrap_or(0)
    }

    /// Parameter by index with zero mapped to `default`
    pub fn param_or(&self, index: usize, default: u16) -> u16 {
        match self.param(index) {
            0 => default,
            n => n,
        }
    }
}

/// What a fed byte amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Byte absorbed (sequence in progress or discarded)
    None,
    /// Printable byte to draw
    Print(u8),
    /// C0 control or other non-printable byte outside a sequence
    Control(u8),
    /// CSI sequence completed
    Csi(CsiSequence),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    /// Plain text
    Ground,
    /// Got ESC, waiting for the introducer
    EscapeSeen,
    /// Collecting CSI parameters until a final byte
    CsiParams,
}

/// Byte-at-a-time escape sequence parser
#[derive(Debug, Clone)]
pub struct EscapeParser {
    phase: Phase,
    seq: CsiSequence,
}

impl Default for EscapeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EscapeParser {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Ground,
            seq: CsiSequence {
                params: [0; MAX_PARAMS],
                count: 0,
                private: false,
                action: 0,
            },
        }
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        self.phase = Phase::Ground;
        self.seq = CsiSequence::default();
    }

    /// Check if a sequence is in progress
    pub fn in_sequence(&self) -> bool {
        self.phase != Phase::Ground
    }

    /// Feed a single byte
    pub fn feed(&mut self, byte: u8) -> Action {
        match self.phase {
            Phase::Ground => match byte {
                c0::ESC => {
                    self.phase = Phase::EscapeSeen;
                    Action::None
                }
                0x20..=0x7E => Action::Print(byte),
                _ => Action::Control(byte),
            },
            Phase::EscapeSeen => {
                if byte == b'[' {
                    self.seq = CsiSequence::default();
                    self.phase = Phase::CsiParams;
                } else {
                    // Other Fe introducers (N.._) and stray bytes end here
                    trace!("escape: discard introducer {=u8:#x}", byte);
                    self.reset();
                }
                Action::None
            }
            Phase::CsiParams => self.collect(byte),
        }
    }

    fn collect(&mut self, byte: u8) -> Action {
        match byte {
            b'0'..=b'9' => {
                if let Some(slot) = self.seq.params.get_mut(self.seq.count) {
                    *slot = slot.saturating_mul(10).saturating_add(u16::from(byte - b'0'));
                }
                Action::None
            }
            b';' => {
                if self.seq.count < MAX_PARAMS {
                    self.seq.count += 1;
                }
                Action::None
            }
            b'?' => {
                self.seq.private = true;
                Action::None
            }
            0x40..=0x7D => {
                self.seq.action = byte;
                let seq = self.seq;
                self.reset();
                Action::Csi(seq)
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut EscapeParser, bytes: &[u8]) -> Action {
        let mut last = Action::None;
        for &b in bytes {
            last = parser.feed(b);
        }
        last
    }

    #[test]
    fn test_printable_and_controls() {
        let mut parser = EscapeParser::new();
        assert_eq!(parser.feed(b'A'), Action::Print(b'A'));
        assert_eq!(parser.feed(c0::LF), Action::Control(c0::LF));
        assert_eq!(parser.feed(c0::DEL), Action::Control(c0::DEL));
        assert_eq!(parser.feed(0x9B), Action::Control(0x9B));
    }

    #[test]
    fn test_csi_with_params() {
        let mut parser = EscapeParser::new();
        let action = feed_all(&mut parser, b"\x1b[12;40H");
        let Action::Csi(seq) = action else {
            panic!("expected CSI, got {:?}", action);
        };
        assert_eq!(seq.action, b'H');
        assert_eq!(seq.param(0), 12);
        assert_eq!(seq.param(1), 40);
        assert_eq!(seq.count, 1);
        assert!(!seq.private);
        assert!(!parser.in_sequence());
    }

    #[test]
    fn test_private_flag() {
        let mut parser = EscapeParser::new();
        let Action::Csi(seq) = feed_all(&mut parser, b"\x1b[?25l") else {
            panic!("expected CSI");
        };
        assert!(seq.private);
        assert_eq!(seq.param(0), 25);
        assert_eq!(seq.action, b'l');
    }

    #[test]
    fn test_extra_params_ignored() {
        let mut parser = EscapeParser::new();
        let Action::Csi(seq) = feed_all(&mut parser, b"\x1b[1;2;3;4;5;6;7m") else {
            panic!("expected CSI");
        };
        assert_eq!(seq.params, [1, 2, 3, 4, 5]);
        assert_eq!(seq.count, MAX_PARAMS);
    }

    #[test]
    fn test_huge_parameter_saturates() {
        let mut parser = EscapeParser::new();
        let Action::Csi(seq) = feed_all(&mut parser, b"\x1b[99999999A") else {
            panic!("expected CSI");
        };
        assert_eq!(seq.param(0), u16::MAX);
    }

    #[test]
    fn test_other_introducer_discarded() {
        let mut parser = EscapeParser::new();
        assert_eq!(feed_all(&mut parser, b"\x1bP"), Action::None);
        assert!(!parser.in_sequence());
        assert_eq!(parser.feed(b'x'), Action::Print(b'x'));

        assert_eq!(feed_all(&mut parser, b"\x1b7"), Action::None);
        assert_eq!(parser.feed(b'y'), Action::Print(b'y'));
    }

    #[test]
    fn test_junk_inside_sequence_ignored() {
        let mut parser = EscapeParser::new();
        let Action::Csi(seq) = feed_all(&mut parser, b"\x1b[3 \x01\x7e2J") else {
            panic!("expected CSI");
        };
        assert_eq!(seq.param(0), 32);
        assert_eq!(seq.action, b'J');
    }

    #[test]
    fn test_param_or_default() {
        let seq = CsiSequence::default();
        assert_eq!(seq.param_or(0, 1), 1);
        assert_eq!(seq.param(9), 0);
    }
}
