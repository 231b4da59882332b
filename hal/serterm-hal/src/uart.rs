//! UART serial line abstractions
//!
//! The host link is a plain asynchronous byte stream: one start bit, the
//! selected data/parity combination, one stop bit, no flow control.
//! Reception is interrupt driven and lands in a ring buffer owned by the
//! core; transmission is drained from the poll loop one byte at a time
//! through [`SerialPort`].

use core::fmt;

/// Serial port used for the host link
///
/// Transmit goes through [`embedded_io::Write`], gated by
/// [`embedded_io::WriteReady`] so the poll loop never blocks on a busy
/// transmitter.
pub trait SerialPort: embedded_io::Write + embedded_io::WriteReady {
    /// Apply a new line configuration
    ///
    /// Called from the poll loop when the operator leaves the configuration
    /// surface with a changed baud rate or framing.
    fn reconfigure(&mut self, config: SerialConfig) -> Result<(), Self::Error>;
}

/// Supported baud rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    B9600,
    B19200,
    B38400,
    B57600,
    #[default]
    B115200,
}

impl BaudRate {
    /// All selectable rates, slowest first
    pub const ALL: [BaudRate; 5] = [
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
    ];

    /// Bits per second
    pub const fn bps(self) -> u32 {
        match self {
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115200,
        }
    }

    /// Look up a rate from its bits-per-second value
    pub fn from_bps(bps: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|rate| rate.bps() == bps)
    }

    /// Next rate in the list, wrapping to the slowest
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bps())
    }
}

/// Character framing (data bits, parity, stop bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Framing {
    /// 8 data bits, no parity, 1 stop bit
    #[default]
    EightNone,
    /// 7 data bits, even parity, 1 stop bit
    SevenEven,
    /// 7 data bits, odd parity, 1 stop bit
    SevenOdd,
}

impl Framing {
    /// All selectable framings
    pub const ALL: [Framing; 3] = [Framing::EightNone, Framing::SevenEven, Framing::SevenOdd];

    pub const fn data_bits(self) -> DataBits {
        match self {
            Framing::EightNone => DataBits::Eight,
            Framing::SevenEven | Framing::SevenOdd => DataBits::Seven,
        }
    }

    pub const fn parity(self) -> Parity {
        match self {
            Framing::EightNone => Parity::None,
            Framing::SevenEven => Parity::Even,
            Framing::SevenOdd => Parity::Odd,
        }
    }

    /// Always one stop bit
    pub const fn stop_bits(self) -> StopBits {
        StopBits::One
    }

    /// Conventional short name, e.g. "8N1"
    pub const fn label(self) -> &'static str {
        match self {
            Framing::EightNone => "8N1",
            Framing::SevenEven => "7E1",
            Framing::SevenOdd => "7O1",
        }
    }

    /// Next framing in the list, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serial line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate
    pub baud: BaudRate,
    /// Data bits, parity and stop bits
    pub framing: Framing,
}

impl SerialConfig {
    pub const fn new(baud: BaudRate, framing: Framing) -> Self {
        Self { baud, framing }
    }
}

impl fmt::Display for SerialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.baud, self.framing)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
}
