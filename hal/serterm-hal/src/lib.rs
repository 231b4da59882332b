//! serterm Hardware Abstraction Layer
//!
//! This crate defines the seams between the terminal logic and the
//! hardware it runs on. The terminal core only ever talks to these traits,
//! so the same logic runs against real peripherals or host-side fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  serterm-core (interpreter, console)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serterm-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!      ┌──────────────┼──────────────┐
//!      ▼              ▼              ▼
//! ┌──────────┐  ┌───────────┐  ┌──────────┐
//! │   UART   │  │ USB host  │  │  buzzer  │
//! └──────────┘  └───────────┘  └──────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::SerialPort`] - Non-blocking transmit and line reconfiguration
//! - [`hid::KeyboardHost`] - Boot-protocol keyboard reports and LEDs
//! - [`beeper::Bell`] - Audible bell, with a GPIO [`beeper::Beeper`] driver

#![no_std]
#![deny(unsafe_code)]

pub mod beeper;
pub mod hid;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use beeper::{Beeper, Bell};
pub use hid::{KeyboardHost, KeyboardReport, Modifiers};
pub use uart::{BaudRate, Framing, SerialConfig, SerialPort};
