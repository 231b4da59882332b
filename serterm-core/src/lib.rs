//! Board-agnostic core logic for the serterm serial terminal
//!
//! This crate contains everything that does not depend on specific
//! hardware:
//!
//! - Lock-free single-producer/single-consumer ring buffers
//! - Character-grid screen buffer with cursor overlay and status row
//! - ANSI/VT100 escape sequence interpreter
//! - USB keyboard report decoding with caps lock and auto-repeat
//! - Mode routing (online, local loopback, configuration)
//! - The cooperative poll loop tying it all together
//!
//! Data flow per poll iteration:
//!
//! ```text
//! UART IRQ ──► RX ring ──► Terminal ──► ScreenBuffer
//! USB host ──► KeyboardInput ──► key ring ──► ModeController ─┬─► TX ring ──► UART
//!                                                             ├─► Terminal (local)
//!                                                             └─► ConfigSurface
//! ```

#![no_std]
#![deny(unsafe_code)]

// Must come first so the other modules see its macros
#[macro_use]
mod fmt;

pub mod config;
pub mod console;
pub mod keyboard;
pub mod mode;
pub mod ring;
pub mod screen;
pub mod status;
pub mod terminal;

pub use config::Settings;
pub use console::Console;
pub use keyboard::{KeyToken, KeyboardInput};
pub use mode::{ConfigSurface, Mode, ModeController};
pub use ring::RingBuffer;
pub use screen::{Color, Glyph, ScreenBuffer};
pub use terminal::Terminal;
