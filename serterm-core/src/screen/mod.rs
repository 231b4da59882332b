//! Character-grid screen model
//!
//! The screen is a fixed grid of [`Glyph`]s handed as-is to the video
//! scan-out. The last row can be reserved for a status line that never
//! scrolls.

pub mod buffer;
pub mod cursor;
pub mod glyph;

pub use buffer::*;
pub use cursor::*;
pub use glyph::*;
