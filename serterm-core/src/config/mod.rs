//! Configuration
//!
//! Build-time geometry and the volatile runtime settings edited from the
//! configuration surface. Nothing here survives a restart.

pub mod geometry;
pub mod settings;

pub use geometry::*;
pub use settings::*;
