#![forbid(unsafe_code)]

//! Core: aspect ratios, pixel geometry, frame chrome, and logging shims.
//!
//! Everything here is plain data shared by the layout solver and the
//! gallery runtime. Nothing in this crate performs I/O.

pub mod geometry;
pub mod logging;
pub mod ratio;

pub use geometry::{Dimensions, FrameChrome, PixelBox};
pub use ratio::AspectRatio;

// Same paths as the exported no-op macros.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, warn};
