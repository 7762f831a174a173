#![forbid(unsafe_code)]

//! Packer diagnostics.
//!
//! The row packer reports row closes at debug level, wraps each pack in a
//! debug span, and warns when a row height had to be clamped. With the
//! `tracing` feature those calls go to `tracing`; without it they compile
//! to nothing and the span is a [`SilentSpan`].

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, warn};

#[cfg(not(feature = "tracing"))]
mod silent {
    /// Discards a row-level debug event.
    #[macro_export]
    macro_rules! debug {
        ($($event:tt)*) => {};
    }

    /// Discards a clamp warning.
    #[macro_export]
    macro_rules! warn {
        ($($event:tt)*) => {};
    }

    /// Stands in for the per-pack span.
    #[macro_export]
    macro_rules! debug_span {
        ($($fields:tt)*) => {
            $crate::logging::SilentSpan
        };
    }
}

/// Span returned by `debug_span!` when tracing is off.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpan;

#[cfg(not(feature = "tracing"))]
impl SilentSpan {
    pub fn enter(&self) -> SilentSpan {
        *self
    }
}
