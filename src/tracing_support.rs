//! Tracing support for graph operations.
//!
//! With the `tracing` feature enabled, the span and event macros used inside
//! the crate are `tracing`'s own.  When it's disabled, no-op replacements with
//! the same call syntax are provided instead.

#[cfg(feature = "tracing")]
mod enabled {
    use std::sync::Once;

    /// Installs a `fmt` subscriber that writes through the test harness's
    /// captured output.  Only the first call has an effect, and an already
    /// installed global subscriber is left in place.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(tracing::Level::DEBUG)
                .try_init();
        });
    }
}

#[cfg(feature = "tracing")]
pub use enabled::init_tracing;

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, debug_span, info_span};

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {
    // No-op when tracing is disabled
}

#[cfg(not(feature = "tracing"))]
macro_rules! info_span {
    ($name:expr) => {{ $crate::tracing_support::NoOpSpan }};
    ($name:expr, $($fields:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_span {
    ($name:expr) => {{ $crate::tracing_support::NoOpSpan }};
    ($name:expr, $($fields:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($args:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use debug_span;
#[cfg(not(feature = "tracing"))]
pub(crate) use info_span;

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
pub struct NoOpSpan;

#[cfg(not(feature = "tracing"))]
impl NoOpSpan {
    pub fn entered(self) -> NoOpSpanGuard {
        NoOpSpanGuard
    }
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
pub struct NoOpSpanGuard;
