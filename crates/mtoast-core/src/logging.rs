#![forbid(unsafe_code)]

//! Lifecycle logging.
//!
//! Toast code logs through `mtoast_core::{trace, debug, info, warn}`. With
//! the `tracing` feature these are the `tracing` macros. Without it they
//! expand to nothing, arguments included, so field expressions cost nothing.
//!
//! Spans are not wrapped here: instrumented call sites open them with
//! `#[cfg(feature = "tracing")] let _span = tracing::debug_span!(..).entered();`.
//!
//! | Level | Used for |
//! |-------|----------|
//! | `trace` | Pause and resume of a countdown |
//! | `debug` | Show, dismiss, eviction, container reuse, config changes |
//! | `info` | Manager teardown |
//! | `warn` | A subscriber panicked during emission |

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discards a trace-level record.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards a debug-level record.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards an info-level record.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Discards a warn-level record.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
