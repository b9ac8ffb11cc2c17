//! Logging integration.
//!
//! Rove instruments itself with the `tracing` crate. Install any subscriber
//! in the host application to see logs:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Filtering by subsystem uses the target constants in [`targets`], e.g.
//! `RUST_LOG=rove::rover=trace` to watch activation transitions only.

/// Target names for log filtering.
pub mod targets {
    /// Core types: keybinding parsing and matching.
    pub const CORE: &str = "rove_core";
    /// Roving group manager: registration, teardown, listener lifecycle.
    pub const ROVER: &str = "rove::rover";
    /// Event dispatch: navigation, shortcut matching, focus tracking.
    pub const DISPATCH: &str = "rove::dispatch";
}

/// Trace-level log with the manager target.
#[macro_export]
macro_rules! rove_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "rove::rover", $($arg)*)
    };
}

/// Debug-level log with the manager target.
#[macro_export]
macro_rules! rove_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "rove::rover", $($arg)*)
    };
}

/// Warn-level log with the manager target.
#[macro_export]
macro_rules! rove_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "rove::rover", $($arg)*)
    };
}
