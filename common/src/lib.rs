//! Shared building blocks for `geotrace`.
//!
//! * **[`config`]**: runtime settings built once by the front end.
//! * **[`network`]**: target parsing and normalization.
//!
//! The logging macros exported here ([`success!`], [`info!`], [`warn!`], [`error!`])
//! are thin wrappers over `tracing` so every crate reports through the same subscriber.

pub mod config;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;

/// Target used for events that mark a successful step.
pub const SUCCESS_TARGET: &str = "geotrace::success";

/// Target used for plain, unprefixed output lines.
pub const PRINT_TARGET: &str = "geotrace::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "geotrace::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}
