//! Keanu: generic, dynamically-sized matrices.
//!
//! The matrix types themselves live in [`linalg`] (the `keanu-linalg` crate), which has no I/O,
//! no global state and no threads. This crate adds the pieces an application needs around it:
//! logger setup, environment-based configuration and timing helpers.
//!
//! # Environment Variables
//!
//! * `KEANU_ORDER`: The storage order applications should prefer for matrices they create (see
//!   [`config::preferred_order`]). Allowed values are `row-major` (the default) and
//!   `column-major`. Library constructors are not affected.
//! * `RUST_LOG`: Overrides the log filter set up by [`init_logger!`].

use log::LevelFilter;

pub use keanu_linalg as linalg;

pub mod config;
pub mod timer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .filter(Some("keanu_linalg"), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and Keanu will log at *debug* level, unless overridden by `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_logger_twice() {
        crate::init_logger!();
        crate::init_logger!();
        log::debug!("logger initialized");
    }
}
