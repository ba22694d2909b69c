//! Configuration module for step-ticker.
//!
//! Provides the timing configuration (timer input clock, tick frequency,
//! pulse width) loadable from TOML files (with `std` feature) or pre-parsed
//! data.

#[cfg(feature = "std")]
mod loader;
mod timing;
mod validation;

pub use timing::TimingConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
