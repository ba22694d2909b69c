//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::TimingConfig;

/// Load timing configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// configuration fails validation.
///
/// # Example
///
/// ```rust,ignore
/// use step_ticker::load_config;
///
/// let config = load_config("ticker.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TimingConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse timing configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<TimingConfig> {
    let config: TimingConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}
