use crate::error::ConfigError;
use std::collections::HashSet;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Paths};

/// Loads the application configuration from the given TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and validates it before returning.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Checks the cross-field invariants the type system cannot express.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.reference_ticker.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "reference_ticker must not be empty".to_string(),
        ));
    }

    if config.min_percentile > 100 {
        return Err(ConfigError::ValidationError(format!(
            "min_percentile must be within 0..=100, got {}",
            config.min_percentile
        )));
    }

    if config.days_per_quarter == 0 {
        return Err(ConfigError::ValidationError(
            "days_per_quarter must be at least 1".to_string(),
        ));
    }

    if config.offsets.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one offset must be configured".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for offset in config.offsets.iter() {
        if !names.insert(offset.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate offset name '{}'",
                offset.name
            )));
        }
    }

    let zero_bar_offsets = config.offsets.iter().filter(|o| o.bars == 0).count();
    if zero_bar_offsets != 1 {
        return Err(ConfigError::ValidationError(format!(
            "exactly one zero-bar (current) offset is required, found {zero_bar_offsets}"
        )));
    }

    Ok(())
}
