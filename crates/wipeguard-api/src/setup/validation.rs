//! Configuration validation
//!
//! Checks the values the server depends on at runtime, on top of the parsing-time checks done
//! by [`Config::from_env`].

use anyhow::Result;
use wipeguard_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - \
            set specific allowed origins via the CORS_ORIGINS environment variable."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.max_file_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max file size cannot be 0"));
    }

    if !matches!(config.log_format(), "compact" | "json") {
        return Err(anyhow::anyhow!(
            "LOG_FORMAT must be 'compact' or 'json', got '{}'",
            config.log_format()
        ));
    }

    Ok(())
}
