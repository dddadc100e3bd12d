use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Converter timeout is not 0
/// - Library directory is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.converter.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "converter.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.converter.library_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.library_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
