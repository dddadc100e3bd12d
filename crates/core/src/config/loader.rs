use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// A missing file is not an error: the original deployment ran with no
/// config at all, driven purely by environment and defaults. Nested keys use
/// a double underscore, e.g. `BINDERY_CONVERTER__TIMEOUT_SECS=60`. The
/// legacy `CALIBRE_LIBRARY_PATH` variable still designates the library
/// directory and wins over the file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    let mut config: Config = figment
        .merge(Env::prefixed("BINDERY_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if let Ok(library_path) = std::env::var("CALIBRE_LIBRARY_PATH") {
        config.converter.library_dir = PathBuf::from(library_path);
    }

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
