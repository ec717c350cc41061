//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{AllowlistConfig, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the configured host suffix allowlist.
pub const ENV_ALLOWED_SUFFIXES: &str = "ALLOWED_HOST_SUFFIXES";

/// Environment variable overriding the configured bind address.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration.
///
/// With no path, starts from defaults. Environment overrides
/// (`ALLOWED_HOST_SUFFIXES`, `BIND_ADDRESS`) are applied after the file is
/// parsed and before validation runs.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut ServiceConfig) {
    if let Ok(raw) = std::env::var(ENV_ALLOWED_SUFFIXES) {
        config.allowlist = AllowlistConfig::from_suffix_list(&raw);
    }
    if let Ok(addr) = std::env::var(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
}
