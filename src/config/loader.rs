//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{BridgeConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the configuration.
///
/// The environment and then `bind_address` are applied before validation.
pub fn load_config(
    path: Option<&Path>,
    bind_address: Option<String>,
) -> Result<BridgeConfig, ConfigError> {
    let mut config = read_config(path)?;
    if let Some(bind_address) = bind_address {
        config.listener.bind_address = bind_address;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read the TOML file, or start from defaults without one, then overlay the
/// environment. The result is not validated yet.
pub fn read_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    let mut config: BridgeConfig = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => BridgeConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overlay environment variables onto the configuration.
///
/// - the variable named by `upstream.token_env` replaces the inline token
/// - `ENVIRONMENT=production` switches logs to JSON
pub fn apply_env<F>(config: &mut BridgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(&config.upstream.token_env) {
        config.upstream.token = Some(token.trim().to_string());
    }

    let production = lookup("ENVIRONMENT")
        .map(|env| env.eq_ignore_ascii_case("production"))
        .unwrap_or(false);
    if production {
        config.observability.log_format = LogFormat::Json;
    }
}
