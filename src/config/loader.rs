//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::EchoConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

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

/// Values that take precedence over the config file, typically sourced from
/// CLI flags or `HOST` / `PORT` / `GRPC_PORT` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub grpc_port: Option<u16>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Apply every set override to `config`.
    pub fn apply(&self, config: &mut EchoConfig) {
        if self.host.is_some() || self.port.is_some() {
            config.listener.bind_address =
                replace_host_port(&config.listener.bind_address, self.host.as_deref(), self.port);
        }
        if self.host.is_some() || self.grpc_port.is_some() {
            config.grpc.bind_address =
                replace_host_port(&config.grpc.bind_address, self.host.as_deref(), self.grpc_port);
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Rebuild `host:port`, keeping whichever half is not overridden.
fn replace_host_port(addr: &str, host: Option<&str>, port: Option<u16>) -> String {
    let (current_host, current_port) = addr.rsplit_once(':').unwrap_or((addr, ""));
    let host = host.unwrap_or(current_host);
    match port {
        Some(port) => format!("{host}:{port}"),
        None => format!("{host}:{current_port}"),
    }
}

/// Parse a TOML file into a configuration without validating it.
fn read_config(path: &Path) -> Result<EchoConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EchoConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration: file (or defaults), then overrides,
/// then validation.
pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<EchoConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => EchoConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
