//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and do not collide
//! - Validate value ranges (timeouts > delay ceiling, limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EchoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::EchoConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("listener and gRPC bind to the same address {0}")]
    AddressConflict(String),

    #[error("timeouts.request_secs ({request_secs}) must exceed delay.max_secs ({max_delay_secs})")]
    TimeoutTooShort { request_secs: u64, max_delay_secs: u64 },

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("health.service_name must not be empty (the empty name is the overall status)")]
    EmptyServiceName,

    #[error("observability.log_level is not a valid level: {0:?}")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let http_addr = check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);

    if config.grpc.enabled {
        let grpc_addr = check_address(&mut errors, "grpc.bind_address", &config.grpc.bind_address);
        if let (Some(http), Some(grpc)) = (http_addr, grpc_addr) {
            if http == grpc && http.port() != 0 {
                errors.push(ValidationError::AddressConflict(http.to_string()));
            }
        }
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_secs <= config.delay.max_secs {
        errors.push(ValidationError::TimeoutTooShort {
            request_secs: config.timeouts.request_secs,
            max_delay_secs: config.delay.max_secs,
        });
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.health.service_name.is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: &str,
) -> Option<SocketAddr> {
    match value.parse() {
        Ok(addr) => Some(addr),
        Err(_) => {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}
