//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults for missing fields)
//!     → ConfigOverrides (HOST / PORT / GRPC_PORT env, CLI flags)
//!     → validation.rs (semantic checks)
//!     → EchoConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the service runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError, ConfigOverrides};
pub use schema::{
    DelayConfig, EchoConfig, GrpcConfig, HealthConfig, LimitsConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
