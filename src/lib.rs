//! Request echo and service-health simulator.
//!
//! Reflects inbound requests back as structured JSON, simulates delays and
//! arbitrary status codes, and keeps a per-service health table served over
//! the standard gRPC health protocol.

// Core
pub mod echo;
pub mod health;
pub mod simulate;

// Transport
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::EchoConfig;
pub use health::HealthRegistry;
pub use http::HttpServer;
pub use lifecycle::{RunningServer, Shutdown};
