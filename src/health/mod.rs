//! Service health subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     HealthRegistry::new → overall ("") + primary service SERVING
//!
//! Queries:
//!     gRPC Check/Watch (grpc.rs) → registry.rs
//!     HTTP /ready (http::handlers) → registry.rs
//!
//! Shutdown (lifecycle::Shutdown):
//!     registry.shutdown() → every entry NOT_SERVING, terminal
//! ```
//!
//! # Design Decisions
//! - One explicitly owned registry, shared by `Arc`; no global instance
//! - The registry reads unregistered names as UNKNOWN; gRPC Check maps them
//!   to NOT_FOUND and Watch to SERVICE_UNKNOWN
//! - Watchers are fed from a broadcast channel rather than polling

pub mod grpc;
pub mod registry;

pub use grpc::HealthService;
pub use registry::{HealthRegistry, ServingStatus, StatusUpdate, DEFAULT_SERVICE, OVERALL_SERVICE};
