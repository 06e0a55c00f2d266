//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges, histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields, not interpolated strings
//! - Request ID is attached to every HTTP request and response
//! - Metric calls are no-ops until a recorder is installed, so tests need no setup

pub mod logging;
pub mod metrics;
