//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → HealthRegistry → bind listeners → spawn servers
//!
//! Shutdown (shutdown.rs):
//!     Signal received → registry NOT_SERVING → stop accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Listeners bind before any server task starts; bind errors are fatal
//! - Health flips to NOT_SERVING before listeners stop, so orchestrators
//!   stop routing traffic while in-flight requests drain

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
pub use startup::{start, RunningServer, ServerError};
