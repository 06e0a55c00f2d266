//! Response simulation primitives.
//!
//! # Components
//! - delay.rs: suspend the calling task for a bounded number of seconds
//! - status.rs: validate an arbitrary status code for the adapter to emit
//! - error.rs: invalid-input errors shared by both
//!
//! # Design Decisions
//! - Input is validated before any side effect (no sleeping on bad input)
//! - The delay ceiling is unconditional; it bounds latency for every caller
//! - Neither simulator touches shared state

pub mod delay;
pub mod error;
pub mod status;

pub use delay::{DelayResponse, DelaySimulator, DEFAULT_MAX_DELAY_SECS};
pub use error::SimulationError;
pub use status::SimulatedStatus;
