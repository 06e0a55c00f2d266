//! Invalid-input errors for the simulators.

use thiserror::Error;

/// Client-side input errors. Terminal for the request, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Delay was not a non-negative integer.
    #[error("Invalid delay value")]
    InvalidDelay { input: String },

    /// Status code was not an integer in `100..=599`.
    #[error("Invalid status code")]
    InvalidStatus { input: String },
}

impl SimulationError {
    /// The raw value the caller supplied.
    pub fn input(&self) -> &str {
        match self {
            SimulationError::InvalidDelay { input } | SimulationError::InvalidStatus { input } => input,
        }
    }
}
