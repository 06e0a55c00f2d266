//! Arbitrary status-code emission.

use std::str::FromStr;

use super::error::SimulationError;

/// A status code the caller asked to receive, guaranteed to lie in
/// `100..=599`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedStatus(u16);

impl SimulatedStatus {
    pub const MIN: u16 = 100;
    pub const MAX: u16 = 599;

    pub fn code(self) -> u16 {
        self.0
    }

    /// Whether the code lies in `100..=199`.
    pub fn is_informational(self) -> bool {
        self.0 < 200
    }
}

impl FromStr for SimulatedStatus {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .and_then(|code| u16::try_from(code).ok())
            .filter(|code| (Self::MIN..=Self::MAX).contains(code))
            .map(SimulatedStatus)
            .ok_or_else(|| SimulationError::InvalidStatus {
                input: s.to_string(),
            })
    }
}
