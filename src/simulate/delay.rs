//! Artificial response delay.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::SimulationError;
use crate::observability::metrics;

/// Ceiling applied to every requested delay unless configured otherwise.
pub const DEFAULT_MAX_DELAY_SECS: u64 = 30;

/// Confirmation returned once the delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayResponse {
    /// Seconds actually waited, after clamping.
    pub delay: u64,
    pub method: String,
    pub url: String,
}

/// Suspends the calling task for `min(requested, max_secs)` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySimulator {
    max_secs: u64,
}

impl DelaySimulator {
    pub fn new(max_secs: u64) -> Self {
        Self { max_secs }
    }

    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Validate a requested delay and clamp it to the ceiling.
    pub fn effective_delay(&self, requested: &str) -> Result<u64, SimulationError> {
        let invalid = || SimulationError::InvalidDelay {
            input: requested.to_string(),
        };
        let secs: i64 = requested.parse().map_err(|_| invalid())?;
        let secs = u64::try_from(secs).map_err(|_| invalid())?;
        Ok(secs.min(self.max_secs))
    }

    /// Wait out the requested delay, then confirm it.
    ///
    /// Invalid input returns immediately without sleeping. Only the calling
    /// task is suspended; no lock is held while waiting.
    pub async fn delay(
        &self,
        requested: &str,
        method: &str,
        url: &str,
    ) -> Result<DelayResponse, SimulationError> {
        let secs = self.effective_delay(requested)?;

        tracing::debug!(requested = %requested, effective_secs = secs, "Simulating delay");
        if secs > 0 {
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
        metrics::record_simulated_delay(secs);

        Ok(DelayResponse {
            delay: secs,
            method: method.to_string(),
            url: url.to_string(),
        })
    }
}

impl Default for DelaySimulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELAY_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn effective_delay_is_clamped() {
        let sim = DelaySimulator::default();
        assert_eq!(sim.effective_delay("0"), Ok(0));
        assert_eq!(sim.effective_delay("5"), Ok(5));
        assert_eq!(sim.effective_delay("30"), Ok(30));
        assert_eq!(sim.effective_delay("31"), Ok(30));
        assert_eq!(sim.effective_delay("100000"), Ok(30));
    }

    #[test]
    fn custom_ceiling() {
        let sim = DelaySimulator::new(2);
        assert_eq!(sim.effective_delay("10"), Ok(2));
        assert_eq!(sim.max_secs(), 2);
    }

    #[test]
    fn invalid_delays_are_rejected() {
        let sim = DelaySimulator::default();
        for input in ["-1", "abc", "", "1.5", " 1", "99999999999999999999"] {
            assert_eq!(
                sim.effective_delay(input),
                Err(SimulationError::InvalidDelay {
                    input: input.to_string()
                }),
                "input {input:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn zero_delay_returns_immediately() {
        let sim = DelaySimulator::default();
        let start = Instant::now();
        let resp = sim.delay("0", "GET", "/delay/0").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(
            resp,
            DelayResponse {
                delay: 0,
                method: "GET".into(),
                url: "/delay/0".into(),
            }
        );
    }

    #[tokio::test]
    async fn one_second_delay() {
        let sim = DelaySimulator::default();
        let start = Instant::now();
        let resp = sim.delay("1", "GET", "/delay/1").await.unwrap();
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(900) && elapsed <= Duration::from_millis(1200),
            "took {elapsed:?}"
        );
        assert_eq!(resp.delay, 1);
    }

    #[tokio::test]
    async fn invalid_input_does_not_block() {
        let sim = DelaySimulator::default();
        let start = Instant::now();
        assert!(sim.delay("-1", "GET", "/delay/-1").await.is_err());
        assert!(sim.delay("abc", "GET", "/delay/abc").await.is_err());
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
