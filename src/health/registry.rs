//! Per-service serving status table.
//!
//! # State Machine
//! ```text
//! (unregistered) UNKNOWN → SERVING ⇄ NOT_SERVING
//! shutdown(): every entry → NOT_SERVING, further writes ignored
//! ```
//!
//! # Concurrency
//! - `RwLock` so health probes read in parallel; writes are exclusive
//! - Shutdown flips every entry inside one write-lock critical section, so a
//!   reader sees either the old value or NOT_SERVING
//! - Updates are published to watchers while the write lock is held, which
//!   keeps their order identical to the table's
//! - The lock is never held across an `.await`

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::observability::metrics;

/// Name of the entry describing the whole process.
pub const OVERALL_SERVICE: &str = "";

/// Primary service registered at construction unless configured otherwise.
pub const DEFAULT_SERVICE: &str = "echo.v1.Echo";

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Serving status of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Unknown,
    Serving,
    NotServing,
}

/// An applied status change, as seen by watchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub service: String,
    pub status: ServingStatus,
}

#[derive(Debug, Default)]
struct Table {
    services: HashMap<String, ServingStatus>,
    shut_down: bool,
}

/// Shared registry of serving statuses.
///
/// Construct once at startup and hand out behind an `Arc`.
#[derive(Debug)]
pub struct HealthRegistry {
    table: RwLock<Table>,
    updates: broadcast::Sender<StatusUpdate>,
}

impl HealthRegistry {
    /// Create a registry with the overall entry and `primary_service` both
    /// SERVING.
    pub fn new(primary_service: &str) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let registry = Self {
            table: RwLock::new(Table::default()),
            updates,
        };
        registry.set_status(OVERALL_SERVICE, ServingStatus::Serving);
        registry.set_status(primary_service, ServingStatus::Serving);
        registry
    }

    /// Insert or update the status of `service`.
    ///
    /// Returns `false` (and changes nothing) once the registry has shut down.
    pub fn set_status(&self, service: &str, status: ServingStatus) -> bool {
        let mut table = self.write();
        if table.shut_down {
            tracing::warn!(service = %service, status = ?status, "Ignoring status change after shutdown");
            return false;
        }

        let previous = table.services.insert(service.to_string(), status);
        self.publish(service, status);
        drop(table);

        if previous != Some(status) {
            tracing::info!(service = %service, status = ?status, "Serving status changed");
        }
        true
    }

    /// Current status of `service`, or `None` if it was never registered.
    pub fn lookup(&self, service: &str) -> Option<ServingStatus> {
        self.read().services.get(service).copied()
    }

    /// Current status of `service`, UNKNOWN if it was never registered.
    pub fn get_status(&self, service: &str) -> ServingStatus {
        self.lookup(service).unwrap_or(ServingStatus::Unknown)
    }

    /// Whether the overall entry reports SERVING.
    pub fn is_serving(&self) -> bool {
        self.get_status(OVERALL_SERVICE) == ServingStatus::Serving
    }

    /// Move every registered service to NOT_SERVING. Terminal and idempotent.
    pub fn shutdown(&self) {
        let mut table = self.write();
        if table.shut_down {
            return;
        }
        table.shut_down = true;

        let names: Vec<String> = table.services.keys().cloned().collect();
        for name in &names {
            table.services.insert(name.clone(), ServingStatus::NotServing);
            self.publish(name, ServingStatus::NotServing);
        }
        drop(table);

        tracing::info!(services = names.len(), "Health registry shut down, all services NOT_SERVING");
    }

    pub fn is_shut_down(&self) -> bool {
        self.read().shut_down
    }

    /// Copy of every entry, ordered by name.
    pub fn snapshot(&self) -> BTreeMap<String, ServingStatus> {
        self.read()
            .services
            .iter()
            .map(|(name, status)| (name.clone(), *status))
            .collect()
    }

    /// Receive every status change applied from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusUpdate> {
        self.updates.subscribe()
    }

    fn publish(&self, service: &str, status: ServingStatus) {
        metrics::record_health_status(service, status);
        // No receivers is fine: nobody is watching yet.
        let _ = self.updates.send(StatusUpdate {
            service: service.to_string(),
            status,
        });
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}
