//! Shutdown coordination.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::health::HealthRegistry;

/// Coordinator for graceful shutdown.
///
/// Triggering marks every service NOT_SERVING, then notifies all subscribed
/// server tasks so they stop accepting and drain.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    registry: Arc<HealthRegistry>,
}

impl Shutdown {
    pub fn new(registry: Arc<HealthRegistry>) -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx, registry }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Flip health to NOT_SERVING and notify every subscriber.
    pub fn trigger(&self) {
        self.registry.shutdown();
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::info!(tasks = notified, "Shutdown triggered");
    }

    pub fn is_triggered(&self) -> bool {
        self.registry.is_shut_down()
    }

    /// Number of tasks still listening for shutdown.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ServingStatus;

    #[tokio::test]
    async fn trigger_flips_health_then_notifies() {
        let registry = Arc::new(HealthRegistry::default());
        let shutdown = Shutdown::new(Arc::clone(&registry));
        let mut rx = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 1);
        assert!(!shutdown.is_triggered());

        shutdown.trigger();

        rx.recv().await.unwrap();
        assert!(shutdown.is_triggered());
        assert_eq!(registry.get_status(""), ServingStatus::NotServing);
    }

    #[test]
    fn trigger_without_subscribers() {
        let shutdown = Shutdown::new(Arc::new(HealthRegistry::default()));
        shutdown.trigger();
        assert!(shutdown.is_triggered());
    }
}
