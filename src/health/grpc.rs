//! `grpc.health.v1.Health` over the [`HealthRegistry`].
//!
//! Implements the standard gRPC health checking protocol.
//! See: https://github.com/grpc/grpc/blob/master/doc/health-checking.md

use std::pin::Pin;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::{ReceiverStream, TcpListenerStream};
use tokio_stream::Stream;
use tonic::{Request, Response, Status};
use tonic_health::pb::health_check_response::ServingStatus as ProtoStatus;
use tonic_health::pb::health_server::{Health, HealthServer};
use tonic_health::pb::{HealthCheckRequest, HealthCheckResponse};

use super::registry::{HealthRegistry, ServingStatus};

const WATCH_BUFFER: usize = 4;

/// Health service answering from the shared registry.
#[derive(Debug, Clone)]
pub struct HealthService {
    registry: Arc<HealthRegistry>,
}

impl HealthService {
    pub fn new(registry: Arc<HealthRegistry>) -> Self {
        Self { registry }
    }

    pub fn into_server(self) -> HealthServer<Self> {
        HealthServer::new(self)
    }
}

fn to_proto(status: Option<ServingStatus>) -> ProtoStatus {
    match status {
        Some(ServingStatus::Serving) => ProtoStatus::Serving,
        Some(ServingStatus::NotServing) => ProtoStatus::NotServing,
        Some(ServingStatus::Unknown) => ProtoStatus::Unknown,
        None => ProtoStatus::ServiceUnknown,
    }
}

fn response(status: ProtoStatus) -> HealthCheckResponse {
    HealthCheckResponse {
        status: status as i32,
    }
}

#[tonic::async_trait]
impl Health for HealthService {
    type WatchStream =
        Pin<Box<dyn Stream<Item = Result<HealthCheckResponse, Status>> + Send + 'static>>;

    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let service = request.into_inner().service;
        let status = self.registry.lookup(&service);
        tracing::debug!(service = %service, status = ?status, "gRPC health check");

        match status {
            Some(status) => Ok(Response::new(response(to_proto(Some(status))))),
            None => Err(Status::not_found(format!("unknown service: {service}"))),
        }
    }

    /// Streams the current status, then every change for the same service.
    async fn watch(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let service = request.into_inner().service;
        tracing::debug!(service = %service, "gRPC health watch started");

        // Subscribe before reading so no change slips between the two.
        let mut updates = self.registry.subscribe();
        let registry = Arc::clone(&self.registry);
        let (tx, rx) = mpsc::channel(WATCH_BUFFER);

        tokio::spawn(async move {
            let mut last = to_proto(registry.lookup(&service));
            if tx.send(Ok(response(last))).await.is_err() {
                return;
            }

            loop {
                let received = tokio::select! {
                    received = updates.recv() => received,
                    _ = tx.closed() => break,
                };
                let next = match received {
                    Ok(update) if update.service == service => to_proto(Some(update.status)),
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(service = %service, skipped, "Health watcher lagged, resyncing");
                        to_proto(registry.lookup(&service))
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if next == last {
                    continue;
                }
                last = next;
                if tx.send(Ok(response(next))).await.is_err() {
                    break;
                }
            }
            tracing::debug!(service = %service, "gRPC health watch ended");
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx)) as Self::WatchStream))
    }
}

/// Serve the health service on `listener` until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    registry: Arc<HealthRegistry>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), tonic::transport::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "gRPC health server starting");
    }

    tonic::transport::Server::builder()
        .add_service(HealthService::new(registry).into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!("gRPC health server stopped");
    Ok(())
}
