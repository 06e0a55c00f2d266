//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the health registry from validated configuration
//! - Bind the HTTP and gRPC listeners (fail fast on bind errors)
//! - Spawn one task per server, each subscribed to the shutdown signal

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::EchoConfig;
use crate::health::{grpc, HealthRegistry};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;

/// Errors that stop the process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Http(#[source] std::io::Error),

    #[error("gRPC server error: {0}")]
    Grpc(#[from] tonic::transport::Error),

    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Handle to the running servers.
pub struct RunningServer {
    http_addr: SocketAddr,
    grpc_addr: Option<SocketAddr>,
    registry: Arc<HealthRegistry>,
    shutdown: Shutdown,
    tasks: Vec<JoinHandle<Result<(), ServerError>>>,
}

impl RunningServer {
    /// Address the HTTP listener actually bound (resolves port 0).
    pub fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    /// Address the gRPC listener bound, when enabled.
    pub fn grpc_addr(&self) -> Option<SocketAddr> {
        self.grpc_addr
    }

    pub fn registry(&self) -> &Arc<HealthRegistry> {
        &self.registry
    }

    /// Mark every service NOT_SERVING and ask the servers to drain.
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for every server task to finish.
    pub async fn wait(self) -> Result<(), ServerError> {
        for task in self.tasks {
            task.await??;
        }
        tracing::info!("All servers stopped");
        Ok(())
    }
}

async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })
}

fn local_addr(listener: &TcpListener, address: &str) -> Result<SocketAddr, ServerError> {
    listener.local_addr().map_err(|source| ServerError::Bind {
        address: address.to_string(),
        source,
    })
}

/// Bind listeners and start serving. `config` must already be validated.
pub async fn start(config: EchoConfig) -> Result<RunningServer, ServerError> {
    let registry = Arc::new(HealthRegistry::new(&config.health.service_name));
    let shutdown = Shutdown::new(Arc::clone(&registry));

    let http_listener = bind(&config.listener.bind_address).await?;
    let http_addr = local_addr(&http_listener, &config.listener.bind_address)?;

    let grpc_listener = if config.grpc.enabled {
        Some(bind(&config.grpc.bind_address).await?)
    } else {
        None
    };
    let grpc_addr = grpc_listener
        .as_ref()
        .map(|listener| local_addr(listener, &config.grpc.bind_address))
        .transpose()?;

    let mut tasks = Vec::with_capacity(2);

    let server = HttpServer::new(config, Arc::clone(&registry));
    let http_shutdown = shutdown.subscribe();
    tasks.push(tokio::spawn(async move {
        server
            .run(http_listener, http_shutdown)
            .await
            .map_err(ServerError::Http)
    }));

    if let Some(listener) = grpc_listener {
        let grpc_registry = Arc::clone(&registry);
        let grpc_shutdown = shutdown.subscribe();
        tasks.push(tokio::spawn(async move {
            grpc::serve(listener, grpc_registry, grpc_shutdown)
                .await
                .map_err(ServerError::from)
        }));
    }

    tracing::info!(
        http_address = %http_addr,
        grpc_address = ?grpc_addr,
        "echo-sim ready"
    );

    Ok(RunningServer {
        http_addr,
        grpc_addr,
        registry,
        shutdown,
        tasks,
    })
}
