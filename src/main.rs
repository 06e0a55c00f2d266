//! echo-sim: request echo and service-health simulator.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                    ECHO-SIM                      │
//!                     │                                                  │
//!   HTTP request      │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ──────────────────┼─▶│  http   │───▶│ handlers │───▶│    echo    │   │
//!                     │  │ server  │    │          │    │  decoder   │   │
//!                     │  └─────────┘    └────┬─────┘    └────────────┘   │
//!                     │                      │                           │
//!                     │                      ▼                           │
//!                     │               ┌────────────┐                     │
//!                     │               │  simulate  │                     │
//!                     │               │delay/status│                     │
//!                     │               └────────────┘                     │
//!                     │                                                  │
//!   gRPC Check/Watch  │  ┌─────────┐    ┌──────────────────┐             │
//!   ──────────────────┼─▶│ health  │───▶│  HealthRegistry  │◀── /ready   │
//!                     │  │  grpc   │    │  (RwLock table)  │             │
//!                     │  └─────────┘    └────────▲─────────┘             │
//!                     │                          │                       │
//!                     │        lifecycle: SIGTERM → NOT_SERVING → drain  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use echo_sim::config::{self, ConfigOverrides};
use echo_sim::lifecycle::{self, wait_for_signal};
use echo_sim::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "echo-sim")]
#[command(about = "Request echo and service-health simulator", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "ECHO_SIM_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind the HTTP and gRPC listeners to.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// HTTP port.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// gRPC health port.
    #[arg(long, env = "GRPC_PORT")]
    grpc_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            grpc_port: self.grpc_port,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref(), &cli.overrides())?;

    logging::init_logging(&config.observability)?;

    tracing::info!("echo-sim v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        http_address = %config.listener.bind_address,
        grpc_enabled = config.grpc.enabled,
        grpc_address = %config.grpc.bind_address,
        max_delay_secs = config.delay.max_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = lifecycle::start(config).await?;

    wait_for_signal().await;
    server.trigger_shutdown();
    server.wait().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
