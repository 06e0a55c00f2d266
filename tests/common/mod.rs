//! Shared utilities for integration tests.

use echo_sim::config::EchoConfig;
use echo_sim::lifecycle::{self, RunningServer};

/// Start the full service on ephemeral ports.
pub async fn start_server() -> RunningServer {
    start_server_with(|_| {}).await
}

/// Start the full service on ephemeral ports after adjusting the config.
pub async fn start_server_with(adjust: impl FnOnce(&mut EchoConfig)) -> RunningServer {
    let mut config = EchoConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.grpc.bind_address = "127.0.0.1:0".to_string();
    adjust(&mut config);

    echo_sim::config::validate_config(&config).expect("test config should be valid");
    lifecycle::start(config).await.expect("server should start")
}

/// HTTP client that bypasses any system proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn url(server: &RunningServer, path: &str) -> String {
    format!("http://{}{}", server.http_addr(), path)
}
