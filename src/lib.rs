use async_trait::async_trait;
use reqwest::Client;
use rpc::Transport;
use std::time::Duration;
use tracing::debug;

pub mod config;
pub mod connect;
pub mod contract;
pub mod fees;
pub mod ordering;
pub mod rpc;
pub mod transport;
pub mod types;

pub use config::ChainConfig;
pub use connect::{connect_to_eth, connect_with_middleware};
pub use contract::{get_contract_values, Contract, ContractInfo};
pub use fees::priority_fee;
pub use ordering::is_ordered_block;
pub use rpc::RpcClient;

#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    url: String,
    timeout: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Response(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("ABI error: {0}")]
    Abi(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Failed to connect to provider at {url}")]
    Connection { url: String },
}

impl HttpTransport {
    /// Creates an `HttpTransport` for `url` without a request timeout.
    ///
    /// The client keeps idle connections for 10 seconds and uses a 60-second TCP keepalive.
    pub fn new(url: impl Into<String>) -> Result<Self, RpcError> {
        Self::build(url.into(), None)
    }

    /// Same as [`HttpTransport::new`], but every request fails once `timeout` elapses.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        Self::build(url.into(), Some(timeout))
    }

    fn build(url: String, timeout: Option<Duration>) -> Result<Self, RpcError> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(60));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RpcError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: String) -> Result<String, RpcError> {
        debug!(url = %self.url, "sending request");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RpcError::Transport(format!("HTTP error {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| RpcError::Transport(format!("Failed to read response: {}", e)))
    }

    fn url(&self) -> &str {
        &self.url
    }
}
