use alloy::primitives::{Address, Bytes, U64};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::types::Block;
use crate::RpcError;

#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn execute(&self, request: String) -> Result<String, RpcError>;

    /// Endpoint the transport talks to, used in logs and connection errors.
    fn url(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    pub transport: Arc<dyn Transport>,
    /// Split oversized `extraData` the way proof-of-authority chains need.
    poa_extra_data: bool,
}

/// Represents an RPC request to a Ethereum node
#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: serde_json::Value,
    pub id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcRequest {
    pub fn new(method: &'static str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        }
    }
}

impl RpcClient {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            poa_extra_data: false,
        }
    }

    /// Move every fetched block's `extraData` into `proof_of_authority_data`,
    /// so blocks longer than 32 bytes there are accepted.
    pub fn with_poa_extra_data(mut self) -> Self {
        self.poa_extra_data = true;
        self
    }

    pub fn poa_extra_data(&self) -> bool {
        self.poa_extra_data
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    pub async fn client_version(&self) -> Result<String, RpcError> {
        self.execute(RpcRequest::new("web3_clientVersion", json!([])))
            .await
    }

    /// Liveness check. Any failure, transport or node side, counts as "not connected".
    pub async fn is_connected(&self) -> bool {
        match self.client_version().await {
            Ok(version) => {
                debug!(url = %self.url(), %version, "node is reachable");
                true
            }
            Err(e) => {
                debug!(url = %self.url(), error = %e, "liveness check failed");
                false
            }
        }
    }

    pub async fn get_chain_id(&self) -> Result<U64, RpcError> {
        self.execute(RpcRequest::new("eth_chainId", json!([]))).await
    }

    pub async fn get_block_number(&self) -> Result<u64, RpcError> {
        let number: U64 = self
            .execute(RpcRequest::new("eth_blockNumber", json!([])))
            .await?;
        Ok(number.to::<u64>())
    }

    /// fetches the block by number, `None` when the node does not know it
    pub async fn get_block_by_number(
        &self,
        number: u64,
        full_tx: bool,
    ) -> Result<Option<Block>, RpcError> {
        let request = RpcRequest::new(
            "eth_getBlockByNumber",
            json!([format!("0x{:x}", number), full_tx]),
        );

        let block: Option<Block> = self.execute(request).await?;
        match block {
            Some(mut block) => {
                block.normalize_extra_data(self.poa_extra_data)?;
                Ok(Some(block))
            }
            None => Ok(None),
        }
    }

    /// `eth_call` against the latest block.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        let request = RpcRequest::new(
            "eth_call",
            json!([{ "to": format!("0x{:x}", to), "data": data }, "latest"]),
        );

        self.execute(request).await
    }

    pub async fn execute<T: DeserializeOwned>(&self, request: RpcRequest) -> Result<T, RpcError> {
        let body = serde_json::to_string(&request).map_err(|e| RpcError::Parse(e.to_string()))?;
        debug!(method = request.method, "rpc request");

        let response = self.transport.execute(body).await?;
        let response: RpcResponse =
            serde_json::from_str(&response).map_err(|e| RpcError::Parse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(response.result).map_err(|e| RpcError::Parse(e.to_string()))
    }
}
