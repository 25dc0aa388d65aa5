#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::hex;
use alloy::primitives::keccak256;
use async_trait::async_trait;
use chain_reader::{rpc::Transport, RpcError};
use serde_json::{json, Value};

/// In-memory node: canned replies per JSON-RPC method, every request recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: HashMap<String, Reply>,
    requests: Arc<Mutex<Vec<Value>>>,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Fail(String),
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(mut self, method: &str, result: Value) -> Self {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string();
        self.replies.insert(method.to_string(), Reply::Body(body));
        self
    }

    /// Reply to an `eth_call` whose calldata starts with the selector of `signature`.
    pub fn call_result(self, signature: &str, output: &str) -> Self {
        let key = format!("eth_call:{}", selector(signature));
        self.result(&key, json!(output))
    }

    pub fn error(mut self, method: &str, code: i64, message: &str) -> Self {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": code, "message": message}
        })
        .to_string();
        self.replies.insert(method.to_string(), Reply::Body(body));
        self
    }

    pub fn call_error(self, signature: &str, code: i64, message: &str) -> Self {
        let key = format!("eth_call:{}", selector(signature));
        self.error(&key, code, message)
    }

    pub fn fail(mut self, method: &str, reason: &str) -> Self {
        self.replies
            .insert(method.to_string(), Reply::Fail(reason.to_string()));
        self
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<Value>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: String) -> Result<String, RpcError> {
        let request: Value = serde_json::from_str(&request).expect("request is JSON");
        let method = request["method"].as_str().unwrap_or_default().to_string();

        let key = if method == "eth_call" {
            let data = request["params"][0]["data"].as_str().unwrap_or_default();
            format!("eth_call:{}", &data[..data.len().min(10)])
        } else {
            method
        };
        self.requests.lock().unwrap().push(request);

        match self.replies.get(&key) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Fail(reason)) => Err(RpcError::Transport(reason.clone())),
            None => Err(RpcError::Transport(format!("no reply for {}", key))),
        }
    }

    fn url(&self) -> &str {
        "mock://node"
    }
}

pub fn selector(signature: &str) -> String {
    format!("0x{}", hex::encode(&keccak256(signature.as_bytes())[..4]))
}

/// 32-byte ABI word holding `value`.
pub fn word(value: u128) -> String {
    format!("{:064x}", value)
}

pub fn legacy_tx(n: u8, gas_price: u64) -> Value {
    json!({
        "hash": format!("0x{:064x}", n),
        "from": "0x1111111111111111111111111111111111111111",
        "to": "0x2222222222222222222222222222222222222222",
        "nonce": format!("0x{:x}", n),
        "type": "0x0",
        "transactionIndex": format!("0x{:x}", n),
        "gasPrice": format!("0x{:x}", gas_price),
    })
}

pub fn eip1559_tx(n: u8, max_priority: u64, max_fee: u64) -> Value {
    json!({
        "hash": format!("0x{:064x}", n),
        "from": "0x1111111111111111111111111111111111111111",
        "to": "0x2222222222222222222222222222222222222222",
        "nonce": format!("0x{:x}", n),
        "type": "0x2",
        "transactionIndex": format!("0x{:x}", n),
        "gasPrice": format!("0x{:x}", max_fee),
        "maxFeePerGas": format!("0x{:x}", max_fee),
        "maxPriorityFeePerGas": format!("0x{:x}", max_priority),
        "accessList": [],
    })
}

pub fn block(number: u64, base_fee: Option<u64>, transactions: Vec<Value>) -> Value {
    let mut block = json!({
        "number": format!("0x{:x}", number),
        "hash": format!("0x{:064x}", number),
        "extraData": "0xd883010a11846765746888676f312e31372e33856c696e7578",
        "transactions": transactions,
    });
    if let Some(base_fee) = base_fee {
        block["baseFeePerGas"] = json!(format!("0x{:x}", base_fee));
    }
    block
}
