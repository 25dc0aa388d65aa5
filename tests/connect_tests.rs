mod common;

use chain_reader::{
    connect::ensure_connected, connect_to_eth, connect_with_middleware, ChainConfig, RpcClient,
    RpcError,
};
use common::MockTransport;
use serde_json::json;

// Nothing listens on port 1, so connecting fails fast without network access.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

fn dead_config() -> ChainConfig {
    ChainConfig {
        eth_url: DEAD_ENDPOINT.to_string(),
        bsc_testnet_url: DEAD_ENDPOINT.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_ensure_connected() {
    let client = RpcClient::new(
        MockTransport::new()
            .result("web3_clientVersion", json!("bsc/v1.4.5/linux-amd64/go1.21"))
            .result("eth_chainId", json!("0x61")),
    );
    let client = ensure_connected(client).await.unwrap();
    assert_eq!(client.url(), "mock://node");

    let err = ensure_connected(RpcClient::new(MockTransport::new()))
        .await
        .unwrap_err();
    match err {
        RpcError::Connection { url } => assert_eq!(url, "mock://node"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_ensure_connected_asks_for_chain_id() {
    let transport = MockTransport::new()
        .result("web3_clientVersion", json!("Geth/v1.14.0"))
        .error("eth_chainId", -32601, "method not found");
    let requests = transport.requests();

    let err = ensure_connected(RpcClient::new(transport)).await.unwrap_err();
    assert!(matches!(err, RpcError::Rpc { code: -32601, .. }));

    let methods: Vec<_> = requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r["method"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(methods, ["web3_clientVersion", "eth_chainId"]);
}

#[tokio::test]
async fn test_connect_to_eth_unreachable() {
    let err = connect_to_eth(&dead_config()).await.unwrap_err();
    assert!(matches!(err, RpcError::Connection { ref url } if url == DEAD_ENDPOINT));
}

#[tokio::test]
async fn test_descriptor_read_before_connecting() {
    let err = connect_with_middleware(&dead_config(), "/nonexistent/contract_info.json")
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Config(_)));
}

#[tokio::test]
async fn test_connect_with_middleware_unreachable() {
    let descriptor = concat!(env!("CARGO_MANIFEST_DIR"), "/contract_info.json");
    let err = connect_with_middleware(&dead_config(), descriptor)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Connection { .. }));
}
