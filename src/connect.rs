use std::path::Path;

use tracing::info;

use crate::config::ChainConfig;
use crate::contract::{Contract, ContractInfo};
use crate::rpc::RpcClient;
use crate::transport::TransportBuilder;
use crate::RpcError;

/// Transport settings for Ethereum mainnet: no request timeout.
pub fn eth_transport(config: &ChainConfig) -> TransportBuilder {
    TransportBuilder::new(config.eth_url.as_str())
}

/// Transport settings for BSC testnet: `bsc_timeout` and proof-of-authority handling.
pub fn bsc_transport(config: &ChainConfig) -> TransportBuilder {
    TransportBuilder::new(config.bsc_testnet_url.as_str())
        .timeout(config.bsc_timeout)
        .poa_extra_data()
}

/// Client for Ethereum mainnet, checked for liveness.
pub async fn connect_to_eth(config: &ChainConfig) -> Result<RpcClient, RpcError> {
    let client = eth_transport(config).build_client()?;
    ensure_connected(client).await
}

/// Client for BSC testnet with proof-of-authority handling, plus the contract
/// described by `contract_json`.
///
/// The descriptor is read before any connection is made.
pub async fn connect_with_middleware(
    config: &ChainConfig,
    contract_json: impl AsRef<Path>,
) -> Result<(RpcClient, Contract), RpcError> {
    let info = ContractInfo::from_file(contract_json)?;

    let client = ensure_connected(bsc_transport(config).build_client()?).await?;

    let contract = Contract::new(client.clone(), info);
    Ok((client, contract))
}

/// Fails with [`RpcError::Connection`] unless the node answers `web3_clientVersion`,
/// then logs the chain id the node reports.
pub async fn ensure_connected(client: RpcClient) -> Result<RpcClient, RpcError> {
    if !client.is_connected().await {
        return Err(RpcError::Connection {
            url: client.url().to_string(),
        });
    }

    let chain_id = client.get_chain_id().await?;
    info!(url = %client.url(), chain_id = chain_id.to::<u64>(), "connected");
    Ok(client)
}
