use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::RpcError;

pub const DEFAULT_ETH_MAINNET_RPC: &str = "https://ethereum-rpc.publicnode.com";
pub const DEFAULT_BSC_TESTNET_RPC: &str = "https://bsc-testnet.publicnode.com";
pub const DEFAULT_CONTRACT_INFO: &str = "contract_info.json";
pub const DEFAULT_BSC_TIMEOUT_SECS: u64 = 30;

/// Endpoints and files the connection helpers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub eth_url: String,
    pub bsc_testnet_url: String,
    pub contract_info: PathBuf,
    pub bsc_timeout: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            eth_url: DEFAULT_ETH_MAINNET_RPC.to_string(),
            bsc_testnet_url: DEFAULT_BSC_TESTNET_RPC.to_string(),
            contract_info: PathBuf::from(DEFAULT_CONTRACT_INFO),
            bsc_timeout: Duration::from_secs(DEFAULT_BSC_TIMEOUT_SECS),
        }
    }
}

impl ChainConfig {
    /// Reads `ETH_MAINNET_RPC`, `BSC_TESTNET_RPC`, `CONTRACT_INFO` and
    /// `BSC_TIMEOUT_SECS`, after loading a `.env` file if there is one.
    pub fn from_env() -> Result<Self, RpcError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RpcError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bsc_timeout = match lookup("BSC_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|e| RpcError::Config(format!("BSC_TIMEOUT_SECS={}: {}", secs, e)))?,
            None => defaults.bsc_timeout,
        };

        Ok(Self {
            eth_url: lookup("ETH_MAINNET_RPC").unwrap_or(defaults.eth_url),
            bsc_testnet_url: lookup("BSC_TESTNET_RPC").unwrap_or(defaults.bsc_testnet_url),
            contract_info: lookup("CONTRACT_INFO")
                .map(PathBuf::from)
                .unwrap_or(defaults.contract_info),
            bsc_timeout,
        })
    }
}
