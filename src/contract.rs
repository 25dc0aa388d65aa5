use std::fs;
use std::path::Path;

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes, B256, U256};
use serde::Deserialize;
use tracing::debug;

use crate::rpc::RpcClient;
use crate::RpcError;

/// `DEFAULT_ADMIN_ROLE` of OpenZeppelin's `AccessControl`.
pub const DEFAULT_ADMIN_ROLE: B256 = B256::ZERO;

/// Address and ABI of a deployed contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractInfo {
    pub address: Address,
    pub abi: JsonAbi,
}

#[derive(Debug, Deserialize)]
struct ContractFile {
    bsc: ContractInfo,
}

impl ContractInfo {
    /// Parses a descriptor of the form `{"bsc": {"address": ..., "abi": [...]}}`.
    pub fn from_json(json: &str) -> Result<Self, RpcError> {
        let file: ContractFile =
            serde_json::from_str(json).map_err(|e| RpcError::Config(e.to_string()))?;
        Ok(file.bsc)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RpcError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| RpcError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

/// A contract bound to the client that reaches it.
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    abi: JsonAbi,
    client: RpcClient,
}

impl Contract {
    pub fn new(client: RpcClient, info: ContractInfo) -> Self {
        Self {
            address: info.address,
            abi: info.abi,
            client,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn function(&self, name: &str, arity: usize) -> Result<&Function, RpcError> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == arity))
            .ok_or_else(|| {
                RpcError::Abi(format!("no function {} with {} inputs in ABI", name, arity))
            })
    }

    /// Read-only call of `name` through `eth_call`, returning the decoded outputs.
    pub async fn call(&self, name: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>, RpcError> {
        let function = self.function(name, args.len())?;
        let input = function
            .abi_encode_input(args)
            .map_err(|e| RpcError::Abi(format!("{}: {}", name, e)))?;

        debug!(contract = %self.address, function = %function.signature(), "eth_call");
        let output = self.client.call(self.address, Bytes::from(input)).await?;

        function
            .abi_decode_output(&output, true)
            .map_err(|e| RpcError::Abi(format!("{}: {}", name, e)))
    }

    async fn call_single(&self, name: &str, args: &[DynSolValue]) -> Result<DynSolValue, RpcError> {
        let mut values = self.call(name, args).await?;
        if values.len() != 1 {
            return Err(RpcError::Abi(format!(
                "{} returned {} values, expected 1",
                name,
                values.len()
            )));
        }
        Ok(values.remove(0))
    }

    pub async fn merkle_root(&self) -> Result<B256, RpcError> {
        match self.call_single("merkleRoot", &[]).await? {
            DynSolValue::FixedBytes(word, 32) => Ok(word),
            other => Err(unexpected("merkleRoot", "bytes32", &other)),
        }
    }

    pub async fn has_role(&self, role: B256, account: Address) -> Result<bool, RpcError> {
        let args = [DynSolValue::FixedBytes(role, 32), DynSolValue::Address(account)];
        match self.call_single("hasRole", &args).await? {
            DynSolValue::Bool(value) => Ok(value),
            other => Err(unexpected("hasRole", "bool", &other)),
        }
    }

    pub async fn prime_by_owner(&self, owner: Address) -> Result<U256, RpcError> {
        let args = [DynSolValue::Address(owner)];
        match self.call_single("getPrimeByOwner", &args).await? {
            DynSolValue::Uint(value, _) => Ok(value),
            other => Err(unexpected("getPrimeByOwner", "uint256", &other)),
        }
    }
}

fn unexpected(name: &str, expected: &str, got: &DynSolValue) -> RpcError {
    RpcError::Abi(format!("{} returned {:?}, expected {}", name, got, expected))
}

/// Current Merkle root, whether `admin_address` holds `DEFAULT_ADMIN_ROLE`,
/// and the prime registered to `owner_address`.
pub async fn get_contract_values(
    contract: &Contract,
    admin_address: Address,
    owner_address: Address,
) -> Result<(B256, bool, U256), RpcError> {
    let onchain_root = contract.merkle_root().await?;
    let has_role = contract.has_role(DEFAULT_ADMIN_ROLE, admin_address).await?;
    let prime = contract.prime_by_owner(owner_address).await?;

    Ok((onchain_root, has_role, prime))
}
