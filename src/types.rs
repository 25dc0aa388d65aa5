use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

use crate::RpcError;

/// Upper bound on `extraData` for chains following the yellow paper.
pub const MAX_EXTRA_DATA_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Block {
    pub number: U64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    #[serde(rename = "baseFeePerGas")]
    pub base_fee_per_gas: Option<U256>,
    #[serde(rename = "extraData", default)]
    pub extra_data: Bytes,
    // Only set by proof-of-authority handling, never sent by the node.
    #[serde(rename = "proofOfAuthorityData")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_of_authority_data: Option<Bytes>,
    #[serde(default)]
    pub transactions: BlockTransactions,
}

/// `eth_getBlockByNumber` returns full objects or bare hashes depending on its second argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Full(Vec<Transaction>),
    Hashes(Vec<B256>),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Transaction {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    #[serde(default)]
    pub nonce: U64,
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<U64>,
    #[serde(rename = "transactionIndex")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_index: Option<U64>,
    #[serde(rename = "gasPrice")]
    pub gas_price: Option<U256>,
    #[serde(rename = "maxFeePerGas")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(rename = "maxPriorityFeePerGas")]
    pub max_priority_fee_per_gas: Option<U256>,
}

impl Default for BlockTransactions {
    fn default() -> Self {
        BlockTransactions::Full(Vec::new())
    }
}

impl BlockTransactions {
    pub fn len(&self) -> usize {
        match self {
            BlockTransactions::Full(txs) => txs.len(),
            BlockTransactions::Hashes(hashes) => hashes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full transaction objects. An empty list counts as full whichever way it was requested.
    pub fn as_full(&self) -> Option<&[Transaction]> {
        match self {
            BlockTransactions::Full(txs) => Some(txs),
            BlockTransactions::Hashes(hashes) if hashes.is_empty() => Some(&[]),
            BlockTransactions::Hashes(_) => None,
        }
    }
}

impl Block {
    pub fn number(&self) -> u64 {
        self.number.to::<u64>()
    }

    /// Enforces the 32-byte `extraData` limit.
    ///
    /// Proof-of-authority chains (BSC, Goerli-era clique networks) pack validator
    /// signatures into `extraData`. With `poa` set, the value is always moved
    /// into `proof_of_authority_data` and `extra_data` is left empty, whatever
    /// its length. Without it an oversized value rejects the block.
    pub fn normalize_extra_data(&mut self, poa: bool) -> Result<(), RpcError> {
        if poa {
            self.proof_of_authority_data = Some(std::mem::take(&mut self.extra_data));
            return Ok(());
        }

        let len = self.extra_data.len();
        if len > MAX_EXTRA_DATA_LEN {
            return Err(RpcError::Response(format!(
                "extraData of block {} is {} bytes, but should be {}; \
                 enable proof-of-authority handling for this chain",
                self.number(),
                len,
                MAX_EXTRA_DATA_LEN
            )));
        }

        Ok(())
    }
}
