use tracing::{debug, instrument};

use crate::fees::{first_out_of_order, priority_fees};
use crate::rpc::RpcClient;
use crate::RpcError;

/// London hard fork activation height on Ethereum mainnet (EIP-1559).
pub const LONDON_HARD_FORK_BLOCK: u64 = 12_965_000;

/// Fetches `block_num` with full transactions and reports whether they are
/// sorted by non-increasing priority fee.
///
/// Errors from the fetch are returned as they come; an unknown block is an error.
#[instrument(skip(client), fields(url = %client.url()))]
pub async fn is_ordered_block(client: &RpcClient, block_num: u64) -> Result<bool, RpcError> {
    let block = client
        .get_block_by_number(block_num, true)
        .await?
        .ok_or_else(|| RpcError::Response(format!("block {} not found", block_num)))?;

    let txs = block.transactions.as_full().ok_or_else(|| {
        RpcError::Response(format!(
            "block {} came back without full transaction objects",
            block_num
        ))
    })?;

    if txs.len() <= 1 {
        return Ok(true);
    }

    let keys = priority_fees(txs, block.base_fee_per_gas);
    match first_out_of_order(&keys) {
        Some(index) => {
            debug!(
                index,
                tx = %txs[index].hash,
                fee = %keys[index],
                previous = %keys[index - 1],
                "priority fee increases"
            );
            Ok(false)
        }
        None => Ok(true),
    }
}
