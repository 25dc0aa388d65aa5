//! Priority fee as used for greedy block building.
//!
//! Before London a block is ordered when its transactions are sorted by
//! decreasing `gasPrice`. After London the proposer keeps only the priority fee:
//!
//! * type 0: `gasPrice - baseFeePerGas`
//! * type 2: `min(maxPriorityFeePerGas, maxFeePerGas - baseFeePerGas)`
//!
//! Differences are floored at zero.

use alloy::primitives::U256;
use tracing::warn;

use crate::types::Transaction;

/// Priority fee of `tx` in a block with the given base fee.
///
/// A missing `gasPrice` where one is needed counts as zero and is reported
/// with a warning.
///
/// ```
/// use alloy::primitives::U256;
/// use chain_reader::{priority_fee, types::Transaction};
///
/// let tx = Transaction {
///     max_fee_per_gas: Some(U256::from(20)),
///     max_priority_fee_per_gas: Some(U256::from(5)),
///     ..Default::default()
/// };
/// assert_eq!(priority_fee(&tx, Some(U256::from(10))), U256::from(5));
/// ```
pub fn priority_fee(tx: &Transaction, base_fee: Option<U256>) -> U256 {
    let Some(base_fee) = base_fee else {
        return gas_price_or_zero(tx);
    };

    match (tx.max_priority_fee_per_gas, tx.max_fee_per_gas) {
        (Some(max_priority), Some(max_fee)) => max_priority.min(max_fee.saturating_sub(base_fee)),
        _ => gas_price_or_zero(tx).saturating_sub(base_fee),
    }
}

fn gas_price_or_zero(tx: &Transaction) -> U256 {
    tx.gas_price.unwrap_or_else(|| {
        warn!(tx = %tx.hash, "transaction has no gasPrice, using 0");
        U256::ZERO
    })
}

/// Index of the first key strictly greater than the one before it.
#[inline]
pub fn first_out_of_order(keys: &[U256]) -> Option<usize> {
    keys.windows(2).position(|w| w[1] > w[0]).map(|i| i + 1)
}

#[inline]
pub fn is_non_increasing(keys: &[U256]) -> bool {
    first_out_of_order(keys).is_none()
}

/// Priority fee of every transaction, sharing one base fee.
pub fn priority_fees(txs: &[Transaction], base_fee: Option<U256>) -> Vec<U256> {
    txs.iter().map(|tx| priority_fee(tx, base_fee)).collect()
}

/// Whether `txs` are sorted by non-increasing priority fee. Ties are allowed.
pub fn is_ordered(txs: &[Transaction], base_fee: Option<U256>) -> bool {
    if txs.len() <= 1 {
        return true;
    }
    is_non_increasing(&priority_fees(txs, base_fee))
}
