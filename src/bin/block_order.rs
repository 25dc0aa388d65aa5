use std::str::FromStr;

use alloy::primitives::Address;
use chain_reader::{
    connect_to_eth, connect_with_middleware, get_contract_values, is_ordered_block,
    ordering::LONDON_HARD_FORK_BLOCK, ChainConfig,
};
use rand::Rng;
use tracing_subscriber::EnvFilter;

// Accounts tied to the Merkle contract on BSC testnet,
// see https://testnet.bscscan.com/address/0xaA7CAaDA823300D18D3c43f65569a47e78220073
const ADMIN_ADDRESS: &str = "0xAC55e7d73A792fE1A9e051BDF4A010c33962809A";
const OWNER_ADDRESS: &str = "0x793A37a85964D96ACD6368777c7C7050F05b11dE";

const SAMPLED_BLOCKS: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ChainConfig::from_env()?;

    let eth = connect_to_eth(&config).await?;
    let (_bsc, contract) = connect_with_middleware(&config, &config.contract_info).await?;

    let latest_block = eth.get_block_number().await?;
    if latest_block <= LONDON_HARD_FORK_BLOCK {
        return Err(format!(
            "the chain never got past the London hard fork (head is {})",
            latest_block
        )
        .into());
    }

    let mut rng = rand::thread_rng();
    for _ in 0..SAMPLED_BLOCKS {
        let block_num = rng.gen_range(LONDON_HARD_FORK_BLOCK..=latest_block);
        if is_ordered_block(&eth, block_num).await? {
            println!("Block {} is ordered", block_num);
        } else {
            println!("Block {} is not ordered", block_num);
        }
    }

    let admin = Address::from_str(ADMIN_ADDRESS)?;
    let owner = Address::from_str(OWNER_ADDRESS)?;
    let (root, has_role, prime) = get_contract_values(&contract, admin, owner).await?;
    println!("Contract {}", contract.address());
    println!("Merkle root: {}", root);
    println!("{} has DEFAULT_ADMIN_ROLE: {}", admin, has_role);
    println!("Prime owned by {}: {}", owner, prime);

    Ok(())
}
