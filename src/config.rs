use serde::{Deserialize, Serialize};

/// Where to talk to. Only mainnet is wired into the burn binary.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub fullnode_url: String,
    pub indexer_url: String,
    /// Expected chain id; a mismatch with the node's ledger info is an error.
    pub chain_id: u8,
}

impl NetworkConfig {
    pub fn mainnet() -> Self {
        Self {
            name: "mainnet".to_string(),
            fullnode_url: "https://api.mainnet.aptoslabs.com/v1".to_string(),
            indexer_url: "https://api.mainnet.aptoslabs.com/v1/graphql".to_string(),
            chain_id: 1,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BurnConfig {
    pub collection_name: String,
    /// Fully qualified entry function, `<address>::<module>::<function>`.
    pub burn_function: String,
    pub page_size: u64,
    /// Upper bound on indexer pages fetched while enumerating.
    pub max_pages: u64,
    pub batch_size: usize,
    pub transaction: TransactionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransactionConfig {
    pub max_gas_amount: u64,
    pub expiration_secs: u64,
    pub wait_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            max_gas_amount: 200_000,
            expiration_secs: 20,
            wait_timeout_secs: 20,
            poll_interval_ms: 200,
        }
    }
}

impl Default for BurnConfig {
    fn default() -> Self {
        Self {
            collection_name: "SuperV Sidekicks".to_string(),
            burn_function:
                "0x09d518b9b84f327eafc5f6632200ea224a818a935ffd6be5d78ada250bbc44a6::sidekick::batch_delete"
                    .to_string(),
            page_size: 100,
            max_pages: 10_000,
            batch_size: 100,
            transaction: TransactionConfig::default(),
        }
    }
}
