use crate::account::AccountAddress;
use crate::client::{AssetIndexer, IndexerClient, OwnedToken, RestClient, TransactionService};
use crate::config::{NetworkConfig, TransactionConfig};
use crate::error::{BurnError, Result};
use crate::transaction::{
    EntryFunction, ExecutedTransaction, PendingTransaction, RawTransaction, SignedTransaction,
    TransactionPayload,
};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Indexer and fullnode clients for one network.
pub struct Aptos {
    network: NetworkConfig,
    txn_config: TransactionConfig,
    rest: RestClient,
    indexer: IndexerClient,
    chain_id: OnceCell<u8>,
}

impl Aptos {
    pub fn new(network: NetworkConfig, txn_config: TransactionConfig) -> Result<Self> {
        let rest = RestClient::new(network.fullnode_url.clone())?;
        let indexer = IndexerClient::new(network.indexer_url.clone())?;
        Ok(Self { network, txn_config, rest, indexer, chain_id: OnceCell::new() })
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Chain id reported by the node, checked against the configured one.
    async fn chain_id(&self) -> Result<u8> {
        let id = self
            .chain_id
            .get_or_try_init(|| async {
                let info = self.rest.get_ledger_info().await?;
                debug!("Ledger at version {} on chain {}", info.ledger_version, info.chain_id);
                Ok::<u8, BurnError>(info.chain_id)
            })
            .await?;

        if *id != self.network.chain_id {
            return Err(BurnError::MalformedResponse(format!(
                "{} node reports chain id {}, expected {}",
                self.network.name, id, self.network.chain_id
            )));
        }
        Ok(*id)
    }
}

#[async_trait]
impl AssetIndexer for Aptos {
    async fn owned_digital_assets(
        &self,
        owner: &AccountAddress,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OwnedToken>> {
        self.indexer.owned_digital_assets(owner, offset, limit).await
    }
}

#[async_trait]
impl TransactionService for Aptos {
    async fn build_entry_function(
        &self,
        sender: &AccountAddress,
        function: EntryFunction,
    ) -> Result<RawTransaction> {
        let chain_id = self.chain_id().await?;
        let account = self.rest.get_account(sender).await?;
        let gas = self.rest.estimate_gas_price().await?;

        Ok(RawTransaction {
            sender: *sender,
            sequence_number: account.sequence_number,
            payload: TransactionPayload::EntryFunction(function),
            max_gas_amount: self.txn_config.max_gas_amount,
            gas_unit_price: gas.gas_estimate,
            expiration_timestamp_secs: Utc::now().timestamp() as u64 + self.txn_config.expiration_secs,
            chain_id,
        })
    }

    async fn simulate(&self, transaction: &SignedTransaction) -> Result<Vec<ExecutedTransaction>> {
        self.rest.simulate(transaction).await
    }

    async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction> {
        self.rest.submit(transaction).await
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<ExecutedTransaction> {
        self.rest
            .wait_for_transaction(
                hash,
                Duration::from_secs(self.txn_config.wait_timeout_secs),
                Duration::from_millis(self.txn_config.poll_interval_ms),
            )
            .await
    }
}
