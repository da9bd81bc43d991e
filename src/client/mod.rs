// Client module
pub mod aptos;
pub mod indexer;
pub mod rest;

pub use aptos::Aptos;
pub use indexer::{IndexerClient, OwnedToken};
pub use rest::RestClient;

use crate::account::AccountAddress;
use crate::error::Result;
use crate::transaction::{
    EntryFunction, ExecutedTransaction, PendingTransaction, RawTransaction, SignedTransaction,
};
use async_trait::async_trait;

/// Paged lookup of the digital assets an account currently owns.
#[async_trait]
pub trait AssetIndexer: Send + Sync {
    async fn owned_digital_assets(
        &self,
        owner: &AccountAddress,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OwnedToken>>;
}

/// Transaction lifecycle against a fullnode. Signing happens locally, between
/// `build_entry_function` and `submit`.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Fill in sequence number, gas and expiration for `function` sent by `sender`.
    async fn build_entry_function(
        &self,
        sender: &AccountAddress,
        function: EntryFunction,
    ) -> Result<RawTransaction>;

    async fn simulate(&self, transaction: &SignedTransaction) -> Result<Vec<ExecutedTransaction>>;

    async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction>;

    /// Block until the transaction leaves the mempool and report its outcome.
    async fn wait_for_transaction(&self, hash: &str) -> Result<ExecutedTransaction>;
}
