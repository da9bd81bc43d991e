// REST client for an Aptos fullnode
use crate::account::AccountAddress;
use crate::encoding::CanonicalSerialize;
use crate::error::{BurnError, Result};
use crate::json::u64_str;
use crate::transaction::{ExecutedTransaction, PendingTransaction, SignedTransaction};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

const SIGNED_TRANSACTION_BCS: &str = "application/x.aptos.signed_transaction+bcs";

#[derive(Debug, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u8,
    #[serde(with = "u64_str")]
    pub ledger_version: u64,
}

#[derive(Debug, Deserialize)]
pub struct AccountData {
    #[serde(with = "u64_str")]
    pub sequence_number: u64,
}

#[derive(Debug, Deserialize)]
pub struct GasEstimation {
    pub gas_estimate: u64,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Where a transaction is in its lifecycle, as seen by `GET /transactions/by_hash`.
#[derive(Debug, Clone)]
pub enum TransactionStatus {
    NotFound,
    Pending,
    Executed(ExecutedTransaction),
}

pub struct RestClient {
    url: String,
    client: Client,
}

impl RestClient {
    pub fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { url: url.trim_end_matches('/').to_string(), client })
    }

    // Helper for decoding responses
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(BurnError::Api { status: status.as_u16(), message });
        }
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(format!("{}{}", self.url, path)).send().await?;
        Self::decode(response).await
    }

    async fn post_bcs<T: DeserializeOwned>(&self, path: &str, transaction: &SignedTransaction) -> Result<T> {
        let response = self.client
            .post(format!("{}{}", self.url, path))
            .header(reqwest::header::CONTENT_TYPE, SIGNED_TRANSACTION_BCS)
            .body(transaction.to_bytes())
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_ledger_info(&self) -> Result<LedgerInfo> {
        self.get("").await
    }

    pub async fn get_account(&self, address: &AccountAddress) -> Result<AccountData> {
        self.get(&format!("/accounts/{}", address)).await
    }

    pub async fn estimate_gas_price(&self) -> Result<GasEstimation> {
        self.get("/estimate_gas_price").await
    }

    pub async fn simulate(&self, transaction: &SignedTransaction) -> Result<Vec<ExecutedTransaction>> {
        self.post_bcs("/transactions/simulate", transaction).await
    }

    pub async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction> {
        self.post_bcs("/transactions", transaction).await
    }

    pub async fn get_transaction_by_hash(&self, hash: &str) -> Result<TransactionStatus> {
        let response = self.client
            .get(format!("{}/transactions/by_hash/{}", self.url, hash))
            .send()
            .await?;

        // Freshly submitted transactions can take a moment to show up.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(TransactionStatus::NotFound);
        }

        let value: serde_json::Value = Self::decode(response).await?;
        parse_transaction_status(value)
    }

    /// Poll until the transaction is executed or `timeout` elapses.
    pub async fn wait_for_transaction(
        &self,
        hash: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<ExecutedTransaction> {
        let start = Instant::now();
        loop {
            match self.get_transaction_by_hash(hash).await? {
                TransactionStatus::Executed(txn) => return Ok(txn),
                status => debug!("Transaction {} not final yet: {:?}", hash, status),
            }
            if start.elapsed() >= timeout {
                return Err(BurnError::WaitTimeout(hash.to_string()));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

pub fn parse_transaction_status(value: serde_json::Value) -> Result<TransactionStatus> {
    let kind = value.get("type").and_then(|t| t.as_str()).map(str::to_owned);
    match kind.as_deref() {
        Some("pending_transaction") => Ok(TransactionStatus::Pending),
        Some(_) => serde_json::from_value(value)
            .map(TransactionStatus::Executed)
            .map_err(|e| BurnError::MalformedResponse(format!("transaction: {}", e))),
        None => Err(BurnError::MalformedResponse("transaction without type".to_string())),
    }
}
