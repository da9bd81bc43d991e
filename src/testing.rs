//! In-memory stand-ins for the indexer and the fullnode, shared by unit tests.

use crate::account::AccountAddress;
use crate::client::indexer::{CollectionData, TokenData};
use crate::client::{AssetIndexer, OwnedToken, TransactionService};
use crate::error::{BurnError, Result};
use crate::transaction::{
    EntryFunction, ExecutedTransaction, PendingTransaction, RawTransaction, SignedTransaction,
    TransactionPayload,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub fn token(id: &str, collection: &str) -> OwnedToken {
    OwnedToken {
        token_data_id: id.to_string(),
        amount: 1,
        current_token_data: Some(TokenData {
            token_name: format!("token {}", id),
            current_collection: Some(CollectionData {
                collection_name: collection.to_string(),
                creator_address: None,
            }),
        }),
    }
}

/// Serves `pages` in call order and records the offsets it was asked for.
pub struct FakeIndexer {
    pages: Vec<Vec<OwnedToken>>,
    fail_at: Option<usize>,
    offsets: Mutex<Vec<u64>>,
}

impl FakeIndexer {
    pub fn new(pages: Vec<Vec<OwnedToken>>) -> Self {
        Self { pages, fail_at: None, offsets: Mutex::new(Vec::new()) }
    }

    pub fn failing_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    pub fn offsets(&self) -> Vec<u64> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetIndexer for FakeIndexer {
    async fn owned_digital_assets(
        &self,
        _owner: &AccountAddress,
        offset: u64,
        _limit: u64,
    ) -> Result<Vec<OwnedToken>> {
        let mut offsets = self.offsets.lock().unwrap();
        let call = offsets.len();
        offsets.push(offset);
        if self.fail_at == Some(call) {
            return Err(BurnError::Indexer("connection reset".to_string()));
        }
        Ok(self.pages.get(call).cloned().unwrap_or_default())
    }
}

/// Records every call. Batches listed in `failing_batches` execute with
/// `success: false`.
#[derive(Default)]
pub struct FakeTransactionService {
    failing_batches: Vec<usize>,
    submit_error_at: Option<usize>,
    pub built: Mutex<Vec<EntryFunction>>,
    pub simulated: Mutex<usize>,
    pub submitted: Mutex<Vec<SignedTransaction>>,
    pub waited: Mutex<Vec<String>>,
}

impl FakeTransactionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_batch(mut self, batch: usize) -> Self {
        self.failing_batches.push(batch);
        self
    }

    pub fn submit_error_at(mut self, batch: usize) -> Self {
        self.submit_error_at = Some(batch);
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn call_count(&self) -> usize {
        self.built.lock().unwrap().len()
            + *self.simulated.lock().unwrap()
            + self.submit_count()
            + self.waited.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionService for FakeTransactionService {
    async fn build_entry_function(
        &self,
        sender: &AccountAddress,
        function: EntryFunction,
    ) -> Result<RawTransaction> {
        let mut built = self.built.lock().unwrap();
        let sequence_number = built.len() as u64;
        built.push(function.clone());
        Ok(RawTransaction {
            sender: *sender,
            sequence_number,
            payload: TransactionPayload::EntryFunction(function),
            max_gas_amount: 200_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_700_000_000,
            chain_id: 1,
        })
    }

    async fn simulate(&self, transaction: &SignedTransaction) -> Result<Vec<ExecutedTransaction>> {
        *self.simulated.lock().unwrap() += 1;
        Ok(vec![ExecutedTransaction {
            hash: format!("0xsim{}", transaction.raw.sequence_number),
            success: true,
            vm_status: "Executed successfully".to_string(),
            gas_used: 10,
            version: 0,
        }])
    }

    async fn submit(&self, transaction: &SignedTransaction) -> Result<PendingTransaction> {
        let mut submitted = self.submitted.lock().unwrap();
        let batch = submitted.len();
        if self.submit_error_at == Some(batch) {
            return Err(BurnError::Api { status: 503, message: "service unavailable".to_string() });
        }
        submitted.push(transaction.clone());
        Ok(PendingTransaction {
            hash: format!("0xhash{}", batch),
            sender: transaction.raw.sender,
            sequence_number: transaction.raw.sequence_number,
        })
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<ExecutedTransaction> {
        let mut waited = self.waited.lock().unwrap();
        let batch = waited.len();
        waited.push(hash.to_string());
        let success = !self.failing_batches.contains(&batch);
        Ok(ExecutedTransaction {
            hash: hash.to_string(),
            success,
            vm_status: if success {
                "Executed successfully".to_string()
            } else {
                "Move abort in 0x9d5::sidekick: E_NOT_OWNER(0x1)".to_string()
            },
            gas_used: 100,
            version: batch as u64 + 1,
        })
    }
}

/// HTTP stub on a local port. Answers each connection with the next canned
/// `(status, json body)`, repeating the last one once the list runs out.
/// Returns the base URL and the request lines it received.
pub async fn serve_canned(responses: Vec<(u16, String)>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        let mut served = 0usize;
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let line = String::from_utf8_lossy(&request).lines().next().unwrap_or("").to_string();
            seen.lock().unwrap().push(line);

            let (status, body) = &responses[served.min(responses.len() - 1)];
            served += 1;
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                _ => "Error",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), requests)
}
