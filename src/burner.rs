//! Burn tokens in fixed-size batches, one transaction per batch.

use crate::account::{Account, AccountAddress};
use crate::client::{OwnedToken, TransactionService};
use crate::config::BurnConfig;
use crate::error::{BurnError, Result};
use crate::json;
use crate::transaction::{EntryFunction, EntryFunctionId};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Split `items` into contiguous chunks of `chunk_size`; only the last may be shorter.
pub fn chunk_array<T>(items: &[T], chunk_size: usize) -> Result<Vec<&[T]>> {
    if chunk_size == 0 {
        return Err(BurnError::InvalidBatchSize);
    }
    Ok(items.chunks(chunk_size).collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BurnReport {
    /// Every batch executed successfully.
    Completed { batches: usize, burned: usize },
    /// Batch `batch` executed but failed; later batches were not attempted.
    Halted { batch: usize, hash: String, vm_status: String },
}

/// Submit one burn transaction per batch, strictly in order, waiting for each
/// to finalize before building the next.
///
/// Transport and API errors propagate immediately. A batch that finalizes with
/// a failed status stops the loop and is reported as [`BurnReport::Halted`].
pub async fn burn_tokens<S>(
    service: &S,
    account: &Account,
    tokens: &[OwnedToken],
    config: &BurnConfig,
) -> Result<BurnReport>
where
    S: TransactionService + ?Sized,
{
    let function_id: EntryFunctionId = config.burn_function.parse()?;
    let batches = chunk_array(tokens, config.batch_size)?;

    for (i, batch) in batches.iter().enumerate() {
        let ids = batch
            .iter()
            .map(|token| AccountAddress::from_hex(&token.token_data_id))
            .collect::<Result<Vec<_>>>()?;

        let function = EntryFunction::with_address_vector(function_id.clone(), &ids);
        let raw = service.build_entry_function(&account.address, function).await?;

        let simulated = service
            .simulate(&raw.clone().into_simulation(account.public_key_bytes()))
            .await?;
        for sim in &simulated {
            debug!("Simulated batch {}: {}", i, json::to_log_string(sim));
            if !sim.success {
                warn!("Simulation of batch {} reports: {}", i, sim.vm_status);
            }
        }

        let signed = raw.sign(account.keypair());
        let pending = service.submit(&signed).await?;
        info!("transaction batch {}: {}", i, pending.hash);

        let executed = service.wait_for_transaction(&pending.hash).await?;
        if !executed.success {
            error!("Transaction batch {} failed: {}", i, executed.vm_status);
            return Ok(BurnReport::Halted {
                batch: i,
                hash: executed.hash,
                vm_status: executed.vm_status,
            });
        }
        debug!("Batch {} finalized at version {} using {} gas", i, executed.version, executed.gas_used);
    }

    Ok(BurnReport::Completed { batches: batches.len(), burned: tokens.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::testing::{token, FakeTransactionService};
    use crate::transaction::{TransactionAuthenticator, TransactionPayload};

    fn tokens(count: usize) -> Vec<OwnedToken> {
        (0..count).map(|i| token(&format!("0x{:x}", i + 1), "SuperV Sidekicks")).collect()
    }

    fn account() -> Account {
        Account::from_keypair(KeyPair::generate())
    }

    #[test]
    fn test_chunks_concatenate_to_input() {
        let items: Vec<u32> = (0..257).collect();
        for size in [1, 2, 7, 100, 256, 257, 1000] {
            let chunks = chunk_array(&items, size).unwrap();
            let flat: Vec<u32> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
            assert_eq!(flat, items);
            assert!(chunks.iter().all(|c| c.len() <= size));
            let short = chunks.iter().filter(|c| c.len() < size).count();
            assert!(short <= 1);
            if short == 1 {
                assert!(chunks.last().unwrap().len() < size);
            }
        }
    }

    #[test]
    fn test_chunk_edge_cases() {
        let empty: Vec<u8> = Vec::new();
        assert!(chunk_array(&empty, 100).unwrap().is_empty());
        assert!(matches!(chunk_array(&[1, 2], 0), Err(BurnError::InvalidBatchSize)));

        let exact: Vec<u8> = vec![0; 200];
        let chunks = chunk_array(&exact, 100).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[tokio::test]
    async fn test_all_batches_burned_in_order() {
        let service = FakeTransactionService::new();
        let account = account();
        let list = tokens(250);

        let report = burn_tokens(&service, &account, &list, &BurnConfig::default()).await.unwrap();

        assert_eq!(report, BurnReport::Completed { batches: 3, burned: 250 });
        assert_eq!(service.submit_count(), 3);
        assert_eq!(*service.waited.lock().unwrap(), vec!["0xhash0", "0xhash1", "0xhash2"]);

        let built = service.built.lock().unwrap();
        let sizes: Vec<u8> = built.iter().map(|f| f.args[0][0]).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert!(built.iter().all(|f| f.id.function == "batch_delete"));

        // first address of the second batch is token 101
        let second = &built[1].args[0];
        assert_eq!(&second[1..33], AccountAddress::from_hex("0x65").unwrap().as_bytes());
    }

    #[tokio::test]
    async fn test_failed_batch_halts_remaining() {
        let service = FakeTransactionService::new().failing_batch(1);
        let account = account();

        let report = burn_tokens(&service, &account, &tokens(300), &BurnConfig::default())
            .await
            .unwrap();

        assert_eq!(service.submit_count(), 2);
        match report {
            BurnReport::Halted { batch, hash, vm_status } => {
                assert_eq!(batch, 1);
                assert_eq!(hash, "0xhash1");
                assert!(vm_status.contains("E_NOT_OWNER"));
            }
            other => panic!("expected halt, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_error_propagates() {
        let service = FakeTransactionService::new().submit_error_at(0);
        let result = burn_tokens(&service, &account(), &tokens(150), &BurnConfig::default()).await;

        assert!(matches!(result, Err(BurnError::Api { status: 503, .. })));
        assert!(service.waited.lock().unwrap().is_empty());
        assert_eq!(service.built.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submitted_transactions_are_signed_by_account() {
        let service = FakeTransactionService::new();
        let account = account();

        burn_tokens(&service, &account, &tokens(1), &BurnConfig::default()).await.unwrap();

        let submitted = service.submitted.lock().unwrap();
        let signed = &submitted[0];
        assert_eq!(signed.raw.sender, account.address);
        let TransactionPayload::EntryFunction(f) = &signed.raw.payload;
        assert_eq!(f.id.to_string(), BurnConfig::default().burn_function);

        let TransactionAuthenticator::Ed25519 { public_key, signature } = signed.authenticator.clone();
        assert_eq!(public_key, account.public_key_bytes());
        let sig = ed25519_dalek::Signature::from_bytes(&signature);
        assert!(account.keypair().verify(&signed.raw.signing_message(), &sig));
        assert_eq!(*service.simulated.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_no_tokens_means_no_transactions() {
        let service = FakeTransactionService::new();
        let report = burn_tokens(&service, &account(), &[], &BurnConfig::default()).await.unwrap();
        assert_eq!(report, BurnReport::Completed { batches: 0, burned: 0 });
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_token_id_aborts_before_build() {
        let service = FakeTransactionService::new();
        let list = vec![token("not-an-address", "SuperV Sidekicks")];
        let result = burn_tokens(&service, &account(), &list, &BurnConfig::default()).await;
        assert!(matches!(result, Err(BurnError::InvalidAddress(_))));
        assert_eq!(service.call_count(), 0);
    }
}
