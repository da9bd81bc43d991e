use crate::account::Account;
use crate::burner::{burn_tokens, BurnReport};
use crate::cli::{keys, Cli};
use crate::client::{AssetIndexer, TransactionService};
use crate::config::BurnConfig;
use crate::error::Result;
use crate::tokens::list_collection_tokens;
use tracing::info;

/// Resolve the key, enumerate the collection, burn it.
///
/// Key problems are reported before either client is touched.
pub async fn handle_burn_command<I, S>(
    cli: &Cli,
    indexer: &I,
    service: &S,
    config: &BurnConfig,
) -> Result<BurnReport>
where
    I: AssetIndexer + ?Sized,
    S: TransactionService + ?Sized,
{
    let secret = keys::resolve_secret_key(cli)?;
    let account = Account::from_private_key_hex(&secret)?;
    info!("Signer address: {}", account.address);

    let tokens = list_collection_tokens(indexer, &account.address, config).await?;
    burn_tokens(service, &account, &tokens, config).await
}
