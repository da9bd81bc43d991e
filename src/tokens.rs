//! Enumerate the tokens of one collection owned by an account.

use crate::account::AccountAddress;
use crate::client::{AssetIndexer, OwnedToken};
use crate::config::BurnConfig;
use crate::error::{BurnError, Result};
use tracing::info;

/// Page through everything `owner` holds and keep the tokens whose collection
/// is `config.collection_name`, in the order the indexer returned them.
///
/// Paging stops at the first page shorter than `config.page_size`. Any
/// indexer error aborts the whole enumeration.
pub async fn list_collection_tokens<I>(
    indexer: &I,
    owner: &AccountAddress,
    config: &BurnConfig,
) -> Result<Vec<OwnedToken>>
where
    I: AssetIndexer + ?Sized,
{
    if config.page_size == 0 {
        return Err(BurnError::InvalidPageSize);
    }

    let mut offset = 0u64;
    let mut pages = 0u64;
    let mut matched = Vec::new();

    loop {
        if pages >= config.max_pages {
            return Err(BurnError::PageLimit(pages));
        }

        let page = indexer.owned_digital_assets(owner, offset, config.page_size).await?;
        pages += 1;
        let page_len = page.len() as u64;

        for token in page {
            if token.collection_name() == Some(config.collection_name.as_str()) {
                info!("{}", token.token_data_id);
                matched.push(token);
            }
        }

        if page_len < config.page_size {
            break;
        }
        offset += config.page_size;
    }

    info!("Total {}: {} in {}", config.collection_name, matched.len(), owner);
    Ok(matched)
}
