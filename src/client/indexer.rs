// GraphQL client for the Aptos indexer
use crate::account::AccountAddress;
use crate::client::AssetIndexer;
use crate::error::{BurnError, Result};
use crate::json::u64_str;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const OWNED_DIGITAL_ASSETS_QUERY: &str = r#"
query getOwnedDigitalAssets(
  $where_condition: current_token_ownerships_v2_bool_exp!
  $offset: Int
  $limit: Int
  $order_by: [current_token_ownerships_v2_order_by!]
) {
  current_token_ownerships_v2(
    where: $where_condition
    offset: $offset
    limit: $limit
    order_by: $order_by
  ) {
    token_data_id
    amount
    owner_address
    current_token_data {
      token_name
      current_collection {
        collection_name
        creator_address
      }
    }
  }
}
"#;

/// One row of `current_token_ownerships_v2`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OwnedToken {
    pub token_data_id: String,
    #[serde(with = "u64_str")]
    pub amount: u64,
    #[serde(default)]
    pub current_token_data: Option<TokenData>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TokenData {
    pub token_name: String,
    #[serde(default)]
    pub current_collection: Option<CollectionData>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CollectionData {
    pub collection_name: String,
    #[serde(default)]
    pub creator_address: Option<String>,
}

impl OwnedToken {
    pub fn collection_name(&self) -> Option<&str> {
        self.current_token_data
            .as_ref()?
            .current_collection
            .as_ref()
            .map(|c| c.collection_name.as_str())
    }
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct OwnedDigitalAssets {
    current_token_ownerships_v2: Vec<OwnedToken>,
}

pub struct IndexerClient {
    url: String,
    client: Client,
}

impl IndexerClient {
    pub fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { url, client })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let response = self.client
            .post(&self.url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BurnError::Api { status: status.as_u16(), message });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(BurnError::Indexer(messages.join("; ")));
        }
        body.data.ok_or_else(|| BurnError::MalformedResponse("GraphQL response without data".to_string()))
    }
}

/// Variables for the owned-assets query. Ordering by `token_data_id` keeps
/// offset paging stable between requests.
pub fn owned_assets_variables(owner: &AccountAddress, offset: u64, limit: u64) -> serde_json::Value {
    json!({
        "where_condition": {
            "owner_address": { "_eq": owner.to_string() },
            "amount": { "_gt": 0 },
        },
        "offset": offset,
        "limit": limit,
        "order_by": [{ "token_data_id": "asc" }],
    })
}

#[async_trait]
impl AssetIndexer for IndexerClient {
    async fn owned_digital_assets(
        &self,
        owner: &AccountAddress,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OwnedToken>> {
        let data: OwnedDigitalAssets = self
            .query(OWNED_DIGITAL_ASSETS_QUERY, owned_assets_variables(owner, offset, limit))
            .await?;
        Ok(data.current_token_ownerships_v2)
    }
}
