use crate::error::CatalogError;
use crate::models::book::{BookRecord, SearchField};
use crate::models::volumes::{Volume, VolumesResponse};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const MAX_RESULTS: usize = 10;

/// Anything that can answer a book search. Failures are absorbed: an
/// unreachable or broken catalog looks like one with no matches.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(&self, query: &str, field: SearchField) -> Vec<BookRecord>;
}

pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// One GET against the volumes endpoint, surfacing every failure.
    pub async fn fetch(
        &self,
        query: &str,
        field: SearchField,
    ) -> Result<Vec<BookRecord>, CatalogError> {
        let q = format!("{}:{}", field.token(), query);
        let max_results = MAX_RESULTS.to_string();

        info!("Searching catalog for {}", q);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", q.as_str()), ("maxResults", max_results.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let volumes: VolumesResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                CatalogError::Parse(e)
            } else {
                CatalogError::Transport(e)
            }
        })?;

        let Some(items) = volumes.items else {
            info!("No items found for {}", q);
            return Ok(Vec::new());
        };

        debug!(
            "Catalog reported {} total items, received {}",
            volumes.total_items,
            items.len()
        );

        Ok(map_items(items))
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search(&self, query: &str, field: SearchField) -> Vec<BookRecord> {
        match self.fetch(query, field).await {
            Ok(books) => books,
            Err(e) => {
                error!("Error fetching books: {}", e);
                Vec::new()
            }
        }
    }
}

/// Maps raw items one by one, so a single malformed item only costs itself.
pub fn map_items(items: Vec<serde_json::Value>) -> Vec<BookRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match Volume::deserialize(item) {
            Ok(volume) => Some(BookRecord::from(volume)),
            Err(e) => {
                warn!("Skipping malformed catalog item {}: {}", position, e);
                None
            }
        })
        .take(MAX_RESULTS)
        .collect()
}
