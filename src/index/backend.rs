use super::protocol::SearchRequest;
use crate::search::types::SearchHits;

use anyhow::Result;
use async_trait::async_trait;

/// A document-search backend able to run one query over several partitions.
///
/// Any `Err` is treated by the gateway as the backend being unavailable.
#[async_trait]
pub trait IndexBackend: Send + Sync {
    async fn search(&self, partitions: &[String], request: &SearchRequest) -> Result<SearchHits>;
}
