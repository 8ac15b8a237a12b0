use super::backend::IndexBackend;
use super::protocol::{SearchRequest, SearchResponseBody};
use crate::search::types::SearchHits;
use crate::transport::{RetryingClient, normalize_base_url};

use anyhow::Result;
use async_trait::async_trait;

/// Client for an Elasticsearch-compatible `_search` REST endpoint.
pub struct ElasticsearchBackend {
    client: RetryingClient,
    base_url: String,
}

impl ElasticsearchBackend {
    pub fn new(client: RetryingClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn search_url(&self, partitions: &[String]) -> String {
        format!("{}/{}/_search", self.base_url, partitions.join(","))
    }
}

#[async_trait]
impl IndexBackend for ElasticsearchBackend {
    async fn search(&self, partitions: &[String], request: &SearchRequest) -> Result<SearchHits> {
        if partitions.is_empty() {
            return Err(anyhow::anyhow!("No partitions to search"));
        }

        let url = self.search_url(partitions);
        let response = self.client.post_json(&url, request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Search request failed {}: {}", status, body));
        }

        let body: SearchResponseBody = response.json().await?;
        Ok(SearchHits::from(body))
    }
}
