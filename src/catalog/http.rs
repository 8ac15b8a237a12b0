use super::store::{Document, EntityStore, project};
use crate::transport::{RetryingClient, normalize_base_url};

use anyhow::Result;
use async_trait::async_trait;

/// Document-store client speaking `GET <base>/<id>?fields=a,b,c`.
///
/// A 404 means the record does not exist. The response is projected again on
/// our side in case the store ignores the `fields` parameter.
pub struct HttpEntityStore {
    client: RetryingClient,
    base_url: String,
}

impl HttpEntityStore {
    pub fn new(client: RetryingClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/<id>` with the id as one escaped path segment.
    pub fn record_url(&self, id: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Store URL can not be a base: {}", self.base_url))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl EntityStore for HttpEntityStore {
    async fn get_by_id(&self, id: &str, fields: &[&str]) -> Result<Option<Document>> {
        let url = self.record_url(id)?;
        let response = self
            .client
            .get(url.as_str(), &[("fields", fields.join(","))])
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Store lookup for {} failed {}",
                id,
                response.status()
            ));
        }

        let record: Document = response.json().await?;
        Ok(Some(project(&record, fields)))
    }
}
