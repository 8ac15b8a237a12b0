use super::classifier::HitClassifier;
use super::error::SearchError;
use super::hydrator::ResultHydrator;
use super::types::{BackendFailurePolicy, EntityKind, RawHit, ResultPage, SearchQuery, SearchResult};
use super::{pagination, query};
use crate::config::types::SearchSettings;
use crate::index::backend::IndexBackend;
use crate::index::protocol::SearchRequest;

use std::sync::Arc;
use uuid::Uuid;

/// Which partitions a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Every partition in the classification table.
    All,
    /// Only the partitions holding one kind.
    Kind(EntityKind),
}

/// Entry point of the search pipeline.
///
/// Holds no per-request state, so one instance is shared by all handlers.
pub struct SearchGateway {
    backend: Arc<dyn IndexBackend>,
    classifier: HitClassifier,
    hydrator: ResultHydrator,
    settings: SearchSettings,
}

impl SearchGateway {
    pub fn new(
        backend: Arc<dyn IndexBackend>,
        classifier: HitClassifier,
        hydrator: ResultHydrator,
        settings: SearchSettings,
    ) -> Self {
        Self {
            backend,
            classifier,
            hydrator,
            settings,
        }
    }

    /// Finds artists and albums whose name matches `name_entry`.
    pub async fn search_all(
        &self,
        name_entry: Option<&str>,
        per_page: Option<i64>,
        page: Option<i64>,
    ) -> Result<ResultPage, SearchError> {
        self.search(SearchScope::All, name_entry, per_page, page).await
    }

    pub async fn search_albums(
        &self,
        name_entry: Option<&str>,
        per_page: Option<i64>,
        page: Option<i64>,
    ) -> Result<ResultPage, SearchError> {
        self.search(SearchScope::Kind(EntityKind::Album), name_entry, per_page, page)
            .await
    }

    pub async fn search_artists(
        &self,
        name_entry: Option<&str>,
        per_page: Option<i64>,
        page: Option<i64>,
    ) -> Result<ResultPage, SearchError> {
        self.search(SearchScope::Kind(EntityKind::Artist), name_entry, per_page, page)
            .await
    }

    pub async fn search(
        &self,
        scope: SearchScope,
        name_entry: Option<&str>,
        per_page: Option<i64>,
        page: Option<i64>,
    ) -> Result<ResultPage, SearchError> {
        let query = self.prepare(scope, name_entry, per_page, page)?;
        self.execute(query).await
    }

    /// Validates caller input and applies defaults. Never touches the backend.
    pub fn prepare(
        &self,
        scope: SearchScope,
        name_entry: Option<&str>,
        per_page: Option<i64>,
        page: Option<i64>,
    ) -> Result<SearchQuery, SearchError> {
        let name_entry = name_entry.map(str::trim).unwrap_or_default();
        if name_entry.is_empty() {
            return Err(SearchError::InvalidArgument(
                "Name entry can not be empty".to_string(),
            ));
        }

        let page = positive(page, self.settings.default_page, "Page")?;
        let per_page = positive(per_page, self.settings.default_per_page, "Per page value")?;

        let partitions = match scope {
            SearchScope::All => self.classifier.partitions(),
            SearchScope::Kind(kind) => self.classifier.partitions_for(kind),
        };

        Ok(SearchQuery {
            name_entry: name_entry.to_string(),
            page,
            per_page,
            partitions,
        })
    }

    async fn execute(&self, search: SearchQuery) -> Result<ResultPage, SearchError> {
        let request_id = Uuid::new_v4();

        if search.partitions.is_empty() {
            tracing::warn!("[{}] No partitions configured for this search scope", request_id);
            return Ok(ResultPage {
                results: Vec::new(),
                pagination: Some(pagination::describe(search.page, search.per_page, 0)),
            });
        }

        let request = SearchRequest {
            query: query::build(&search.name_entry),
            from: pagination::offset(search.page, search.per_page),
            size: search.per_page,
        };

        tracing::info!(
            "[{}] Searching {:?} for {:?} (page {}, {} per page)",
            request_id,
            search.partitions,
            search.name_entry,
            search.page,
            search.per_page
        );

        let response = match self.backend.search(&search.partitions, &request).await {
            Ok(response) => response,
            Err(e) => {
                return match self.settings.failure_policy {
                    BackendFailurePolicy::Degrade => {
                        tracing::warn!(
                            "[{}] Can not get search response, returning empty page: {:#}",
                            request_id,
                            e
                        );
                        Ok(ResultPage::empty())
                    }
                    BackendFailurePolicy::Surface => {
                        tracing::error!("[{}] Search backend failed: {:#}", request_id, e);
                        Err(SearchError::BackendUnavailable(format!("{:#}", e)))
                    }
                };
            }
        };

        let results = if response.total == 0 {
            Vec::new()
        } else {
            self.hydrate_all(response.hits).await
        };

        tracing::info!(
            "[{}] Returning {} of {} matches",
            request_id,
            results.len(),
            response.total
        );

        Ok(ResultPage {
            results,
            pagination: Some(pagination::describe(
                search.page,
                search.per_page,
                response.total,
            )),
        })
    }

    /// Classifies and hydrates hits, keeping backend order either way.
    async fn hydrate_all(&self, hits: Vec<RawHit>) -> Vec<SearchResult> {
        if self.settings.concurrent_hydration {
            let pending = hits.into_iter().map(|hit| self.process_hit(hit));
            return futures::future::join_all(pending).await;
        }

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            results.push(self.process_hit(hit).await);
        }
        results
    }

    async fn process_hit(&self, hit: RawHit) -> SearchResult {
        let kind = self.classifier.classify(&hit);
        self.hydrator.hydrate(hit, kind).await
    }
}

fn positive(value: Option<i64>, default: u32, label: &str) -> Result<u32, SearchError> {
    let value = value.unwrap_or(i64::from(default));
    if value <= 0 {
        return Err(SearchError::InvalidArgument(format!(
            "{} must be greater than zero",
            label
        )));
    }
    u32::try_from(value)
        .map_err(|_| SearchError::InvalidArgument(format!("{} is too large", label)))
}
