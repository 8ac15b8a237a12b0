use super::store::{Document, EntityStore, project};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Process-local record store keyed by entity id.
#[derive(Default)]
pub struct InMemoryEntityStore {
    records: DashMap<String, Document>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, record: Document) {
        self.records.insert(id.to_string(), record);
    }

    pub fn remove(&self, id: &str) -> Option<Document> {
        self.records.remove(id).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn get_by_id(&self, id: &str, fields: &[&str]) -> Result<Option<Document>> {
        Ok(self
            .records
            .get(id)
            .map(|record| project(record.value(), fields)))
    }
}
