use super::backend::IndexBackend;
use super::protocol::SearchRequest;
use super::tokenizer::{token_set, tokenize};
use crate::search::types::{RawHit, SearchHits};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
struct IndexedDocument {
    id: String,
    type_tag: String,
    source: Map<String, Value>,
}

/// Process-local index emulating a `match` query on the `name` field.
///
/// A document matches when its name shares at least one token with the query.
/// Matches are ranked by the number of shared tokens; ties keep partition order
/// (as requested) and then insertion order.
#[derive(Default)]
pub struct InMemoryIndex {
    partitions: DashMap<String, Vec<IndexedDocument>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, replacing any previous one with the same id in that partition.
    pub fn insert(&self, partition: &str, type_tag: &str, id: &str, source: Map<String, Value>) {
        let mut docs = self.partitions.entry(partition.to_string()).or_default();
        let doc = IndexedDocument {
            id: id.to_string(),
            type_tag: type_tag.to_string(),
            source,
        };
        match docs.iter().position(|d| d.id == id) {
            Some(pos) => docs[pos] = doc,
            None => docs.push(doc),
        }
    }

    pub fn document_count(&self, partition: &str) -> usize {
        self.partitions
            .get(partition)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl IndexBackend for InMemoryIndex {
    async fn search(&self, partitions: &[String], request: &SearchRequest) -> Result<SearchHits> {
        let query_tokens = tokenize(&request.query.match_clause.name);

        let mut scored: Vec<(usize, RawHit)> = Vec::new();
        for partition in partitions {
            let Some(docs) = self.partitions.get(partition) else {
                continue;
            };
            for doc in docs.iter() {
                let name = doc.source.get("name").and_then(Value::as_str).unwrap_or("");
                let name_tokens = token_set(name);
                let score = query_tokens
                    .iter()
                    .filter(|token| name_tokens.contains(*token))
                    .count();
                if score > 0 {
                    scored.push((
                        score,
                        RawHit {
                            partition: partition.clone(),
                            type_tag: doc.type_tag.clone(),
                            id: doc.id.clone(),
                            source: doc.source.clone(),
                        },
                    ));
                }
            }
        }

        // Stable sort keeps partition and insertion order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let total = scored.len() as u64;
        let hits = scored
            .into_iter()
            .skip(usize::try_from(request.from).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .map(|(_, hit)| hit)
            .collect();

        Ok(SearchHits { total, hits })
    }
}
