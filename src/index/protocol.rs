//! Index Wire Protocol
//!
//! Request and response bodies of the document-search `_search` endpoint.
//!
//! The response is decoded into typed envelopes here and converted into
//! `SearchHits`, so nothing past this module touches raw JSON paths.

use crate::search::query::Query;
use crate::search::types::{RawHit, SearchHits};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tag reported by backends that no longer have mapping types.
pub const DEFAULT_TYPE_TAG: &str = "_doc";

/// Body of `POST /<partitions>/_search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Query,
    pub from: u64,
    pub size: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponseBody {
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope {
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<HitEnvelope>,
}

/// Older backends report a bare number, newer ones `{value, relation}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Detailed { value: u64, relation: Option<String> },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Detailed { value, .. } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HitEnvelope {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub type_tag: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

impl From<HitEnvelope> for RawHit {
    fn from(hit: HitEnvelope) -> Self {
        RawHit {
            partition: hit.index,
            type_tag: hit
                .type_tag
                .unwrap_or_else(|| DEFAULT_TYPE_TAG.to_string()),
            id: hit.id,
            source: hit.source.unwrap_or_default(),
        }
    }
}

impl From<SearchResponseBody> for SearchHits {
    fn from(body: SearchResponseBody) -> Self {
        SearchHits {
            total: body.hits.total.value(),
            hits: body.hits.hits.into_iter().map(RawHit::from).collect(),
        }
    }
}
