use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The entity kinds the catalogue knows how to hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Artist,
    Album,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Artist => write!(f, "artist"),
            EntityKind::Album => write!(f, "album"),
        }
    }
}

/// One row of the classification table: hits coming from `partition` and
/// tagged with `type_tag` belong to `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    pub partition: String,
    pub type_tag: String,
    pub kind: EntityKind,
}

/// What the gateway does when the index backend cannot answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendFailurePolicy {
    /// Report `SearchError::BackendUnavailable` to the caller.
    #[default]
    Surface,
    /// Log the failure and answer with an empty page.
    Degrade,
}

impl FromStr for BackendFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(Self::Surface),
            "degrade" => Ok(Self::Degrade),
            other => Err(anyhow::anyhow!("Unknown backend failure policy: {}", other)),
        }
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed, never empty.
    pub name_entry: String,
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
    /// Partitions to search, in the order they were configured.
    pub partitions: Vec<String>,
}

/// A single match as reported by the index backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
    pub partition: String,
    pub type_tag: String,
    pub id: String,
    pub source: Map<String, Value>,
}

/// Hits for one page plus the backend's total match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub total: u64,
    pub hits: Vec<RawHit>,
}

/// A hit enriched with display fields.
///
/// `image_url` and `slug` stay unset when the hit is unclassified or its
/// authoritative record could not be found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub kind: Option<EntityKind>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub slug: Option<String>,
    /// Remaining fields of the indexed document.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_number: u32,
    pub per_page: u32,
    pub total_matches: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub results: Vec<SearchResult>,
    /// `None` only when the backend failed and the gateway degraded.
    pub pagination: Option<Pagination>,
}

impl ResultPage {
    pub fn empty() -> Self {
        Self::default()
    }
}
