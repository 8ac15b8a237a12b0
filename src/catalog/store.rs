use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record, or the projected subset of it.
pub type Document = Map<String, Value>;

/// Read-only access to one entity kind's authoritative records.
///
/// `fields` restricts the returned document to the named fields; fields the
/// record does not have are simply left out.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_by_id(&self, id: &str, fields: &[&str]) -> Result<Option<Document>>;
}

/// Names of the store fields the hydrator reads for a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub image_field: String,
    pub slug_name_field: String,
    pub slug_postfix_field: String,
}

impl Projection {
    pub fn new(image_field: &str) -> Self {
        Self {
            image_field: image_field.to_string(),
            slug_name_field: "slug_name".to_string(),
            slug_postfix_field: "slug_postfix".to_string(),
        }
    }

    pub fn artist() -> Self {
        Self::new("profile_image_url")
    }

    pub fn album() -> Self {
        Self::new("cover_image_url")
    }

    pub fn fields(&self) -> [&str; 3] {
        [
            self.image_field.as_str(),
            self.slug_name_field.as_str(),
            self.slug_postfix_field.as_str(),
        ]
    }
}

/// Copies the requested fields out of a full record.
pub fn project(record: &Document, fields: &[&str]) -> Document {
    fields
        .iter()
        .filter_map(|field| {
            record
                .get(*field)
                .map(|value| (field.to_string(), value.clone()))
        })
        .collect()
}
