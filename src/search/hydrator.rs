use super::slug::slug_from_fields;
use super::types::{EntityKind, RawHit, SearchResult};
use crate::catalog::store::{Document, EntityStore, Projection};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Keys of `SearchResult` itself; source fields with these names are not
/// copied into the flattened extras.
const RESERVED_FIELDS: [&str; 6] = ["id", "type", "kind", "name", "image_url", "slug"];

/// The store and projection used to hydrate one entity kind.
#[derive(Clone)]
pub struct EntitySource {
    pub store: Arc<dyn EntityStore>,
    pub projection: Projection,
}

/// Enriches raw hits with display fields from the owning entity's store.
///
/// Each hit costs at most one read. A missing record or a failed lookup only
/// leaves that hit's `image_url` and `slug` unset.
#[derive(Clone, Default)]
pub struct ResultHydrator {
    sources: HashMap<EntityKind, EntitySource>,
}

impl ResultHydrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(
        mut self,
        kind: EntityKind,
        store: Arc<dyn EntityStore>,
        projection: Projection,
    ) -> Self {
        self.sources.insert(kind, EntitySource { store, projection });
        self
    }

    pub async fn hydrate(&self, hit: RawHit, kind: Option<EntityKind>) -> SearchResult {
        let Some(kind) = kind else {
            tracing::debug!(
                "Hit {} is unclassified ({}/{}), skipping hydration",
                hit.id,
                hit.partition,
                hit.type_tag
            );
            return map_source_fields(hit, None);
        };
        let mut result = map_source_fields(hit, Some(kind));

        let Some(source) = self.sources.get(&kind) else {
            tracing::debug!("No store registered for {}, hit {} left raw", kind, result.id);
            return result;
        };

        match source
            .store
            .get_by_id(&result.id, &source.projection.fields())
            .await
        {
            Ok(Some(record)) => apply_record(&mut result, &record, &source.projection),
            Ok(None) => {
                tracing::debug!("No {} record for indexed id {}", kind, result.id);
            }
            Err(e) => {
                tracing::warn!("Failed to look up {} {}: {:#}", kind, result.id, e);
            }
        }

        result
    }
}

/// Copies envelope and source fields onto a fresh result.
fn map_source_fields(hit: RawHit, kind: Option<EntityKind>) -> SearchResult {
    let RawHit {
        type_tag,
        id,
        mut source,
        ..
    } = hit;

    let name = match source.remove("name") {
        Some(Value::String(name)) => Some(name),
        Some(other) if !other.is_null() => Some(other.to_string()),
        _ => None,
    };
    for reserved in RESERVED_FIELDS {
        source.remove(reserved);
    }

    SearchResult {
        id,
        type_tag,
        kind,
        name,
        image_url: None,
        slug: None,
        fields: source,
    }
}

fn apply_record(result: &mut SearchResult, record: &Document, projection: &Projection) {
    result.image_url = record
        .get(&projection.image_field)
        .and_then(Value::as_str)
        .map(str::to_string);
    result.slug = slug_from_fields(
        record.get(&projection.slug_name_field),
        record.get(&projection.slug_postfix_field),
    );
}
