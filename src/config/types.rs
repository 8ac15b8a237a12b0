use crate::catalog::store::Projection;
use crate::search::types::{BackendFailurePolicy, ClassificationEntry, EntityKind};
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP API listens on.
    pub bind: SocketAddr,
    pub index: IndexConfig,
    #[serde(deserialize_with = "artists_config")]
    pub artists: EntityConfig,
    #[serde(deserialize_with = "albums_config")]
    pub albums: EntityConfig,
    /// Explicit classification table. When absent it is derived from the
    /// `artists` and `albums` partition/type pairs.
    pub classification: Option<Vec<ClassificationEntry>>,
    pub search: SearchSettings,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub retry_attempts: usize,
}

/// Where one entity kind lives: its index partition and its record store.
///
/// Inside `AppConfig` a partial block only replaces the fields it names; the
/// rest keep that kind's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub partition: String,
    pub type_tag: String,
    pub store_url: String,
    pub projection: Projection,
}

/// Optional fields of an `EntityConfig` block.
#[derive(Debug, Deserialize)]
struct EntityConfigPatch {
    partition: Option<String>,
    type_tag: Option<String>,
    store_url: Option<String>,
    projection: Option<Projection>,
}

impl EntityConfigPatch {
    fn apply(self, mut base: EntityConfig) -> EntityConfig {
        if let Some(partition) = self.partition {
            base.partition = partition;
        }
        if let Some(type_tag) = self.type_tag {
            base.type_tag = type_tag;
        }
        if let Some(store_url) = self.store_url {
            base.store_url = store_url;
        }
        if let Some(projection) = self.projection {
            base.projection = projection;
        }
        base
    }
}

fn artists_config<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntityConfig, D::Error> {
    Ok(EntityConfigPatch::deserialize(deserializer)?.apply(EntityConfig::artists()))
}

fn albums_config<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntityConfig, D::Error> {
    Ok(EntityConfigPatch::deserialize(deserializer)?.apply(EntityConfig::albums()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_page: u32,
    pub default_per_page: u32,
    pub failure_policy: BackendFailurePolicy,
    /// Hydrate the hits of one page concurrently. Result order is unchanged.
    pub concurrent_hydration: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            index: IndexConfig::default(),
            artists: EntityConfig::artists(),
            albums: EntityConfig::albums(),
            classification: None,
            search: SearchSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            timeout_ms: 2000,
            retry_attempts: 3,
        }
    }
}

impl EntityConfig {
    pub fn artists() -> Self {
        Self {
            partition: "artists".to_string(),
            type_tag: "artist".to_string(),
            store_url: "http://localhost:8081/artists".to_string(),
            projection: Projection::artist(),
        }
    }

    pub fn albums() -> Self {
        Self {
            partition: "albums".to_string(),
            type_tag: "album".to_string(),
            store_url: "http://localhost:8081/albums".to_string(),
            projection: Projection::album(),
        }
    }

    pub fn classification_entry(&self, kind: EntityKind) -> ClassificationEntry {
        ClassificationEntry {
            partition: self.partition.clone(),
            type_tag: self.type_tag.clone(),
            kind,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_per_page: 5,
            failure_policy: BackendFailurePolicy::default(),
            concurrent_hydration: false,
        }
    }
}
