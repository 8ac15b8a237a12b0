//! Service Configuration
//!
//! `AppConfig` is assembled in layers, later layers winning:
//! 1. Built-in defaults (local index on `:9200`, `artists`/`albums` partitions).
//! 2. An optional JSON file.
//! 3. `MUSIC_SEARCH_*` environment variables.
//!
//! Command-line flags are applied on top by the binary.

pub mod types;


use crate::search::classifier::HitClassifier;
use crate::search::types::{ClassificationEntry, EntityKind};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use types::AppConfig;

pub const ENV_CONFIG_PATH: &str = "MUSIC_SEARCH_CONFIG";
pub const ENV_BIND: &str = "MUSIC_SEARCH_BIND";
pub const ENV_INDEX_URL: &str = "MUSIC_SEARCH_INDEX_URL";
pub const ENV_ARTIST_STORE_URL: &str = "MUSIC_SEARCH_ARTIST_STORE_URL";
pub const ENV_ALBUM_STORE_URL: &str = "MUSIC_SEARCH_ALBUM_STORE_URL";
pub const ENV_FAILURE_POLICY: &str = "MUSIC_SEARCH_FAILURE_POLICY";
pub const ENV_LOG_LEVEL: &str = "MUSIC_SEARCH_LOG_LEVEL";

impl AppConfig {
    /// Loads defaults, then `path` (or `MUSIC_SEARCH_CONFIG`), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(ENV_CONFIG_PATH).ok();
        let path = path.or(env_path.as_deref().map(Path::new));

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind = bind
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_BIND, bind))?;
        }
        if let Some(url) = lookup(ENV_INDEX_URL) {
            self.index.url = url;
        }
        if let Some(url) = lookup(ENV_ARTIST_STORE_URL) {
            self.artists.store_url = url;
        }
        if let Some(url) = lookup(ENV_ALBUM_STORE_URL) {
            self.albums.store_url = url;
        }
        if let Some(policy) = lookup(ENV_FAILURE_POLICY) {
            self.search.failure_policy = policy.parse()?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.default_page == 0 {
            anyhow::bail!("search.default_page must be greater than zero");
        }
        if self.search.default_per_page == 0 {
            anyhow::bail!("search.default_per_page must be greater than zero");
        }

        let entries = self.classification_entries();
        if entries.is_empty() {
            anyhow::bail!("classification table is empty");
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.partition.trim().is_empty() || entry.type_tag.trim().is_empty() {
                anyhow::bail!("classification entry for {} has an empty partition or type", entry.kind);
            }
            if !seen.insert((entry.partition.as_str(), entry.type_tag.as_str())) {
                anyhow::bail!(
                    "duplicate classification entry {}/{}",
                    entry.partition,
                    entry.type_tag
                );
            }
        }

        self.log_level()?;
        Ok(())
    }

    /// The explicit table, or one row per configured entity kind.
    pub fn classification_entries(&self) -> Vec<ClassificationEntry> {
        match &self.classification {
            Some(entries) => entries.clone(),
            None => vec![
                self.artists.classification_entry(EntityKind::Artist),
                self.albums.classification_entry(EntityKind::Album),
            ],
        }
    }

    pub fn classifier(&self) -> HitClassifier {
        HitClassifier::new(self.classification_entries())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.index.timeout_ms)
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.log_level))
    }
}
