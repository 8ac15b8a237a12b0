use super::types::{ClassificationEntry, EntityKind, RawHit};
use std::collections::HashMap;

/// Maps a hit's `(partition, type tag)` pair onto an entity kind.
///
/// The table is supplied by configuration. Besides classifying hits it also
/// answers which partitions hold a given kind, so the gateway never needs to
/// know partition names itself.
#[derive(Debug, Clone, Default)]
pub struct HitClassifier {
    entries: Vec<ClassificationEntry>,
    lookup: HashMap<String, HashMap<String, EntityKind>>,
}

impl HitClassifier {
    /// Builds the table. When the same pair appears twice the first entry wins.
    pub fn new(entries: impl IntoIterator<Item = ClassificationEntry>) -> Self {
        let mut classifier = Self::default();
        for entry in entries {
            let by_type = classifier.lookup.entry(entry.partition.clone()).or_default();
            if by_type.contains_key(&entry.type_tag) {
                tracing::warn!(
                    "Ignoring duplicate classification entry {}/{}",
                    entry.partition,
                    entry.type_tag
                );
                continue;
            }
            by_type.insert(entry.type_tag.clone(), entry.kind);
            classifier.entries.push(entry);
        }
        classifier
    }

    /// Returns `None` for hits whose pair is not in the table.
    pub fn classify(&self, hit: &RawHit) -> Option<EntityKind> {
        self.lookup
            .get(&hit.partition)
            .and_then(|by_type| by_type.get(&hit.type_tag))
            .copied()
    }

    /// Every configured partition, first-seen order, without duplicates.
    pub fn partitions(&self) -> Vec<String> {
        self.collect_partitions(|_| true)
    }

    /// Partitions holding documents of `kind`, first-seen order.
    pub fn partitions_for(&self, kind: EntityKind) -> Vec<String> {
        self.collect_partitions(|entry| entry.kind == kind)
    }

    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }

    fn collect_partitions(&self, keep: impl Fn(&ClassificationEntry) -> bool) -> Vec<String> {
        let mut partitions: Vec<String> = Vec::new();
        for entry in self.entries.iter().filter(|e| keep(e)) {
            if !partitions.contains(&entry.partition) {
                partitions.push(entry.partition.clone());
            }
        }
        partitions
    }
}
