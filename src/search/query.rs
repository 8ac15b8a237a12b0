use serde::{Deserialize, Serialize};

/// Index query payload: `{"match": {"name": <entry>}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "match")]
    pub match_clause: MatchClause,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClause {
    pub name: String,
}

/// Builds a match query on the indexed `name` field.
///
/// The entry is passed through as-is; tokenization is left to the backend.
pub fn build(name_entry: &str) -> Query {
    Query {
        match_clause: MatchClause {
            name: name_entry.to_string(),
        },
    }
}
