//! Search Index Module
//!
//! Everything that talks to the document-search index.
//!
//! ## Submodules
//! - **`backend`**: The `IndexBackend` trait the gateway queries through.
//! - **`protocol`**: Typed request/response bodies of the `_search` endpoint.
//! - **`http`**: Elasticsearch-compatible REST client.
//! - **`memory`**: In-process index used by tests and local runs.
//! - **`tokenizer`**: Word splitting for the in-process `match` emulation.

pub mod backend;
pub mod http;
pub mod memory;
pub mod protocol;
pub mod tokenizer;

#[cfg(test)]
mod tests;
