//! Search Service Module
//!
//! Turns a free-text name query into a page of hydrated artist and album results.
//!
//! ## Pipeline
//! 1. **Validate**: the name entry must be non-empty, page and per-page positive.
//! 2. **Query**: a single `match` query on `name`, offset and size from the page.
//! 3. **Classify**: each hit's `(partition, type)` pair is looked up in a configured table.
//! 4. **Hydrate**: classified hits get image URL and slug from the owning store.
//! 5. **Assemble**: results in backend order plus pagination metadata.
//!
//! ## Submodules
//! - **`gateway`**: Orchestrates the pipeline; `search_all`, `search_albums`, `search_artists`.
//! - **`query`**: Builds the index query payload.
//! - **`pagination`**: Offset and page-count arithmetic.
//! - **`classifier`**: The `(partition, type)` → entity kind table.
//! - **`hydrator`**: Enriches hits from the catalogue stores.
//! - **`slug`**: Slug joining rule.
//! - **`error`**: `SearchError` and its HTTP mapping.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Request, hit and result types.

pub mod classifier;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod hydrator;
pub mod pagination;
pub mod query;
pub mod slug;
pub mod types;
