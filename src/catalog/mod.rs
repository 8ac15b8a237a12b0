//! Catalogue Store Module
//!
//! Read access to the authoritative artist and album records that search hits
//! are hydrated from.
//!
//! ## Submodules
//! - **`store`**: The `EntityStore` capability trait and field projections.
//! - **`http`**: Client for a REST document store.
//! - **`memory`**: `DashMap`-backed store for tests and local runs.

pub mod http;
pub mod memory;
pub mod store;
