//! Music Catalogue Search Library
//!
//! Full-text name search over artists and albums, backed by a document-search
//! index and hydrated from the authoritative catalogue stores.
//! The binary (`main.rs`) wires these modules into an HTTP service.
//!
//! ## Modules
//! - **`search`**: The query → paginate → classify → hydrate pipeline and its HTTP handlers.
//! - **`index`**: Index backend trait, typed `_search` protocol, REST and in-memory backends.
//! - **`catalog`**: Narrow read access to artist and album records.
//! - **`config`**: Layered service configuration.
//! - **`transport`**: Retrying HTTP client shared by the remote backends.

pub mod catalog;
pub mod config;
pub mod index;
pub mod search;
pub mod transport;
