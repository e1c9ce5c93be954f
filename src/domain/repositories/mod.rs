//! Repository trait definitions for the domain layer.
//!
//! The domain depends on storage only through these traits. Concrete engines
//! live in `crate::infrastructure::persistence` and are injected at startup.
//!
//! # Available Repositories
//!
//! - [`UrlStore`] - key → URL mappings
//!
//! # Testing
//!
//! Unit tests use the `mockall` generated [`MockUrlStore`]; integration tests
//! in `tests/` run against the in-memory and sled implementations.

pub mod url_store;

pub use url_store::{StoreError, StoreResult, UrlStore};

#[cfg(test)]
pub use url_store::MockUrlStore;
