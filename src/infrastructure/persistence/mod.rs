//! URL store implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::UrlStore`].
//!
//! # Stores
//!
//! - [`SledUrlStore`] - Embedded on-disk ordered key-value engine
//! - [`InMemoryUrlStore`] - Ordered map for tests and ephemeral deployments

pub mod memory_url_store;
pub mod sled_url_store;

pub use memory_url_store::InMemoryUrlStore;
pub use sled_url_store::SledUrlStore;
