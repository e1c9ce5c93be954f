//! Business logic services for the application layer.

pub mod redirect_service;
pub mod shorten_service;

pub use redirect_service::{RedirectService, Resolution};
pub use shorten_service::ShortenService;
