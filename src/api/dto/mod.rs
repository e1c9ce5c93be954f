//! Data Transfer Objects for API request/response serialization.

pub mod shorten;

pub use shorten::{ShortenRequest, ShortenResponse};
