//! Utility functions shared by the HTTP layer and the admin CLI.
//!
//! - [`key_generator`] - Short key derivation and custom key validation

pub mod key_generator;
