//! Organizr core - configuration and domain model shared across crates.

pub mod config;
pub mod error;
pub mod model;
