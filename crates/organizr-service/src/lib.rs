//! Organizr service - recurrence expansion and time-windowed querying.
//!
//! The entry points are [`query::QueryService`] for executing queries
//! against an [`store::EntryStore`] collaborator, and
//! [`recurrence::validate_rule`] for checking rule text on write paths.

pub mod error;
pub mod query;
pub mod recurrence;
pub mod store;
