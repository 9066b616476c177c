//! Shared types for the TITAN-1 uplink: roles, the document store,
//! access policy, redaction, and configuration.

pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod policy;
pub mod redaction;
pub mod role;

pub use config::TitanConfig;
pub use document::{AccessLevel, DocumentRecord, DocumentStore};
pub use error::{Result, TitanError};
pub use role::Role;
