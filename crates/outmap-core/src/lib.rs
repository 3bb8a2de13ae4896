//! Core contracts and helpers for Outmap.
//!
//! This crate defines the table-configuration model, restricted-column
//! sanitation, and the error type shared across the storage and writer
//! crates.

pub mod config;
pub mod error;
pub mod restricted;

pub use config::{MetadataEntry, SchemaColumn, TableConfiguration};
pub use error::{Error, Result};
pub use restricted::{
    is_restricted_column, remove_restricted_column_metadata, remove_restricted_columns,
    remove_restricted_columns_from_config, remove_restricted_schema_columns,
    validate_restricted_columns_in_config,
};

/// Reserved column managed by the storage backend. User configuration must
/// never reference it.
pub const TIMESTAMP_COLUMN_NAME: &str = "_timestamp";
