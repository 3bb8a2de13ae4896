//! Storage service client and table-structure orchestration.

pub mod api;
pub mod client;
pub mod structure;

pub use api::StorageApiClient;
pub use client::StorageClient;
pub use structure::{
    modify_primary_key, normalize_key_array, primary_key_needs_change, remove_primary_key,
};

pub use outmap_core::{Error, Result};
