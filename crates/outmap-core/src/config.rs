use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output mapping configuration for a single table.
///
/// The three column shapes (`columns`, `column_metadata`, `schema`) may
/// coexist in one configuration and are checked independently by the
/// restricted-column helpers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableConfiguration {
    /// Destination table id in the storage service (e.g. `in.c-main.orders`).
    pub destination: Option<String>,
    /// Desired primary key columns, raw as supplied by the user.
    pub primary_key: Vec<String>,
    /// Flat list of column names.
    pub columns: Vec<String>,
    /// Metadata entries keyed by column name.
    pub column_metadata: BTreeMap<String, Vec<MetadataEntry>>,
    /// Typed schema entries.
    pub schema: Vec<SchemaColumn>,
    /// Load rows incrementally instead of replacing the table.
    pub incremental: bool,
    /// Column used to scope deletes before an incremental load.
    pub delete_where_column: Option<String>,
}

/// One metadata key/value pair attached to a column or table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One entry of the typed table schema. Only `name` is required.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaColumn {
    pub name: String,
    /// Backend-native type when the configuration pins one.
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

fn default_nullable() -> bool {
    true
}

impl SchemaColumn {
    /// Schema entry with just a name and the field defaults.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            nullable: true,
            primary_key: false,
            metadata: Vec::new(),
        }
    }
}
