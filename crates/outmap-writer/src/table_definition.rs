use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use outmap_core::MetadataEntry;

/// Metadata key carrying the backend-agnostic base type of a column.
const BASETYPE_METADATA_KEY: &str = "KBC.datatype.basetype";

/// Table metadata key naming the backend whose native types the column
/// metadata was written for.
const NATIVE_BACKEND_METADATA_KEY: &str = "KBC.datatype.backend";

/// Metadata key carrying a backend-native column type.
const NATIVE_TYPE_METADATA_KEY: &str = "KBC.datatype.type";

/// Storage backends that support typed-table definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Snowflake,
    Exasol,
    Synapse,
}

impl BackendType {
    /// Backend identifier as it appears in table metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendType::Snowflake => "snowflake",
            BackendType::Exasol => "exasol",
            BackendType::Synapse => "synapse",
        }
    }

    /// Native type name for a base type on this backend.
    pub fn native_type(self, base: BaseType) -> &'static str {
        match (self, base) {
            (BackendType::Snowflake, BaseType::String) => "VARCHAR",
            (BackendType::Snowflake, BaseType::Integer) => "INTEGER",
            (BackendType::Snowflake, BaseType::Numeric) => "NUMBER",
            (BackendType::Snowflake, BaseType::Float) => "FLOAT",
            (BackendType::Snowflake, BaseType::Boolean) => "BOOLEAN",
            (BackendType::Snowflake, BaseType::Date) => "DATE",
            (BackendType::Snowflake, BaseType::Timestamp) => "TIMESTAMP_NTZ",
            (BackendType::Exasol, BaseType::String) => "VARCHAR",
            (BackendType::Exasol, BaseType::Integer) => "DECIMAL",
            (BackendType::Exasol, BaseType::Numeric) => "DECIMAL",
            (BackendType::Exasol, BaseType::Float) => "DOUBLE PRECISION",
            (BackendType::Exasol, BaseType::Boolean) => "BOOLEAN",
            (BackendType::Exasol, BaseType::Date) => "DATE",
            (BackendType::Exasol, BaseType::Timestamp) => "TIMESTAMP",
            (BackendType::Synapse, BaseType::String) => "NVARCHAR",
            (BackendType::Synapse, BaseType::Integer) => "INT",
            (BackendType::Synapse, BaseType::Numeric) => "NUMERIC",
            (BackendType::Synapse, BaseType::Float) => "FLOAT",
            (BackendType::Synapse, BaseType::Boolean) => "BIT",
            (BackendType::Synapse, BaseType::Date) => "DATE",
            (BackendType::Synapse, BaseType::Timestamp) => "DATETIME2",
        }
    }
}

/// Backend-agnostic column base types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BaseType {
    #[default]
    String,
    Integer,
    Numeric,
    Float,
    Boolean,
    Date,
    Timestamp,
}

impl BaseType {
    /// Parse a base type from its metadata value.
    ///
    /// Unknown values fall back to `String`, the widest type every backend
    /// can load.
    pub fn from_metadata(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "INTEGER" => BaseType::Integer,
            "NUMERIC" => BaseType::Numeric,
            "FLOAT" => BaseType::Float,
            "BOOLEAN" => BaseType::Boolean,
            "DATE" => BaseType::Date,
            "TIMESTAMP" => BaseType::Timestamp,
            _ => BaseType::String,
        }
    }
}

/// One column of a typed-table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinitionColumn {
    pub name: String,
    /// Backend-native type resolved from column metadata.
    pub data_type: String,
    pub base_type: BaseType,
}

/// Request payload for creating a typed table in the storage service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub name: String,
    pub primary_keys_names: Vec<String>,
    pub columns: Vec<TableDefinitionColumn>,
}

/// Builds table definitions from column metadata for one backend.
#[derive(Debug, Clone)]
pub struct TableDefinitionFactory {
    table_metadata: BTreeMap<String, String>,
    backend_type: BackendType,
}

impl TableDefinitionFactory {
    pub fn new(table_metadata: BTreeMap<String, String>, backend_type: BackendType) -> Self {
        Self {
            table_metadata,
            backend_type,
        }
    }

    /// Native column types in the metadata only apply when the table was
    /// produced for the same backend this factory targets.
    fn native_types_enabled(&self) -> bool {
        self.table_metadata
            .get(NATIVE_BACKEND_METADATA_KEY)
            .is_some_and(|backend| backend.eq_ignore_ascii_case(self.backend_type.as_str()))
    }

    /// Build a table definition with one column per metadata entry set.
    ///
    /// The column type comes from the `KBC.datatype.type` metadata entry when
    /// native types apply, otherwise from the `KBC.datatype.basetype` entry
    /// mapped to the backend's native name. Columns without either default to
    /// the backend's string type.
    pub fn create_table_definition(
        &self,
        table_name: &str,
        primary_keys: &[String],
        column_metadata: &BTreeMap<String, Vec<MetadataEntry>>,
    ) -> TableDefinition {
        let native_enabled = self.native_types_enabled();
        let columns = column_metadata
            .iter()
            .map(|(name, entries)| self.build_column(name, entries, native_enabled))
            .collect();

        TableDefinition {
            name: table_name.to_string(),
            primary_keys_names: primary_keys.to_vec(),
            columns,
        }
    }

    fn build_column(
        &self,
        name: &str,
        entries: &[MetadataEntry],
        native_enabled: bool,
    ) -> TableDefinitionColumn {
        let base_type = entries
            .iter()
            .find(|entry| entry.key == BASETYPE_METADATA_KEY)
            .map(|entry| BaseType::from_metadata(&entry.value))
            .unwrap_or_default();

        let native_override = if native_enabled {
            entries
                .iter()
                .find(|entry| entry.key == NATIVE_TYPE_METADATA_KEY)
                .map(|entry| entry.value.clone())
        } else {
            None
        };

        TableDefinitionColumn {
            name: name.to_string(),
            data_type: native_override
                .unwrap_or_else(|| self.backend_type.native_type(base_type).to_string()),
            base_type,
        }
    }
}
