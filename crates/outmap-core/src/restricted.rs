use std::collections::BTreeMap;

use crate::TIMESTAMP_COLUMN_NAME;
use crate::config::{MetadataEntry, SchemaColumn, TableConfiguration};
use crate::error::{Error, Result};

/// Returns true when `column_name` is the reserved system column.
///
/// ASCII case folding keeps the comparison independent of the process locale.
pub fn is_restricted_column(column_name: &str) -> bool {
    column_name.eq_ignore_ascii_case(TIMESTAMP_COLUMN_NAME)
}

/// Filter the reserved name out of a flat column list, preserving the
/// relative order of the remaining entries.
pub fn remove_restricted_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| !is_restricted_column(column))
        .cloned()
        .collect()
}

/// Drop restricted keys from a column-metadata mapping; all other entries
/// pass through unchanged.
pub fn remove_restricted_column_metadata(
    column_metadata: &BTreeMap<String, Vec<MetadataEntry>>,
) -> BTreeMap<String, Vec<MetadataEntry>> {
    column_metadata
        .iter()
        .filter(|(column, _)| !is_restricted_column(column))
        .map(|(column, entries)| (column.clone(), entries.clone()))
        .collect()
}

/// Filter out schema entries whose `name` is the reserved column.
pub fn remove_restricted_schema_columns(schema: &[SchemaColumn]) -> Vec<SchemaColumn> {
    schema
        .iter()
        .filter(|column| !is_restricted_column(&column.name))
        .cloned()
        .collect()
}

/// Apply all three removals to whichever shapes are present and non-empty.
///
/// Absent or empty shapes are left untouched. This never fails; the fatal
/// counterpart is [`validate_restricted_columns_in_config`].
pub fn remove_restricted_columns_from_config(mut config: TableConfiguration) -> TableConfiguration {
    if !config.columns.is_empty() {
        config.columns = remove_restricted_columns(&config.columns);
    }
    if !config.column_metadata.is_empty() {
        config.column_metadata = remove_restricted_column_metadata(&config.column_metadata);
    }
    if !config.schema.is_empty() {
        config.schema = remove_restricted_schema_columns(&config.schema);
    }
    config
}

/// Check all three column shapes for occurrences of the reserved column.
///
/// Collects one message per offending shape, each naming every offending
/// column, and fails with a single aggregated [`Error::InvalidOutput`].
pub fn validate_restricted_columns_in_config(
    columns: &[String],
    column_metadata: &BTreeMap<String, Vec<MetadataEntry>>,
    schema: &[SchemaColumn],
) -> Result<()> {
    let mut errors = Vec::new();

    let restricted: Vec<&str> = columns
        .iter()
        .filter(|column| is_restricted_column(column))
        .map(String::as_str)
        .collect();
    if !restricted.is_empty() {
        errors.push(format!(
            "System columns \"{}\" cannot be imported to the table.",
            restricted.join(", "),
        ));
    }

    let restricted: Vec<&str> = column_metadata
        .keys()
        .filter(|column| is_restricted_column(column))
        .map(String::as_str)
        .collect();
    if !restricted.is_empty() {
        errors.push(format!(
            "Metadata for system columns \"{}\" cannot be imported to the table.",
            restricted.join(", "),
        ));
    }

    let restricted: Vec<&str> = schema
        .iter()
        .filter(|column| is_restricted_column(&column.name))
        .map(|column| column.name.as_str())
        .collect();
    if !restricted.is_empty() {
        errors.push(format!(
            "Schema for system columns \"{}\" cannot be imported to the table.",
            restricted.join(", "),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidOutput(errors.join(" ")))
    }
}
