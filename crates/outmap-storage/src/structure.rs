use tracing::warn;

use outmap_core::Result;

use crate::client::StorageClient;

/// Normalize a primary-key column array.
///
/// Trims whitespace from each entry, drops entries that are blank after
/// trimming (each drop emits a warning), and de-duplicates while preserving
/// the first occurrence.
pub fn normalize_key_array(keys: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            warn!("Found empty column name in key array.");
            continue;
        }
        if !normalized.iter().any(|existing| existing == trimmed) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

/// Decide whether the live primary key must be replaced.
///
/// The desired key is normalized first. Order is irrelevant: the keys are
/// equal when they have the same cardinality and every column of the current
/// key appears in the desired one.
pub fn primary_key_needs_change(current: &[String], desired_raw: &[String]) -> bool {
    let desired = normalize_key_array(desired_raw);
    if current.len() != desired.len() {
        return true;
    }
    !current.iter().all(|column| desired.contains(column))
}

/// Drop the current primary key of `table_id` if there is one.
///
/// Returns `false` when the remote call failed; the caller must not proceed
/// to recreate the key in that case. An empty current key needs no call and
/// counts as success.
pub async fn remove_primary_key(
    client: &impl StorageClient,
    table_id: &str,
    current: &[String],
) -> bool {
    if current.is_empty() {
        return true;
    }
    match client.remove_table_primary_key(table_id).await {
        Ok(()) => true,
        Err(err) => {
            warn!("Error deleting primary key of table {table_id}: {err}");
            false
        }
    }
}

/// Replace the primary key of `table_id` with the desired configuration.
///
/// Remote failures are recovered locally: a failed removal aborts without
/// touching the key, a failed creation is rolled back by recreating the
/// original key. The rollback call itself is unguarded; a second failure
/// propagates to the caller.
pub async fn modify_primary_key(
    client: &impl StorageClient,
    table_id: &str,
    current: &[String],
    desired_raw: &[String],
) -> Result<()> {
    let desired = normalize_key_array(desired_raw);
    warn!(
        "Modifying primary key of table \"{}\" from \"{}\" to \"{}\".",
        table_id,
        current.join(", "),
        desired.join(", "),
    );

    if !remove_primary_key(client, table_id, current).await {
        return Ok(());
    }
    if desired.is_empty() {
        return Ok(());
    }

    if let Err(err) = client.create_table_primary_key(table_id, &desired).await {
        warn!("Error changing primary key of table {table_id}: {err}");
        if !current.is_empty() {
            client.create_table_primary_key(table_id, current).await?;
        }
    }
    Ok(())
}
