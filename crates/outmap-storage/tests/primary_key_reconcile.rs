use std::sync::Mutex;

use async_trait::async_trait;
use outmap_core::{Error, Result};
use outmap_storage::{StorageClient, modify_primary_key, remove_primary_key};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Remove(String),
    Create(String, Vec<String>),
}

/// Client double that records every call and fails on demand.
#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    fail_remove: bool,
    /// Number of upcoming create calls that should fail.
    failing_creates: Mutex<usize>,
}

impl RecordingClient {
    fn failing_creates(count: usize) -> Self {
        Self {
            failing_creates: Mutex::new(count),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl StorageClient for RecordingClient {
    async fn remove_table_primary_key(&self, table_id: &str) -> Result<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(Call::Remove(table_id.to_string()));
        if self.fail_remove {
            return Err(Error::StorageApi("primary key removal refused".to_string()));
        }
        Ok(())
    }

    async fn create_table_primary_key(&self, table_id: &str, columns: &[String]) -> Result<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(Call::Create(table_id.to_string(), columns.to_vec()));
        let mut remaining = self.failing_creates.lock().expect("failing_creates lock");
        if *remaining > 0 {
            *remaining -= 1;
            return Err(Error::StorageApi("primary key creation refused".to_string()));
        }
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[tokio::test]
async fn replaces_key_with_remove_then_create() {
    let client = RecordingClient::default();
    let current = strings(&["id"]);
    let desired = strings(&["id", "ts"]);

    modify_primary_key(&client, "in.c-main.orders", &current, &desired)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(
        client.calls(),
        vec![
            Call::Remove("in.c-main.orders".to_string()),
            Call::Create("in.c-main.orders".to_string(), strings(&["id", "ts"])),
        ],
    );
}

#[tokio::test]
async fn failed_create_rolls_back_to_original_key() {
    let client = RecordingClient::failing_creates(1);
    let current = strings(&["id"]);
    let desired = strings(&["id", "ts"]);

    modify_primary_key(&client, "in.c-main.orders", &current, &desired)
        .await
        .expect("rollback success is not an error");

    assert_eq!(
        client.calls(),
        vec![
            Call::Remove("in.c-main.orders".to_string()),
            Call::Create("in.c-main.orders".to_string(), strings(&["id", "ts"])),
            Call::Create("in.c-main.orders".to_string(), strings(&["id"])),
        ],
    );
}

#[tokio::test]
async fn failed_rollback_propagates() {
    let client = RecordingClient::failing_creates(2);
    let current = strings(&["id"]);
    let desired = strings(&["id", "ts"]);

    let err = modify_primary_key(&client, "in.c-main.orders", &current, &desired)
        .await
        .expect_err("second create failure has no handler");
    assert!(matches!(err, Error::StorageApi(_)));
}

#[tokio::test]
async fn failed_removal_aborts_without_creating() {
    let client = RecordingClient {
        fail_remove: true,
        ..RecordingClient::default()
    };
    let current = strings(&["id"]);
    let desired = strings(&["id", "ts"]);

    modify_primary_key(&client, "in.c-main.orders", &current, &desired)
        .await
        .expect("removal failure is recovered locally");

    assert_eq!(
        client.calls(),
        vec![Call::Remove("in.c-main.orders".to_string())],
    );
}

#[tokio::test]
async fn empty_to_empty_makes_no_remote_calls() {
    let client = RecordingClient::default();

    modify_primary_key(&client, "in.c-main.orders", &[], &[])
        .await
        .expect("nothing to do");

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn failed_create_without_original_key_skips_rollback() {
    let client = RecordingClient::failing_creates(1);
    let desired = strings(&["id"]);

    modify_primary_key(&client, "in.c-main.orders", &[], &desired)
        .await
        .expect("no rollback when the table had no key");

    assert_eq!(
        client.calls(),
        vec![Call::Create("in.c-main.orders".to_string(), strings(&["id"]))],
    );
}

#[tokio::test]
async fn removing_an_empty_key_is_a_no_op() {
    let client = RecordingClient::default();
    assert!(remove_primary_key(&client, "in.c-main.orders", &[]).await);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn desired_key_is_normalized_before_the_create_call() {
    let client = RecordingClient::default();
    let current = strings(&["id"]);
    let desired = strings(&[" id", "ts ", "", "ts"]);

    modify_primary_key(&client, "in.c-main.orders", &current, &desired)
        .await
        .expect("reconciliation should succeed");

    assert_eq!(
        client.calls(),
        vec![
            Call::Remove("in.c-main.orders".to_string()),
            Call::Create("in.c-main.orders".to_string(), strings(&["id", "ts"])),
        ],
    );
}
