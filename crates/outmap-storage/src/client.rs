use async_trait::async_trait;

use outmap_core::Result;

/// Capability set the output-mapping layer consumes from the storage service.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Drop the primary key of a table.
    async fn remove_table_primary_key(&self, table_id: &str) -> Result<()>;

    /// Create a primary key over `columns` on a table.
    async fn create_table_primary_key(&self, table_id: &str, columns: &[String]) -> Result<()>;
}
