use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::json;

use outmap_core::{Error, Result};

use crate::client::StorageClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TOKEN_HEADER: &str = "X-StorageApi-Token";

/// HTTP client for the storage service API.
#[derive(Debug, Clone)]
pub struct StorageApiClient {
    base_url: String,
    token: String,
    http: Client,
}

impl StorageApiClient {
    /// Create a client for `base_url` authenticated by `token`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::StorageApi(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http,
        })
    }

    fn primary_key_url(&self, table_id: &str) -> String {
        format!("{}/v2/storage/tables/{}/primary-key", self.base_url, table_id)
    }

    async fn check(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::StorageApi(format!("{status}: {body}")))
    }
}

#[async_trait]
impl StorageClient for StorageApiClient {
    async fn remove_table_primary_key(&self, table_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.primary_key_url(table_id))
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|err| Error::StorageApi(err.to_string()))?;
        Self::check(response).await
    }

    async fn create_table_primary_key(&self, table_id: &str, columns: &[String]) -> Result<()> {
        let response = self
            .http
            .post(self.primary_key_url(table_id))
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({ "columns": columns }))
            .send()
            .await
            .map_err(|err| Error::StorageApi(err.to_string()))?;
        Self::check(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_url_joins_without_double_slash() {
        let client =
            StorageApiClient::new("https://connection.example.com/", "token").expect("build client");
        assert_eq!(
            client.primary_key_url("in.c-main.orders"),
            "https://connection.example.com/v2/storage/tables/in.c-main.orders/primary-key",
        );
    }
}
