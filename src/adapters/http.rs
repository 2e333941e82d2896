use crate::domain::model::User;
use crate::domain::ports::BatchSink;
use crate::utils::error::{MigrationError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// POSTs each batch as a JSON array to the destination's migrate endpoint.
pub struct HttpBatchSink {
    client: Client,
    endpoint: Url,
}

impl HttpBatchSink {
    /// `migrate_path` replaces any path already present on `base_url`.
    pub fn new(base_url: &str, migrate_path: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| MigrationError::ProtocolError {
            message: format!("invalid base URL {}: {}", base_url, e),
        })?;
        let endpoint = base
            .join(migrate_path)
            .map_err(|e| MigrationError::ProtocolError {
                message: format!("cannot join {} onto {}: {}", migrate_path, base_url, e),
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl BatchSink for HttpBatchSink {
    async fn send_batch(&self, batch: &[User]) -> Result<()> {
        tracing::debug!("POST {} ({} users)", self.endpoint, batch.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(batch)
            .send()
            .await?;

        let status = response.status();
        // reqwest does not expose the server's reason phrase; this is the
        // standard text for the code.
        let reason = status.canonical_reason().unwrap_or("");
        let body = response.text().await?;

        if status.is_success() {
            tracing::info!(
                "Response from destination was {} ({}): {}",
                status.as_u16(),
                reason,
                body
            );
        } else {
            tracing::warn!(
                "Response from destination was {} ({}): {}",
                status.as_u16(),
                reason,
                body
            );
        }

        Ok(())
    }
}
