use crate::domain::model::User;
use crate::domain::ports::BatchSink;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Serializes each batch and logs it instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

#[async_trait]
impl BatchSink for LoggingSink {
    async fn send_batch(&self, batch: &[User]) -> Result<()> {
        let payload = serde_json::to_string(batch)?;
        let keys: usize = batch.iter().map(|user| user.keys.len()).sum();

        tracing::info!(
            "Dry run: would send {} users with {} keys ({} bytes)",
            batch.len(),
            keys,
            payload.len()
        );
        tracing::debug!("Payload: {}", payload);
        Ok(())
    }
}
