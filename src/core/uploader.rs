use crate::domain::model::{UploadSummary, User};
use crate::domain::ports::BatchSink;
use crate::utils::error::{MigrationError, Result};
use std::time::Duration;

/// Sends users to the sink in consecutive batches of `batch_size`, sleeping
/// `delay` between batches. The first failing batch ends the upload; earlier
/// batches are not rolled back.
pub async fn upload_in_batches<K: BatchSink + ?Sized>(
    sink: &K,
    users: &[User],
    batch_size: usize,
    delay: Duration,
) -> Result<UploadSummary> {
    if batch_size == 0 {
        return Err(MigrationError::ConfigError {
            message: "batch size must be at least 1".to_string(),
        });
    }

    let total_batches = users.len().div_ceil(batch_size);
    let mut summary = UploadSummary::default();

    for (index, batch) in users.chunks(batch_size).enumerate() {
        tracing::info!(
            "Sending batch {}/{} ({} users)",
            index + 1,
            total_batches,
            batch.len()
        );
        sink.send_batch(batch).await?;

        summary.batches += 1;
        summary.users += batch.len();
        summary.keys += batch.iter().map(|user| user.keys.len()).sum::<usize>();

        if index + 1 < total_batches && !delay.is_zero() {
            tracing::debug!("Waiting {:?} before next batch", delay);
            tokio::time::sleep(delay).await;
        }
    }

    Ok(summary)
}
