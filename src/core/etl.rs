use crate::domain::model::UploadSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct MigrationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MigrationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<UploadSummary> {
        tracing::info!("Starting key migration");

        let keys = self.pipeline.extract().await?;
        let source_count = keys.len();

        let users = self.pipeline.transform(keys).await?;
        let converted: usize = users.iter().map(|user| user.keys.len()).sum();
        tracing::info!(
            "Prepared {} users holding {} of {} keys",
            users.len(),
            converted,
            source_count
        );

        let summary = self.pipeline.load(users).await?;
        tracing::info!(
            "Sent {} batches: {} users, {} keys",
            summary.batches,
            summary.users,
            summary.keys
        );

        Ok(summary)
    }
}
