use crate::config::MigrationSettings;
use crate::core::{grouper, loader, transformer, uploader};
use crate::domain::model::{SourceKey, UploadSummary, User};
use crate::domain::ports::{BatchSink, Pipeline, Placeholders, Storage};
use crate::utils::error::Result;

/// Export file in, batches of users out.
pub struct MigrationPipeline<S: Storage, P: Placeholders> {
    storage: S,
    placeholders: P,
    sink: Box<dyn BatchSink>,
    settings: MigrationSettings,
}

impl<S: Storage, P: Placeholders> MigrationPipeline<S, P> {
    pub fn new(
        storage: S,
        placeholders: P,
        sink: Box<dyn BatchSink>,
        settings: MigrationSettings,
    ) -> Self {
        Self {
            storage,
            placeholders,
            sink,
            settings,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: Placeholders> Pipeline for MigrationPipeline<S, P> {
    async fn extract(&self) -> Result<Vec<SourceKey>> {
        loader::load_keys(&self.storage, &self.settings.input_path).await
    }

    async fn transform(&self, keys: Vec<SourceKey>) -> Result<Vec<User>> {
        let groups = grouper::group_by_owner(keys);
        transformer::convert_groups(&groups, &self.placeholders)
    }

    async fn load(&self, users: Vec<User>) -> Result<UploadSummary> {
        uploader::upload_in_batches(
            self.sink.as_ref(),
            &users,
            self.settings.batch_size,
            self.settings.batch_delay,
        )
        .await
    }
}
