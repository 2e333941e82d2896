use crate::domain::model::{SourceKey, UploadSummary, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Source of the values that make a synthetic user unique.
pub trait Placeholders: Send + Sync {
    /// A seven-digit number.
    fn dummy_suffix(&self) -> u32;
    fn now(&self) -> DateTime<Utc>;
}

/// Where each batch of users ends up.
#[async_trait]
pub trait BatchSink: Send + Sync {
    async fn send_batch(&self, batch: &[User]) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceKey>>;
    async fn transform(&self, keys: Vec<SourceKey>) -> Result<Vec<User>>;
    async fn load(&self, users: Vec<User>) -> Result<UploadSummary>;
}
