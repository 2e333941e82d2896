pub mod etl;
pub mod grouper;
pub mod loader;
pub mod pipeline;
pub mod transformer;
pub mod uploader;

pub use crate::domain::model::{Key, OwnerGroups, OwnerKey, SourceKey, UploadSummary, User};
pub use crate::domain::ports::{BatchSink, Pipeline, Placeholders, Storage};
pub use crate::utils::error::Result;
