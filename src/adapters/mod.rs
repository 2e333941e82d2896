// Adapters layer: concrete implementations of the domain ports.

pub mod dry_run;
pub mod http;
pub mod placeholders;

pub use dry_run::LoggingSink;
pub use http::HttpBatchSink;
pub use placeholders::RandomPlaceholders;
