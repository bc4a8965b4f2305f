//! Outbound channel to the backend log ingestion service.
pub mod models;
pub use models::*;

use anyhow::{Error, Result};
use async_trait::async_trait;

/// Queue logs for delivery to the backend. Persistence, batching and
/// retries are the channel's business; callers only enqueue.
#[async_trait]
pub trait IngestionChannel: Send + Sync {
    async fn enqueue(&self, log: PushInstallationLog) -> Result<(), Error>;
}
