use crate::domain::model::Notification;
use crate::utils::error::{SendError, StoreError};
use async_trait::async_trait;

/// Persistence medium supplied by the host. Holds a single opaque blob.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Load the persisted blob. An empty vec means nothing has been saved.
    async fn load(&self) -> Result<Vec<u8>, StoreError>;

    async fn save(&self, blob: &[u8]) -> Result<(), StoreError>;
}

/// Notification sink supplied by the host.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, note: Notification) -> Result<(), SendError>;
}
