use crate::domain::model::Watermark;
use crate::domain::ports::BlobStore;
use crate::utils::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Wire shape of the persisted blob: `{"last_published": "<RFC3339>"}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    #[serde(default)]
    last_published: Option<DateTime<Utc>>,
}

/// Loads and saves the watermark through the host's blob persistence.
#[derive(Clone)]
pub struct WatermarkStore {
    blobs: Arc<dyn BlobStore>,
}

impl WatermarkStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Load the persisted watermark. An empty or absent blob, or a blob with
    /// no recorded timestamp, is the zero watermark.
    pub async fn load(&self) -> Result<Watermark, StoreError> {
        let blob = self.blobs.load().await?;
        if blob.is_empty() {
            return Ok(Watermark::ZERO);
        }

        let state: StoredState = serde_json::from_slice(&blob)?;
        Ok(state
            .last_published
            .map(Watermark::new)
            .unwrap_or(Watermark::ZERO))
    }

    pub async fn save(&self, watermark: Watermark) -> Result<(), StoreError> {
        let state = StoredState {
            last_published: watermark.timestamp(),
        };
        let blob = serde_json::to_vec(&state)?;
        self.blobs.save(&blob).await
    }
}
