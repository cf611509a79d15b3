use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use crate::utils::error::SendError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

/// Writes notifications to the log. Default sink for the binary.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, note: Notification) -> Result<(), SendError> {
        info!(title = %note.title, message = %note.message, "new advisory");
        Ok(())
    }
}

/// POSTs notifications as JSON `{title, message}` to a webhook endpoint,
/// compatible with message-push services like Gotify.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, SendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SendError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, note: Notification) -> Result<(), SendError> {
        self.client
            .post(&self.url)
            .json(&note)
            .send()
            .await
            .map_err(|e| SendError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| SendError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
