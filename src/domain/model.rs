use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One advisory item from the feed. Parsed fresh each cycle and discarded
/// once its newness has been decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
}

/// What the notification sink accepts. The message carries the advisory link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl From<&Advisory> for Notification {
    fn from(advisory: &Advisory) -> Self {
        Self {
            title: advisory.title.clone(),
            message: advisory.link.clone(),
        }
    }
}

/// Publication timestamp of the most recently processed advisory, the only
/// persisted state. `Watermark::ZERO` means the feed has never been
/// processed and admits every entry.
///
/// Invariant: non-decreasing across successful cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Watermark(Option<DateTime<Utc>>);

impl Watermark {
    pub const ZERO: Watermark = Watermark(None);

    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Watermark(Some(timestamp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// True when `published` is strictly after this watermark.
    pub fn admits(&self, published: DateTime<Utc>) -> bool {
        match self.0 {
            Some(last) => published > last,
            None => true,
        }
    }
}
