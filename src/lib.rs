pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileStore, LogNotifier, WebhookNotifier};
pub use config::WatchConfig;
pub use crate::core::fetcher::{AdvisoryFetcher, DEFAULT_FEED_URL};
pub use crate::core::watcher::AdvisoryWatcher;
pub use domain::model::{Advisory, Notification, Watermark};
pub use domain::ports::{BlobStore, Notifier};
pub use utils::error::{ConfigError, FetchError, LifecycleError, SendError, StoreError};
