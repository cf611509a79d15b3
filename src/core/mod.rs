pub mod diff;
pub mod fetcher;
pub mod store;
pub mod watcher;

pub use crate::domain::model::{Advisory, Notification, Watermark};
pub use crate::domain::ports::{BlobStore, Notifier};
