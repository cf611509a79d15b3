// Adapters layer: concrete implementations of the host-facing ports used by
// the standalone binary (file-backed persistence, webhook/log notification).

pub mod notify;
pub mod store;

pub use notify::{LogNotifier, WebhookNotifier};
pub use store::FileStore;
