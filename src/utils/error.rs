use thiserror::Error;

/// Errors from retrieving or parsing the advisory feed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Parse(String),
}

/// Errors from the watermark persistence medium.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored watermark corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors from the notification sink.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("notification sink unavailable: {0}")]
    Unavailable(String),
}

/// Hard failures of the enable/disable API. These are the only errors
/// surfaced to the host; everything that happens inside a cycle is logged
/// instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("watcher already enabled")]
    AlreadyEnabled,

    #[error("watcher already disabled")]
    AlreadyDisabled,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field} ({value}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}
