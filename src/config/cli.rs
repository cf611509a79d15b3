use crate::config::{WatchConfig, DEFAULT_REFRESH_INTERVAL_SECS};
use crate::core::fetcher::DEFAULT_FEED_URL;
use clap::Parser;

/// Command-line arguments for the standalone watcher binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "advisory-watch")]
#[command(about = "Poll a security-advisory feed and notify on new entries")]
pub struct CliArgs {
    /// Feed URL to poll.
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Seconds between polling cycles.
    #[arg(long, default_value_t = DEFAULT_REFRESH_INTERVAL_SECS)]
    pub refresh_interval: u64,

    /// File the watermark is persisted to.
    #[arg(long, default_value = "./advisory-watch.state")]
    pub state_file: String,

    /// Webhook to POST notifications to; notifications are logged when absent.
    #[arg(long)]
    pub notify_url: Option<String>,

    /// Enable verbose output.
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            refresh_interval: self.refresh_interval,
        }
    }
}
