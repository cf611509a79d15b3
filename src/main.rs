use advisory_watch::config::cli::CliArgs;
use advisory_watch::utils::validation::{validate_url, Validate};
use advisory_watch::utils::logger;
use advisory_watch::{
    AdvisoryFetcher, AdvisoryWatcher, FileStore, LogNotifier, Notifier, WebhookNotifier,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logger::init_logger(args.verbose);

    tracing::info!("starting advisory-watch");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = args.watch_config();
    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {e}");
        std::process::exit(1);
    }
    validate_url("feed_url", &args.feed_url)?;

    let notifier: Arc<dyn Notifier> = match &args.notify_url {
        Some(url) => {
            validate_url("notify_url", url)?;
            Arc::new(WebhookNotifier::new(url.clone())?)
        }
        None => Arc::new(LogNotifier),
    };

    let fetcher = AdvisoryFetcher::new(args.feed_url.clone())?;
    let store = Arc::new(FileStore::new(args.state_file.clone()));
    let watcher = AdvisoryWatcher::new(fetcher, store, notifier, config);

    watcher.enable().await?;
    tracing::info!("{}", watcher.status().await);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    watcher.disable().await?;

    Ok(())
}
