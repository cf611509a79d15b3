use advisory_watch::{
    AdvisoryFetcher, AdvisoryWatcher, FileStore, Notification, Notifier, SendError, WatchConfig,
};
use async_trait::async_trait;
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex;

const FEED_V1: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Security Advisories</title>
  <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000001</id>
  <updated>2024-01-03T10:00:00Z</updated>
  <entry>
    <title>ASA-202401-2: chromium: multiple issues</title>
    <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000003</id>
    <link href="https://security.example.org/ASA-202401-2"/>
    <published>2024-01-03T10:00:00Z</published>
    <updated>2024-01-03T10:00:00Z</updated>
  </entry>
  <entry>
    <title>ASA-202401-1: openssl: signature forgery</title>
    <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000002</id>
    <link href="https://security.example.org/ASA-202401-1"/>
    <published>2024-01-02T08:30:00Z</published>
    <updated>2024-01-02T08:30:00Z</updated>
  </entry>
</feed>"#;

const FEED_V2: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Security Advisories</title>
  <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000001</id>
  <updated>2024-01-05T09:00:00Z</updated>
  <entry>
    <title>ASA-202401-3: glibc: privilege escalation</title>
    <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000004</id>
    <link href="https://security.example.org/ASA-202401-3"/>
    <published>2024-01-05T09:00:00Z</published>
    <updated>2024-01-05T09:00:00Z</updated>
  </entry>
  <entry>
    <title>ASA-202401-2: chromium: multiple issues</title>
    <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000003</id>
    <link href="https://security.example.org/ASA-202401-2"/>
    <published>2024-01-03T10:00:00Z</published>
    <updated>2024-01-03T10:00:00Z</updated>
  </entry>
  <entry>
    <title>ASA-202401-1: openssl: signature forgery</title>
    <id>urn:uuid:7a1f14a2-9a77-4c3e-b7a4-000000000002</id>
    <link href="https://security.example.org/ASA-202401-1"/>
    <published>2024-01-02T08:30:00Z</published>
    <updated>2024-01-02T08:30:00Z</updated>
  </entry>
</feed>"#;

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, note: Notification) -> Result<(), SendError> {
        self.sent.lock().await.push(note);
        Ok(())
    }
}

fn build_watcher(
    feed_url: String,
    state_file: std::path::PathBuf,
    notifier: Arc<RecordingNotifier>,
) -> AdvisoryWatcher {
    AdvisoryWatcher::new(
        AdvisoryFetcher::new(feed_url).unwrap(),
        Arc::new(FileStore::new(state_file)),
        notifier,
        WatchConfig {
            refresh_interval: 1,
        },
    )
}

async fn run_one_poll(watcher: &AdvisoryWatcher) {
    watcher.enable().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    watcher.disable().await.unwrap();
}

#[tokio::test]
async fn test_poll_notify_persist_and_restart() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("advisory-watch.state");

    let mut feed_mock = server.mock(|when, then| {
        when.method(GET).path("/feed.atom");
        then.status(200)
            .header("Content-Type", "application/atom+xml")
            .body(FEED_V1);
    });

    // First run: everything in the feed is new.
    let notifier = Arc::new(RecordingNotifier::default());
    let watcher = build_watcher(server.url("/feed.atom"), state_file.clone(), notifier.clone());
    run_one_poll(&watcher).await;

    {
        let sent = notifier.sent.lock().await;
        assert_eq!(sent.len(), 2);
        // Oldest first, even though the feed lists newest first.
        assert_eq!(sent[0].title, "ASA-202401-1: openssl: signature forgery");
        assert_eq!(sent[1].title, "ASA-202401-2: chromium: multiple issues");
    }

    let state: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&state_file).unwrap()).unwrap();
    assert_eq!(state["last_published"], "2024-01-03T10:00:00Z");

    // Restart with the same state file and an unchanged feed: nothing new.
    let notifier = Arc::new(RecordingNotifier::default());
    let watcher = build_watcher(server.url("/feed.atom"), state_file.clone(), notifier.clone());
    run_one_poll(&watcher).await;
    assert!(notifier.sent.lock().await.is_empty());

    // The feed gains one entry: only that entry is delivered.
    feed_mock.delete();
    server.mock(|when, then| {
        when.method(GET).path("/feed.atom");
        then.status(200)
            .header("Content-Type", "application/atom+xml")
            .body(FEED_V2);
    });

    let notifier = Arc::new(RecordingNotifier::default());
    let watcher = build_watcher(server.url("/feed.atom"), state_file.clone(), notifier.clone());
    run_one_poll(&watcher).await;

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "ASA-202401-3: glibc: privilege escalation");
    assert_eq!(sent[0].message, "https://security.example.org/ASA-202401-3");

    let state: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&state_file).unwrap()).unwrap();
    assert_eq!(state["last_published"], "2024-01-05T09:00:00Z");
}

#[tokio::test]
async fn test_fetch_failure_keeps_process_alive_until_feed_recovers() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("advisory-watch.state");

    let mut broken = server.mock(|when, then| {
        when.method(GET).path("/feed.atom");
        then.status(500);
    });

    let notifier = Arc::new(RecordingNotifier::default());
    let watcher = build_watcher(server.url("/feed.atom"), state_file.clone(), notifier.clone());

    watcher.enable().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    // Failed cycles delivered nothing and persisted nothing.
    assert!(notifier.sent.lock().await.is_empty());
    assert!(!state_file.exists());

    // The feed recovers while the watcher is still enabled.
    broken.delete();
    server.mock(|when, then| {
        when.method(GET).path("/feed.atom");
        then.status(200).body(FEED_V1);
    });

    tokio::time::sleep(Duration::from_millis(1500)).await;
    watcher.disable().await.unwrap();

    assert_eq!(notifier.sent.lock().await.len(), 2);
    assert!(state_file.exists());
}
