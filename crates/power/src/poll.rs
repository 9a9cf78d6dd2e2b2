use crate::{helper, parse, tracker::Tracker};
use battbar_core::{PowerError, PowerUpdate, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{error, warn};

/// Live-reloadable subset of the configuration the poll loop consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Executable that reports power status on stdout.
    pub helper: PathBuf,
    /// Seconds between helper invocations.
    pub interval_secs: u64,
}

/// Run one poll cycle: invoke the helper, parse its output, feed the
/// tracker.
///
/// Any failure skips the tracker entirely, so a bad cycle leaves the last
/// good reading in place.
pub async fn run_cycle(helper_path: &Path, tracker: &mut Tracker) -> Result<PowerUpdate> {
    let result = helper::invoke(helper_path, &[]).await?;
    let reading = parse::parse(&result.text)?;
    let report = tracker.update(reading);
    Ok(PowerUpdate {
        reading,
        changed: report.changed,
        estimate: report.estimate,
    })
}

/// Serial poll loop: one cycle, then sleep, forever.
///
/// A [`PowerUpdate`] is sent for every successful cycle, changed or not.
/// Steady-state failures are logged and the loop re-arms; the next timer
/// is only started after the cycle fully completes, so cycles never
/// overlap. A spawn failure on the very first cycle is fatal and returned
/// to the caller; there is no retry within a cycle — the next scheduled
/// poll is the retry.
pub async fn poll_loop(
    mut settings_rx: watch::Receiver<PollSettings>,
    updates: mpsc::Sender<PowerUpdate>,
) -> Result<()> {
    let mut tracker = Tracker::new(settings_rx.borrow().interval_secs);
    let mut first_cycle = true;

    loop {
        let settings = settings_rx.borrow_and_update().clone();
        tracker.set_interval_secs(settings.interval_secs);

        match run_cycle(&settings.helper, &mut tracker).await {
            Ok(update) => {
                if updates.send(update).await.is_err() {
                    return Ok(()); // front-end gone
                }
            }
            Err(err) => {
                if first_cycle && err.is_spawn_failure() {
                    error!("cannot start polling: {err}");
                    return Err(err);
                }
                report_cycle_failure(&err);
            }
        }

        first_cycle = false;
        tokio::time::sleep(Duration::from_secs(settings.interval_secs)).await;
    }
}

fn report_cycle_failure(err: &PowerError) {
    match err {
        PowerError::HelperExit { diagnostic, .. } if !diagnostic.is_empty() => {
            warn!("{err}; helper said:\n{diagnostic}");
        }
        PowerError::Parse(_) => {
            warn!("{err}\n{}", parse::PROTOCOL_HINT);
        }
        _ => warn!("poll cycle failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "battbar-poll-{}-{name}.sh",
            std::process::id()
        ));
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn successful_cycle_updates_tracker() {
        let path = script("good", "echo battery=75\necho ac_line=on\n");
        let mut tracker = Tracker::new(10);

        let update = run_cycle(&path, &mut tracker).await.unwrap();
        assert!(update.changed);
        assert_eq!(update.reading.battery_percent, 75);
        assert!(update.reading.ac_line);
        assert_eq!(tracker.last_reading(), Some(update.reading));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failing_helper_leaves_tracked_state_untouched() {
        let good = script("pre", "echo battery=60\necho ac_line=off\n");
        let bad = script("exit2", "exit 2\n");
        let mut tracker = Tracker::new(10);

        run_cycle(&good, &mut tracker).await.unwrap();
        let before = tracker.last_reading();

        assert!(run_cycle(&bad, &mut tracker).await.is_err());
        assert_eq!(tracker.last_reading(), before);
        let _ = std::fs::remove_file(good);
        let _ = std::fs::remove_file(bad);
    }

    #[tokio::test]
    async fn malformed_output_leaves_tracked_state_untouched() {
        let garbled = script("garbled", "echo charge level unknown\n");
        let mut tracker = Tracker::new(10);

        let err = run_cycle(&garbled, &mut tracker).await.unwrap_err();
        assert!(matches!(err, PowerError::Parse(_)));
        assert!(tracker.last_reading().is_none());
        let _ = std::fs::remove_file(garbled);
    }

    #[tokio::test]
    async fn spawn_failure_on_first_cycle_ends_the_loop() {
        let (_tx, rx) = watch::channel(PollSettings {
            helper: PathBuf::from("/nonexistent/battbar-helper"),
            interval_secs: 1,
        });
        let (update_tx, _update_rx) = mpsc::channel(4);

        let err = poll_loop(rx, update_tx).await.unwrap_err();
        assert!(err.is_spawn_failure());
    }

    #[tokio::test]
    async fn loop_delivers_updates_every_cycle() {
        let path = script("loop", "echo battery=50\necho ac_line=on\n");
        let (_tx, rx) = watch::channel(PollSettings {
            helper: path.clone(),
            interval_secs: 1,
        });
        let (update_tx, mut update_rx) = mpsc::channel(4);
        let task = tokio::spawn(poll_loop(rx, update_tx));

        let first = update_rx.recv().await.unwrap();
        assert!(first.changed);
        let second = update_rx.recv().await.unwrap();
        assert!(!second.changed); // same reading, still delivered

        task.abort();
        let _ = std::fs::remove_file(path);
    }
}
