//! battbar — battery fill-bar indicator daemon.
//!
//! Polls an external status helper on a fixed interval and keeps the last
//! good power reading available to the drawing front-end. Remaining-time
//! estimates go to stdout; everything else is logged.
//!
//! Run with:  `RUST_LOG=info battbar`

use anyhow::Result;
use battbar_config::IndicatorConfig;
use battbar_core::IndicatorState;
use battbar_power::poll::{poll_loop, PollSettings};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("battbar v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = battbar_config::default_path();
    let config = battbar_config::load(&config_path)?;

    let (settings_tx, settings_rx) = watch::channel(poll_settings(&config));
    let (update_tx, mut updates) = mpsc::channel(4);

    let mut poller = tokio::spawn(poll_loop(settings_rx, update_tx));
    let mut config_changes = battbar_config::watch(&config_path);

    let mut state = IndicatorState::default();

    loop {
        tokio::select! {
            Some(update) = updates.recv() => {
                state.apply(update.reading);
                if update.changed {
                    info!(
                        "battery {}%, AC {}",
                        state.battery_percent(),
                        if state.ac_line() { "on-line" } else { "off-line" },
                    );
                }
                if let Some(estimate) = update.estimate {
                    println!("{estimate}");
                }
            }

            Some(()) = config_changes.recv() => {
                match battbar_config::load(&config_path) {
                    Ok(fresh) => {
                        info!("config reloaded");
                        let _ = settings_tx.send(poll_settings(&fresh));
                    }
                    Err(e) => warn!("config reload failed, keeping previous: {e}"),
                }
            }

            res = &mut poller => {
                // Either a fatal first-cycle failure or the update channel
                // closed — nothing left to poll for.
                res??;
                return Ok(());
            }
        }
    }
}

fn poll_settings(config: &IndicatorConfig) -> PollSettings {
    PollSettings {
        helper: config.poll.helper.clone(),
        interval_secs: config.poll.interval_secs,
    }
}
