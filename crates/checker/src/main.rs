//! battbar-check — one-shot power status reporter.
//!
//! Reads the battery state once and prints the line protocol consumed by
//! the battbar daemon:
//!
//! ```text
//! battery=<0-100>
//! ac_line=<on|off>
//! ```
//!
//! Exits 0 on success, 1 when no reading could be obtained.

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match battbar_power::sysfs::read_power() {
        Some(reading) => {
            println!(
                "battery={}\nac_line={}",
                reading.battery_percent,
                if reading.ac_line { "on" } else { "off" }
            );
            ExitCode::SUCCESS
        }
        None => {
            tracing::error!("cannot determine battery level");
            ExitCode::from(1)
        }
    }
}
