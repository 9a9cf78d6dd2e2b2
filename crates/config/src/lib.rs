pub mod schema;
pub mod watcher;

pub use schema::{BarConfig, ColorConfig, Edge, IndicatorConfig, PollConfig};
pub use watcher::watch;

use battbar_core::{PowerError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `IndicatorConfig::default()`
/// if the file doesn't exist so the indicator always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<IndicatorConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(IndicatorConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PowerError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: IndicatorConfig =
        toml::from_str(&raw).map_err(|e| PowerError::Config(format!("TOML parse error: {e}")))?;

    validate(&config)?;
    Ok(config)
}

/// Reject configurations the poll loop cannot run with.
pub fn validate(config: &IndicatorConfig) -> Result<()> {
    if config.poll.interval_secs < 1 {
        return Err(PowerError::Config(
            "poll.interval_secs must be at least 1".into(),
        ));
    }
    if config.bar.thickness < 1 {
        return Err(PowerError::Config("bar.thickness must be at least 1".into()));
    }
    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("battbar").join("battbar.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = IndicatorConfig::default();
        assert!(validate(&config).is_ok());
        assert_eq!(config.poll.interval_secs, 10);
        assert_eq!(config.bar.thickness, 3);
        assert_eq!(config.bar.edge, Edge::Bottom);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: IndicatorConfig = toml::from_str(
            r#"
            [poll]
            interval_secs = 30

            [bar]
            edge = "left"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll.interval_secs, 30);
        assert_eq!(config.bar.edge, Edge::Left);
        // untouched sections keep their defaults
        assert_eq!(config.bar.thickness, 3);
        assert_eq!(config.colors.offline_empty, "#ff0000");
    }

    #[test]
    fn zero_interval_fails_validation() {
        let mut config = IndicatorConfig::default();
        config.poll.interval_secs = 0;
        assert!(validate(&config).is_err());
    }
}
