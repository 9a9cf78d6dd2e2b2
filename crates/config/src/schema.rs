use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `battbar.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Power polling settings — the only section the core consumes.
    pub poll: PollConfig,
    /// Bar geometry, read by the front-end.
    pub bar: BarConfig,
    /// Indicator colors, read by the front-end.
    pub colors: ColorConfig,
}

/// Settings for the battery poll loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between helper invocations. Must be at least 1.
    pub interval_secs: u64,
    /// Executable that reports power status on stdout.
    pub helper: PathBuf,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            helper: PathBuf::from("/usr/lib/battbar/battbar-check"),
        }
    }
}

/// Which screen edge the bar hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Bar geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Bar thickness in pixels.
    pub thickness: u32,
    /// Screen edge the bar is drawn against.
    pub edge: Edge,
    /// Keep the bar above other windows.
    pub always_on_top: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            thickness: 3,
            edge: Edge::Bottom,
            always_on_top: false,
        }
    }
}

/// Fill-bar color scheme (hex strings, e.g. `"#6b8e23"`).
///
/// `*_fill` paints the charged portion, `*_empty` the rest; the `online`
/// pair is used while on AC power, `offline` while on battery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub online_fill: String,
    pub online_empty: String,
    pub offline_fill: String,
    pub offline_empty: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            online_fill:   "#00ff00".to_string(), // green
            online_empty:  "#6b8e23".to_string(), // olive drab
            offline_fill:  "#0000ff".to_string(), // blue
            offline_empty: "#ff0000".to_string(), // red
        }
    }
}
