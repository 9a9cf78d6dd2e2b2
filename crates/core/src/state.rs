use serde::{Deserialize, Serialize};

/// One sampled power-supply reading — produced once per poll cycle,
/// immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerReading {
    /// Remaining charge in percent. Stored as reported: sources
    /// occasionally deliver values above 100 (flagged at parse time) and
    /// the parser passes negative integers through untouched.
    pub battery_percent: i32,
    /// Whether the system is connected to external power.
    pub ac_line: bool,
}

impl PowerReading {
    /// Charge level projected into the display-safe `[0, 100]` range.
    /// Out-of-range source values are the front-end's problem only up to
    /// here.
    #[must_use]
    pub fn clamped_percent(&self) -> u8 {
        self.battery_percent.clamp(0, 100) as u8
    }
}

/// Last good reading, as seen by the front-end — all drawing reads from
/// this snapshot.
///
/// Failed poll cycles never touch it, so whatever the bar currently shows
/// stays up until the next successful sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorState {
    last: Option<PowerReading>,
}

impl IndicatorState {
    /// Replace the snapshot with a fresh reading.
    pub fn apply(&mut self, reading: PowerReading) {
        self.last = Some(reading);
    }

    /// Battery percent of the last good reading; 0 before the first
    /// successful poll.
    #[must_use]
    pub fn battery_percent(&self) -> i32 {
        self.last.map_or(0, |r| r.battery_percent)
    }

    /// AC-line flag of the last good reading; `false` before the first
    /// successful poll.
    #[must_use]
    pub fn ac_line(&self) -> bool {
        self.last.is_some_and(|r| r.ac_line)
    }

    /// The full last reading, if any cycle has succeeded yet.
    #[must_use]
    pub fn reading(&self) -> Option<PowerReading> {
        self.last
    }
}
