use battbar_core::{Estimate, PowerReading};

/// Battery percent the discharge estimate counts down towards.
pub const CRITICAL_PERCENT: i32 = 5;

/// Outcome of feeding one reading to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeReport {
    /// The reading differs field-wise from the previous one. The first
    /// reading always counts as changed.
    pub changed: bool,
    /// Remaining-time estimate, when the level moved this cycle.
    pub estimate: Option<Estimate>,
}

/// Holds the last known reading and estimates remaining time from the
/// level trend.
///
/// The estimator keeps a baseline percent and counts poll cycles since the
/// baseline was (re)established. Once the level moves away from the
/// baseline, the observed drain/charge rate is extrapolated to the
/// critical level or to full, and the window restarts at the current
/// level.
#[derive(Debug, Clone)]
pub struct Tracker {
    interval_secs: u64,
    last: Option<PowerReading>,
    baseline_percent: Option<i32>,
    elapsed_polls: u64,
}

impl Tracker {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval_secs,
            last: None,
            baseline_percent: None,
            elapsed_polls: 0,
        }
    }

    /// Adjust the poll interval used to convert cycle counts to seconds
    /// (applies on config reload).
    pub fn set_interval_secs(&mut self, interval_secs: u64) {
        self.interval_secs = interval_secs;
    }

    /// The reading stored by the most recent [`Tracker::update`], if any.
    pub fn last_reading(&self) -> Option<PowerReading> {
        self.last
    }

    /// Absorb one fresh reading: detect change against the stored one,
    /// store it, and advance the estimator by one cycle.
    pub fn update(&mut self, reading: PowerReading) -> ChangeReport {
        let changed = self.last != Some(reading);
        self.last = Some(reading);
        let estimate = self.advance(reading.battery_percent);
        ChangeReport { changed, estimate }
    }

    fn advance(&mut self, current: i32) -> Option<Estimate> {
        let Some(baseline) = self.baseline_percent else {
            // First reading establishes the baseline; never unset again.
            self.baseline_percent = Some(current);
            self.elapsed_polls = 0;
            return None;
        };

        self.elapsed_polls += 1;

        let diff = i64::from(baseline - current);
        if diff == 0 {
            return None;
        }

        let window_secs = self.elapsed_polls as i64 * self.interval_secs as i64;
        let estimate = if diff > 0 {
            let secs = window_secs * i64::from(current - CRITICAL_PERCENT) / diff;
            Estimate::UntilCritical(secs.max(0) as u64)
        } else {
            let secs = window_secs * i64::from(current - 100) / diff;
            Estimate::UntilFull(secs.max(0) as u64)
        };

        self.baseline_percent = Some(current);
        self.elapsed_polls = 0;
        Some(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(percent: i32, ac: bool) -> PowerReading {
        PowerReading {
            battery_percent: percent,
            ac_line: ac,
        }
    }

    #[test]
    fn first_update_always_reports_changed() {
        let mut tracker = Tracker::new(10);
        let report = tracker.update(reading(100, true));
        assert!(report.changed);
        assert!(report.estimate.is_none());
    }

    #[test]
    fn identical_reading_reports_unchanged() {
        let mut tracker = Tracker::new(10);
        tracker.update(reading(80, false));
        let report = tracker.update(reading(80, false));
        assert!(!report.changed);
    }

    #[test]
    fn ac_flip_alone_counts_as_changed() {
        let mut tracker = Tracker::new(10);
        tracker.update(reading(80, true));
        let report = tracker.update(reading(80, false));
        assert!(report.changed);
    }

    #[test]
    fn discharge_estimate_after_level_drop() {
        let mut tracker = Tracker::new(10);
        tracker.update(reading(100, false)); // baseline 100
        assert!(tracker.update(reading(100, false)).estimate.is_none());

        // Two cycles elapsed, 10 points drained: 2 * 10 * (90-5) / 10.
        let report = tracker.update(reading(90, false));
        assert_eq!(report.estimate, Some(Estimate::UntilCritical(170)));

        // Baseline has been reset to 90 — no trend yet from here.
        assert!(tracker.update(reading(90, false)).estimate.is_none());
    }

    #[test]
    fn elapsed_cycles_accumulate_while_level_is_flat() {
        let mut tracker = Tracker::new(10);
        tracker.update(reading(100, false));
        tracker.update(reading(100, false));
        tracker.update(reading(100, false));

        // Three cycles since baseline: 3 * 10 * (98-5) / 2.
        let report = tracker.update(reading(98, false));
        assert_eq!(report.estimate, Some(Estimate::UntilCritical(1395)));
    }

    #[test]
    fn charge_estimate_when_level_rises() {
        let mut tracker = Tracker::new(10);
        tracker.update(reading(50, true)); // baseline 50

        // One cycle, 10 points gained: 1 * 10 * (60-100) / -10.
        let report = tracker.update(reading(60, true));
        assert_eq!(report.estimate, Some(Estimate::UntilFull(40)));
    }

    #[test]
    fn discharge_below_critical_clamps_to_zero() {
        let mut tracker = Tracker::new(10);
        tracker.update(reading(6, false));
        let report = tracker.update(reading(3, false));
        assert_eq!(report.estimate, Some(Estimate::UntilCritical(0)));
    }
}
