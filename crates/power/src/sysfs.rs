use battbar_core::PowerReading;

/// Read power state from the Linux sysfs power-supply interface.
///
/// Returns the first battery found, or `None` if the system has no battery
/// (desktop, VM).
pub fn read_power() -> Option<PowerReading> {
    for name in ["BAT0", "BAT1", "BAT2"] {
        let base = std::path::Path::new("/sys/class/power_supply").join(name);
        if !base.exists() {
            continue;
        }

        let capacity = std::fs::read_to_string(base.join("capacity")).ok()?;
        let status   = std::fs::read_to_string(base.join("status")).ok()?;

        // Some firmwares report slightly over 100.
        let battery_percent = capacity.trim().parse::<i32>().ok()?.min(100);
        let ac_line = matches!(status.trim(), "Charging" | "Full");

        return Some(PowerReading {
            battery_percent,
            ac_line,
        });
    }
    None
}
