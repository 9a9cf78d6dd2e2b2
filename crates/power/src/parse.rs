use battbar_core::{ParseError, PowerReading};

/// Key whose value is the battery charge percentage.
const BATTERY_KEY: &str = "battery=";
/// Token whose presence anywhere in the text marks AC power as connected.
const AC_ON_TOKEN: &str = "ac_line=on";

/// Operator-facing description of the required helper output, logged
/// alongside every parse failure.
pub const PROTOCOL_HINT: &str = "\
helper output must contain two lines:
  battery=<value between 0 and 100>
  ac_line=<on|off>
example 1:
  battery=25
  ac_line=on
example 2:
  battery=75
  ac_line=off";

/// Characters allowed to follow the battery digits.
fn is_terminator(b: u8) -> bool {
    matches!(b, b'\n' | b' ' | b'%' | b'.')
}

/// Parse helper output into a [`PowerReading`].
///
/// The text must contain `battery=<integer>` somewhere; order and
/// surrounding whitespace don't matter. `ac_line=on` is optional — its
/// absence reads as "off", indistinguishable from an explicit off.
///
/// Values above 100 are accepted with a logged warning and passed through
/// uncapped; negative integers pass through as well. Only structurally
/// malformed text fails.
pub fn parse(text: &str) -> Result<PowerReading, ParseError> {
    let start = text
        .find(BATTERY_KEY)
        .ok_or(ParseError::MalformedBatteryField)?
        + BATTERY_KEY.len();
    let value = &text[start..];

    let digits_from = usize::from(value.starts_with('-'));
    let digits_len = value[digits_from..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(ParseError::MalformedBatteryField);
    }

    let end = digits_from + digits_len;
    if let Some(&after) = value.as_bytes().get(end) {
        if !is_terminator(after) {
            return Err(ParseError::MalformedBatteryField);
        }
    }

    let battery_percent: i32 = value[..end]
        .parse()
        .map_err(|_| ParseError::MalformedBatteryField)?;

    if battery_percent > 100 {
        tracing::warn!("battery level out of range: {battery_percent}%");
    }

    Ok(PowerReading {
        battery_percent,
        ac_line: text.contains(AC_ON_TOKEN),
    })
}
