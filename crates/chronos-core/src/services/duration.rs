//! Compact duration notation: `1h30m`, `45m`, `2h`, `90s`, `1.5h`, `1:30`.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::{ChronosError, Result};

static UNIT_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d+)?[hms])+$").expect("valid regex"));
static UNIT_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.(\d+))?([hms])").expect("valid regex"));
static CLOCK_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):([0-5]\d)$").expect("valid regex"));

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Longest duration a single entry may carry: one calendar day.
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 3600);

/// Parse compact unit notation or `H:MM` into a duration.
///
/// Values above [`MAX_DURATION`] are rejected as invalid.
pub fn parse(text: &str) -> Result<Duration> {
    let parsed = parse_unbounded(text)?;
    if parsed > MAX_DURATION {
        return Err(ChronosError::InvalidDuration(text.to_string()));
    }
    Ok(parsed)
}

fn parse_unbounded(text: &str) -> Result<Duration> {
    let trimmed = text.trim();
    let invalid = || ChronosError::InvalidDuration(text.to_string());

    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    if let Some(caps) = CLOCK_FORM.captures(trimmed) {
        let hours: u64 = caps[1].parse().map_err(|_| invalid())?;
        let minutes: u64 = caps[2].parse().map_err(|_| invalid())?;
        let secs = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60))
            .ok_or_else(invalid)?;
        return Ok(Duration::from_secs(secs));
    }

    if !UNIT_FORM.is_match(trimmed) {
        return Err(invalid());
    }

    let mut total_nanos: u128 = 0;
    for caps in UNIT_GROUP.captures_iter(trimmed) {
        let unit_nanos = match &caps[3] {
            "h" => 3600 * NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            _ => NANOS_PER_SEC,
        };
        let whole: u128 = caps[1].parse().map_err(|_| invalid())?;
        let mut nanos = whole.checked_mul(unit_nanos).ok_or_else(invalid)?;
        if let Some(fraction) = caps.get(2) {
            let digits = fraction.as_str();
            if digits.len() > 18 {
                return Err(invalid());
            }
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            let scale = 10u128.pow(digits.len() as u32);
            nanos += numerator * unit_nanos / scale;
        }
        total_nanos = total_nanos.checked_add(nanos).ok_or_else(invalid)?;
    }

    let secs = u64::try_from(total_nanos / NANOS_PER_SEC).map_err(|_| invalid())?;
    let subsec = (total_nanos % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, subsec))
}

/// Format a duration compactly, largest unit first, omitting zero units.
/// Sub-second precision is dropped; zero formats as `0s`.
pub fn format(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        return "0s".to_string();
    }

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}s"));
    }
    out
}
