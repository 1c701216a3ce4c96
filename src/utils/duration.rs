use crate::utils::error::{Result, TriggerError};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::OnceLock;
use std::time::Duration;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*(s|ms|us)?\s*$")
            .expect("duration pattern is valid")
    })
}

/// Parses `1.5`, `30s`, `500ms` or `250us`. A bare number is seconds.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = |reason: &str| TriggerError::InvalidConfigValueError {
        field: "duration".to_string(),
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let caps = duration_pattern()
        .captures(input)
        .ok_or_else(|| invalid("expected a number with optional unit s, ms or us"))?;

    let value: f64 = caps[1]
        .parse()
        .map_err(|_| invalid("not a number"))?;

    let nanos_per_unit = match caps.get(2).map(|m| m.as_str()) {
        None | Some("s") => 1e9,
        Some("ms") => 1e6,
        Some("us") => 1e3,
        Some(_) => unreachable!(),
    };

    nanos_to_duration(value * nanos_per_unit).ok_or_else(|| invalid("out of range"))
}

// Rounded to the nanosecond so that `0.3` is exactly 300ms.
fn nanos_to_duration(nanos: f64) -> Option<Duration> {
    if !nanos.is_finite() || nanos < 0.0 || nanos >= u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(nanos.round() as u64))
}

/// clap value parser adapter.
pub fn parse_duration_arg(input: &str) -> std::result::Result<Duration, String> {
    parse_duration(input).map_err(|e| e.to_string())
}

pub fn deserialize_opt_duration<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Seconds(s)) => nanos_to_duration(s * 1e9)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("duration out of range: {}", s))),
        Some(Raw::Text(t)) => parse_duration(&t)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Formats as `01h 23min 45s`, dropping the hour field when it is zero
/// and showing milliseconds for sub-minute spans.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}h {:02}min {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{:02}min {:02}s", minutes, seconds)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
