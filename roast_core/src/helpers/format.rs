use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

const OFFSET_PATTERNS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];
const NAIVE_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Converts a raw smallest-unit token amount into a human-readable float.
///
/// Numbers and numeric strings are accepted; anything else counts as zero.
/// Missing or negative decimals are treated as zero.
pub fn normalize_amount(raw: &Value, decimals: Option<i64>) -> f64 {
    let amount = coerce_f64(raw).unwrap_or(0.0);
    let decimals = decimals.unwrap_or(0).clamp(0, i32::MAX as i64) as i32;

    amount / 10f64.powi(decimals)
}

pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Renders an ISO-8601 timestamp as `MM/DD/YYYY HH:MM:SS` in its own offset.
/// Empty or unparsable input comes back unchanged.
pub fn format_iso_timestamp(iso: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }

    parse_iso(iso).unwrap_or_else(|| iso.to_string())
}

fn parse_iso(iso: &str) -> Option<String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(iso) {
        return Some(datetime.format(DISPLAY_FORMAT).to_string());
    }

    for pattern in OFFSET_PATTERNS {
        if let Ok(datetime) = DateTime::parse_from_str(iso, pattern) {
            return Some(datetime.format(DISPLAY_FORMAT).to_string());
        }
    }

    for pattern in NAIVE_PATTERNS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(iso, pattern) {
            return Some(datetime.format(DISPLAY_FORMAT).to_string());
        }
    }

    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.format(DISPLAY_FORMAT).to_string())
}

/// Renders Unix epoch seconds as `MM/DD/YYYY HH:MM:SS` in UTC.
pub fn format_unix_timestamp(unix_seconds: i64) -> String {
    match DateTime::from_timestamp(unix_seconds, 0) {
        Some(datetime) => datetime.format(DISPLAY_FORMAT).to_string(),
        None => unix_seconds.to_string(),
    }
}

/// Formats a dollar value with thousands separators and two decimals,
/// e.g. `-$1,234.50`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_negative =
        value < 0.0 && formatted.bytes().any(|byte| matches!(byte, b'1'..=b'9'));
    let sign = if is_negative { "-" } else { "" };

    format!("{}${}.{}", sign, grouped, fraction)
}
