//! Token lifetime parsing for the CLI and configuration.
//! Used by: bin/docgate-token.
//!
//! Accepts `<number><unit>` sequences (`90m`, `1h30m`, `1.5h`, `-1h`) with
//! units `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`, or a bare integer of hours.
//! Empty input means 24 hours.

use chrono::Duration;

use crate::error::{Error, Result};

const DEFAULT_TTL_HOURS: i64 = 24;
const MAX_FRACTION_DIGITS: usize = 18;

pub fn parse_duration(input: &str) -> Result<Duration> {
    if input.is_empty() {
        return Ok(Duration::hours(DEFAULT_TTL_HOURS));
    }
    if let Some(duration) = parse_expression(input) {
        return Ok(duration);
    }
    input
        .parse::<i64>()
        .ok()
        .and_then(Duration::try_hours)
        .ok_or_else(|| Error::InvalidDuration(input.to_string()))
}

fn unit_nanos(unit: &str) -> Option<i128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    })
}

fn parse_expression(input: &str) -> Option<Duration> {
    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if rest == "0" {
        return Some(Duration::zero());
    }
    if rest.is_empty() {
        return None;
    }

    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    let mut total: i128 = 0;
    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_numeric(c)).unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail.find(is_numeric).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        rest = tail;

        let scale = unit_nanos(unit)?;
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut part = whole.checked_mul(scale)?;
        let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let digits: i128 = fraction.parse().ok()?;
            let denominator = 10i128.checked_pow(fraction.len() as u32)?;
            part = part.checked_add(digits.checked_mul(scale)? / denominator)?;
        }
        total = total.checked_add(part)?;
    }

    let nanos = i64::try_from(if negative { -total } else { total }).ok()?;
    Some(Duration::nanoseconds(nanos))
}
