use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Accepts `2025-01-10T09:00:00` (optionally with fractional seconds or a
/// trailing `Z`) or a bare date, which is taken as midnight.
pub fn parse_datetime_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDateTime> {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    let s = s.as_ref();
    let s = s.strip_suffix('Z').unwrap_or(s);
    if let Ok(t) = NaiveDateTime::parse_from_str(s, TIME_FMT) {
        return Ok(t);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .with_context(|| format!("invalid date/time: {}", s))
}

pub fn parse_datetime_opt<S: AsRef<str>>(s: Option<S>) -> anyhow::Result<Option<NaiveDateTime>> {
    match s {
        Some(s) => parse_datetime_str(s).map(Some),
        None => Ok(None),
    }
}

pub fn like_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

pub fn require_text(field: &str, value: &str, max_len: usize) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        bail!("{} is required", field);
    }
    check_len(field, value, max_len)
}

pub fn check_len(field: &str, value: &str, max_len: usize) -> anyhow::Result<()> {
    if value.chars().count() > max_len {
        bail!("{} must be at most {} characters", field, max_len);
    }
    Ok(())
}

pub fn check_email(field: &str, value: &str) -> anyhow::Result<()> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => bail!("{} must be a valid email address", field),
    }
}
