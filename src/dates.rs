use chrono::NaiveDate;

use crate::error::{ApiError, Result};

// Formats tried in order for dash-separated and free-form inputs.
const FLEX_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%Y/%m/%d",
    "%Y%m%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Normalize a raw statement date to `YYYY-MM-DD`.
///
/// Slash dates are read day-first (`DD/MM/YYYY`): `03/04/2024` is April 3rd,
/// not March 4th. Everything else goes through a fixed format ladder, so
/// already-normalized input passes through unchanged.
pub fn normalize_date(raw: &str) -> Result<String> {
    let s = raw.trim();
    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return parse_dmy(parts[0], parts[1], parts[2])
                .ok_or_else(|| ApiError::InvalidDateFormat(raw.to_string()));
        }
    }
    parse_flexible(s).ok_or_else(|| ApiError::InvalidDateFormat(raw.to_string()))
}

fn parse_dmy(day: &str, month: &str, year: &str) -> Option<String> {
    let d: u32 = day.trim().parse().ok()?;
    let m: u32 = month.trim().parse().ok()?;
    let y: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d).map(|dt| dt.format("%Y-%m-%d").to_string())
}

fn parse_flexible(s: &str) -> Option<String> {
    for fmt in FLEX_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    None
}
