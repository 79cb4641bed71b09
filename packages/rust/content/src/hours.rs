//! Compact opening-hours notation expander.
//!
//! Turns lines like `Mo-Fr 09:00-18:00` or `Sa,Su 10:00-14:00` into one span
//! per day for the structured-data `openingHoursSpecification` field. Lines
//! that do not match the compact notation are skipped; callers keep showing
//! the raw strings in human-facing output.

use std::sync::LazyLock;

use regex::Regex;

static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z,-]+)\s+(\d{2}:\d{2})-(\d{2}:\d{2})$").unwrap());

const DAY_ORDER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// One expanded opening-hours span for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHoursSpan {
    /// Full day name (`Monday` … `Sunday`).
    pub day: String,
    /// Opening time, `HH:MM`.
    pub opens: String,
    /// Closing time, `HH:MM`.
    pub closes: String,
}

/// Expand all compact-notation lines into per-day spans.
pub fn expand_opening_hours(lines: &[String]) -> Vec<OpeningHoursSpan> {
    lines.iter().flat_map(|line| expand_line(line)).collect()
}

fn expand_line(line: &str) -> Vec<OpeningHoursSpan> {
    let Some(caps) = HOURS_RE.captures(line.trim()) else {
        return Vec::new();
    };

    let opens = &caps[2];
    let closes = &caps[3];

    expand_day_range(&caps[1])
        .into_iter()
        .map(|day| OpeningHoursSpan {
            day: full_day_name(&day),
            opens: opens.to_string(),
            closes: closes.to_string(),
        })
        .collect()
}

/// Expand `Mo-Fr` / `Sa,Su` / `Mo,We-Fr` into individual day abbreviations.
/// Ranges with an unknown endpoint expand to nothing.
fn expand_day_range(range: &str) -> Vec<String> {
    let mut days = Vec::new();

    for part in range.split(',') {
        if let Some((start, end)) = part.split_once('-') {
            let start_idx = DAY_ORDER.iter().position(|d| *d == start);
            let end_idx = DAY_ORDER.iter().position(|d| *d == end);
            if let (Some(s), Some(e)) = (start_idx, end_idx) {
                if s <= e {
                    days.extend(DAY_ORDER[s..=e].iter().map(|d| d.to_string()));
                }
            }
        } else {
            days.push(part.trim().to_string());
        }
    }

    days
}

fn full_day_name(abbrev: &str) -> String {
    match abbrev {
        "Mo" => "Monday",
        "Tu" => "Tuesday",
        "We" => "Wednesday",
        "Th" => "Thursday",
        "Fr" => "Friday",
        "Sa" => "Saturday",
        "Su" => "Sunday",
        other => return other.to_string(),
    }
    .to_string()
}
