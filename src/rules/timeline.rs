//! `timeline.start` rules.

use super::helpers::group;
use crate::{BucketMask, Extracted, FieldPath, FieldRule, FieldValue};
use chrono::NaiveTime;

/// Normalize a 12-hour clock reading to `H:MM AM|PM`.
///
/// Returns `None` for hours outside 1..=12 or minutes outside 0..=59.
pub(crate) fn normalize_clock(hour: &str, minute: Option<&str>, period: &str) -> Option<String> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.map_or(Some(0), |m| m.parse().ok())?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let pm = period.eq_ignore_ascii_case("pm");
    let hour24 = hour % 12 + if pm { 12 } else { 0 };
    let time = NaiveTime::from_hms_opt(hour24, minute, 0)?;
    Some(time.format("%-I:%M %p").to_string())
}

/// "push dinner to 7:30 PM", "start at 6pm", "at 5:30 pm".
fn rule_clock_time() -> FieldRule {
    rule! {
        name: "start time ([push|move|change|set] [dinner|event|start] [to|at|for] <h[:mm]> am|pm)",
        field: FieldPath::TimelineStart,
        pattern: r"(?i)(?:push|move|change|set)?\s*(?:dinner|event|start)?\s*(?:to|at|for)?\s*(\d{1,2}):?(\d{2})?\s*(am|pm)\b",
        buckets: BucketMask::HAS_DIGITS,
        confidence: 0.9,
        extract: |caps| {
            let clock = normalize_clock(group(caps, 1)?, group(caps, 2), group(caps, 3)?)?;
            Some(Extracted::Absolute(FieldValue::Text(clock)))
        },
    }
}

pub(super) fn rules() -> Vec<FieldRule> {
    vec![rule_clock_time()]
}
