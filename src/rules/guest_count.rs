//! `guestCount` rules.
//!
//! Counts are one to three digits preceded by a word boundary, so "1000
//! guests" does not read as "000 guests".

use super::helpers::{group, parse_count};
use crate::{BucketMask, Extracted, FieldPath, FieldRule, FieldValue};

/// "66 guests", "70 people", and the relative "4 more RSVPs".
fn rule_count_mentioned() -> FieldRule {
    rule! {
        name: "guest count (<n> [more] guests)",
        field: FieldPath::GuestCount,
        pattern: r"(?i)\b(\d{1,3})\s*(more\s*)?(guests?|people|attendees|rsvp)",
        buckets: BucketMask::HAS_DIGITS,
        confidence: 0.85,
        extract: |caps| {
            let count = parse_count(group(caps, 1)?)?;
            if caps.get(2).is_some() {
                Some(Extracted::Delta(count))
            } else {
                Some(Extracted::Absolute(FieldValue::Number(count)))
            }
        },
    }
}

fn rule_up_to() -> FieldRule {
    rule! {
        name: "guest count (up to <n>)",
        field: FieldPath::GuestCount,
        pattern: r"(?i)up\s+to\s+(\d{1,3})\s*(guests?|people|attendees)",
        buckets: BucketMask::HAS_DIGITS,
        confidence: 0.9,
        extract: |caps| {
            Some(Extracted::Absolute(FieldValue::Number(parse_count(group(caps, 1)?)?)))
        },
    }
}

fn rule_expecting() -> FieldRule {
    rule! {
        name: "guest count (expecting [about] <n>)",
        field: FieldPath::GuestCount,
        pattern: r"(?i)expecting\s+(?:about\s+)?(\d{1,3})\s*(guests?|people|total)",
        buckets: BucketMask::HAS_DIGITS,
        confidence: 0.85,
        extract: |caps| {
            Some(Extracted::Absolute(FieldValue::Number(parse_count(group(caps, 1)?)?)))
        },
    }
}

pub(super) fn rules() -> Vec<FieldRule> {
    vec![rule_count_mentioned(), rule_up_to(), rule_expecting()]
}
