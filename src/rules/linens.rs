//! `linenColor` rules: a color next to linens, napkins or tablecloths, in
//! either order.

use super::helpers::group;
use crate::{BucketMask, Extracted, FieldPath, FieldRule, FieldValue};

fn color(caps: &regex::Captures<'_>) -> Option<Extracted> {
    Some(Extracted::Absolute(FieldValue::Text(group(caps, 1)?.to_lowercase())))
}

/// "switch to red linens", "use blue napkins".
fn rule_color_then_linen() -> FieldRule {
    rule! {
        name: "linen color (<color> linens)",
        field: FieldPath::LinenColor,
        pattern: r"(?i)(?:switch|change|use)?\s*(?:to|with)?\s*(red|blue|green|white|black|purple|gold|silver)\s*(?:linens?|napkins?|tablecloths?)",
        buckets: BucketMask::COLORISH | BucketMask::LINENISH,
        confidence: 0.9,
        extract: |caps| { color(caps) },
    }
}

/// "linens in gold", "tablecloths should be white".
fn rule_linen_then_color() -> FieldRule {
    rule! {
        name: "linen color (linens [in|to|should be] <color>)",
        field: FieldPath::LinenColor,
        pattern: r"(?i)(?:linens?|napkins?|tablecloths?)\s*(?:in|to|should be)?\s*(red|blue|green|white|black|purple|gold|silver)",
        buckets: BucketMask::COLORISH | BucketMask::LINENISH,
        confidence: 0.85,
        extract: |caps| { color(caps) },
    }
}

pub(super) fn rules() -> Vec<FieldRule> {
    vec![rule_color_then_linen(), rule_linen_then_color()]
}
