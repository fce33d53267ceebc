//! Value and confidence resolution.
//!
//! An extractor hands back an [`Extracted`] value. Resolution turns it into the
//! final [`FieldValue`] of a suggestion:
//!
//! ```text
//! Extracted ──┬─ Absolute(v) -> v
//!             └─ Delta(n)    -> context.current_guest_count + n   (guestCount only)
//! ```
//!
//! The delta is resolved against the guest count the caller passed in for this
//! run, never a value accepted later.
//!
//! Confidence starts from the rule's base value, gains `BOOST` when the message
//! carries a boost token, and is capped at `CONFIDENCE_CAP`. Scores are rounded
//! to millionths, which clears float noise from the sum (0.85 + 0.05 is 0.9,
//! not 0.9000000000000001) without rewriting a base such as 0.333.

use crate::{Context, Extracted, FieldPath, FieldValue};
use tracing::warn;

pub(crate) const BOOST: f64 = 0.05;
pub(crate) const CONFIDENCE_CAP: f64 = 0.95;

pub(crate) fn resolve_value(field: FieldPath, extracted: Extracted, context: &Context) -> Option<FieldValue> {
    match (field, extracted) {
        (_, Extracted::Absolute(value)) => Some(value),
        (FieldPath::GuestCount, Extracted::Delta(delta)) => {
            let total = context.current_guest_count.checked_add(delta);
            if total.is_none() {
                warn!(current = context.current_guest_count, delta, "guest count delta overflows, dropping");
            }
            total.map(FieldValue::Number)
        }
        (field, Extracted::Delta(delta)) => {
            warn!(%field, delta, "relative change on a non-numeric field, dropping");
            None
        }
    }
}

pub(crate) fn score(base: f64, boosted: bool) -> f64 {
    let raw = if boosted { base + BOOST } else { base };
    let rounded = (raw * 1e6).round() / 1e6;
    rounded.clamp(0.0, CONFIDENCE_CAP)
}
