//! Deduplication and ranking.
//!
//! Several rules (and several messages) routinely propose the same change:
//! "4 more RSVPs" and "up to 66 guests" both mean `guestCount = 66`. The
//! ranking stage collapses those into one suggestion and orders the rest.
//!
//! ## What counts as "the same suggestion"
//!
//! Two suggestions are duplicates when their `DedupKey`s match: the field and
//! the resolved value, compared exactly. Different values for one field
//! ("Buffet A" and "Buffet B") are never collapsed.
//!
//! ## Which one survives
//!
//! ```text
//! generation order: [g66@0.85, g66@0.90, red@0.95, g66@0.90]
//!                      └────────┬─────────────────────┘
//! group (guestCount, 66): keeps g66@0.90 (first of the best), in slot 0
//! stable sort desc:   [red@0.95, g66@0.90]
//! ```
//!
//! A later member replaces the survivor only with a strictly higher confidence,
//! so ties keep the earliest one. The survivor sits in its group's first slot,
//! and the sort is stable, so equal confidences keep generation order.
//! Running the stage on its own output is a no-op.

use crate::{FieldPath, FieldValue, Suggestion};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct DedupKey {
    pub(crate) field: FieldPath,
    pub(crate) value: FieldValue,
}

impl DedupKey {
    pub(crate) fn from_suggestion(s: &Suggestion) -> Self {
        DedupKey { field: s.field, value: s.value.clone() }
    }
}

/// Collapse duplicates to their highest-confidence member and sort by
/// confidence, descending. `suggestion` projects each item to the suggestion
/// it carries.
pub(crate) fn rank_by<T>(items: Vec<T>, suggestion: impl Fn(&T) -> &Suggestion) -> Vec<T> {
    let mut slots: Vec<T> = Vec::with_capacity(items.len());
    let mut index: HashMap<DedupKey, usize> = HashMap::new();

    for item in items {
        match index.entry(DedupKey::from_suggestion(suggestion(&item))) {
            Entry::Occupied(slot) => {
                let i = *slot.get();
                if suggestion(&item).confidence > suggestion(&slots[i]).confidence {
                    slots[i] = item;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(slots.len());
                slots.push(item);
            }
        }
    }

    slots.sort_by(|a, b| suggestion(b).confidence.total_cmp(&suggestion(a).confidence));
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sug(id: &str, field: FieldPath, value: impl Into<FieldValue>, confidence: f64) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            field,
            value: value.into(),
            confidence,
            message_id: "msg".to_string(),
            original_text: String::new(),
        }
    }

    fn ids(v: &[Suggestion]) -> Vec<&str> {
        v.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn keeps_highest_confidence_per_key() {
        let input = vec![
            sug("a", FieldPath::GuestCount, FieldValue::Number(66), 0.85),
            sug("b", FieldPath::GuestCount, FieldValue::Number(66), 0.9),
            sug("c", FieldPath::LinenColor, "red", 0.95),
            sug("d", FieldPath::GuestCount, FieldValue::Number(66), 0.9),
        ];
        let out = rank_by(input, |s| s);
        assert_eq!(ids(&out), vec!["c", "b"]);
    }

    #[test]
    fn distinct_values_are_not_collapsed() {
        let input = vec![
            sug("a", FieldPath::MenuPackage, "Buffet A", 0.9),
            sug("b", FieldPath::MenuPackage, "Buffet B", 0.9),
        ];
        assert_eq!(ids(&rank_by(input, |s| s)), vec!["a", "b"]);
    }

    #[test]
    fn same_value_different_field_is_not_a_duplicate() {
        let input = vec![
            sug("a", FieldPath::TimelineStart, "7:30 PM", 0.9),
            sug("b", FieldPath::TimelineEnd, "7:30 PM", 0.9),
        ];
        assert_eq!(rank_by(input, |s| s).len(), 2);
    }

    #[test]
    fn number_and_text_values_differ() {
        let input = vec![
            sug("a", FieldPath::GuestCount, FieldValue::Number(66), 0.9),
            sug("b", FieldPath::GuestCount, "66", 0.9),
        ];
        assert_eq!(rank_by(input, |s| s).len(), 2);
    }

    #[test]
    fn ties_keep_generation_order() {
        let input = vec![
            sug("a", FieldPath::LinenColor, "blue", 0.85),
            sug("b", FieldPath::MenuPackage, "Buffet B", 0.9),
            sug("c", FieldPath::LinenColor, "red", 0.85),
            sug("d", FieldPath::TimelineStart, "7:30 PM", 0.9),
        ];
        assert_eq!(ids(&rank_by(input, |s| s)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn survivor_takes_first_slot_of_its_group() {
        let input = vec![
            sug("a", FieldPath::GuestCount, FieldValue::Number(66), 0.85),
            sug("b", FieldPath::LinenColor, "red", 0.9),
            sug("c", FieldPath::GuestCount, FieldValue::Number(66), 0.9),
        ];
        assert_eq!(ids(&rank_by(input, |s| s)), vec!["c", "b"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let input = vec![
            sug("a", FieldPath::GuestCount, FieldValue::Number(66), 0.85),
            sug("b", FieldPath::LinenColor, "red", 0.95),
            sug("c", FieldPath::GuestCount, FieldValue::Number(70), 0.85),
            sug("d", FieldPath::GuestCount, FieldValue::Number(66), 0.9),
            sug("e", FieldPath::LinenColor, "blue", 0.95),
        ];
        let once = rank_by(input, |s| s);
        let twice = rank_by(once.clone(), |s| s);
        assert_eq!(once, twice);

        assert!(once.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn empty_input() {
        assert!(rank_by(Vec::<Suggestion>::new(), |s| s).is_empty());
    }
}
