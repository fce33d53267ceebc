//! Reconciliation State Store.
//!
//! The engine is stateless; this store is the session layer that owns the
//! mutable state and feeds snapshots of it to the engine:
//!
//! ```text
//!            ┌──────────── ReconciliationStore ────────────┐
//!            │ record      accepted ids      ignored rules │
//!            └────┬─────────────┬────────────────┬─────────┘
//!  guest count ───┘             │ filter         │ ignore list
//!                               ▼                ▼
//!  discussions ──▶ extract_and_rank(discussions, ignored, count) ──▶ pending
//! ```
//!
//! Mutations go through `accept` (write a value into the record) and `ignore`
//! (hide one suggestion, or permanently silence a field for a discussion).

use crate::demo::Fixture;
use crate::error::{ReconcileError, Result};
use crate::{
    Discussion, EventRecord, FieldPath, FieldValue, IgnoredSuggestion, Suggestion, apply_field_path,
    extract_and_rank,
};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Result of accepting a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOutcome {
    /// The record after the write.
    pub event: EventRecord,
    pub previous: FieldValue,
    pub value: FieldValue,
    /// The accepted field is part of the signed contract.
    pub contract_update_required: bool,
}

/// What the surrounding UI renders: the record, the threads, and the
/// suggestions still awaiting a decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionsView {
    pub event: EventRecord,
    pub discussions: Vec<Discussion>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone)]
pub struct ReconciliationStore {
    record: EventRecord,
    pristine: EventRecord,
    discussions: Vec<Discussion>,
    accepted: BTreeSet<String>,
    ignored: Vec<IgnoredSuggestion>,
}

impl ReconciliationStore {
    pub fn new(record: EventRecord, discussions: Vec<Discussion>) -> Self {
        ReconciliationStore {
            pristine: record.clone(),
            record,
            discussions,
            accepted: BTreeSet::new(),
            ignored: Vec::new(),
        }
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        Self::new(fixture.event, fixture.discussions)
    }

    /// A store loaded with the embedded demo data.
    pub fn demo() -> Result<Self> {
        Ok(Self::from_fixture(crate::demo::fixture()?))
    }

    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    pub fn discussions(&self) -> &[Discussion] {
        &self.discussions
    }

    pub fn ignored(&self) -> &[IgnoredSuggestion] {
        &self.ignored
    }

    pub fn is_accepted(&self, suggestion_id: &str) -> bool {
        self.accepted.contains(suggestion_id)
    }

    pub fn current_guest_count(&self) -> i64 {
        self.record.guest_count
    }

    /// Guest count that relative phrasing ("4 more RSVPs") is resolved
    /// against. Accepting a new count does not move it, so a delta already
    /// folded into an accepted value is not added a second time.
    pub fn baseline_guest_count(&self) -> i64 {
        self.pristine.guest_count
    }

    /// Ranked suggestions minus the ones already accepted or dismissed.
    pub fn pending_suggestions(&self) -> Vec<Suggestion> {
        extract_and_rank(&self.discussions, &self.ignored, self.baseline_guest_count())
            .into_iter()
            .filter(|s| !self.accepted.contains(&s.id))
            .collect()
    }

    pub fn view(&self) -> DiscussionsView {
        DiscussionsView {
            event: self.record.clone(),
            discussions: self.discussions.clone(),
            suggestions: self.pending_suggestions(),
        }
    }

    /// Discussion that contains the message `message_id`.
    pub fn discussion_for_message(&self, message_id: &str) -> Option<&str> {
        self.discussions
            .iter()
            .find(|d| d.messages.iter().any(|m| m.id == message_id))
            .map(|d| d.id.as_str())
    }

    /// Write `value` at `field` and mark `suggestion_id` as handled.
    ///
    /// On an invalid path or value nothing changes: the record is written
    /// before the id is recorded.
    pub fn accept(&mut self, suggestion_id: &str, field: &str, value: FieldValue) -> Result<AcceptOutcome> {
        let path: FieldPath = field.parse()?;
        let previous = apply_field_path(&mut self.record, field, value.clone())?;
        self.accepted.insert(suggestion_id.to_string());

        info!(suggestion = suggestion_id, %path, %previous, %value, "accepted suggestion");
        Ok(AcceptOutcome {
            event: self.record.clone(),
            previous,
            value,
            contract_update_required: path.requires_contract_update(),
        })
    }

    pub fn accept_suggestion(&mut self, suggestion: &Suggestion) -> Result<AcceptOutcome> {
        self.accept(&suggestion.id, suggestion.field.as_str(), suggestion.value.clone())
    }

    /// Dismiss a suggestion.
    ///
    /// A plain ignore hides `suggestion_id` without touching the record. A
    /// permanent ignore stops every rule for `field` from firing on
    /// `discussion_id` from now on.
    pub fn ignore(&mut self, suggestion_id: &str, field: FieldPath, discussion_id: &str, permanent: bool) -> Result<()> {
        if !permanent {
            debug!(suggestion = suggestion_id, "dismissed suggestion");
            self.accepted.insert(suggestion_id.to_string());
            return Ok(());
        }

        if !self.discussions.iter().any(|d| d.id == discussion_id) {
            return Err(ReconcileError::UnknownDiscussion(discussion_id.to_string()));
        }
        let rule = IgnoredSuggestion {
            field,
            event_id: self.record.id.clone(),
            discussion_id: discussion_id.to_string(),
        };
        if !self.ignored.contains(&rule) {
            info!(%field, discussion = discussion_id, "permanently ignoring field");
            self.ignored.push(rule);
        }
        Ok(())
    }

    /// Like [`ignore`](Self::ignore), resolving the discussion from the
    /// suggestion's source message.
    pub fn ignore_suggestion(&mut self, suggestion: &Suggestion, permanent: bool) -> Result<()> {
        let discussion_id = self
            .discussion_for_message(&suggestion.message_id)
            .ok_or_else(|| ReconcileError::UnknownDiscussion(format!("<message {}>", suggestion.message_id)))?
            .to_string();
        self.ignore(&suggestion.id, suggestion.field, &discussion_id, permanent)
    }

    /// Restore the original record and forget every decision.
    pub fn reset(&mut self) {
        self.record = self.pristine.clone();
        self.accepted.clear();
        self.ignored.clear();
        info!("store reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest_message(id: &str, body: &str) -> crate::Message {
        crate::Message {
            id: id.to_string(),
            author: "Sarah Johnson".to_string(),
            timestamp: chrono::Utc::now(),
            body: body.to_string(),
            is_guest: true,
        }
    }

    fn pending_for(store: &ReconciliationStore, field: FieldPath) -> Vec<Suggestion> {
        store.pending_suggestions().into_iter().filter(|s| s.field == field).collect()
    }

    #[test]
    fn demo_suggestions() {
        let store = ReconciliationStore::demo().unwrap();
        let pending = store.pending_suggestions();

        let summary: Vec<(FieldPath, FieldValue, f64)> =
            pending.iter().map(|s| (s.field, s.value.clone(), s.confidence)).collect();
        assert_eq!(
            summary,
            vec![
                (FieldPath::GuestCount, FieldValue::Number(66), 0.95),
                (FieldPath::TimelineStart, "7:30 PM".into(), 0.95),
                (FieldPath::LinenColor, "red".into(), 0.95),
                (FieldPath::LinenColor, "blue".into(), 0.95),
                (FieldPath::MenuPackage, "vegetarian".into(), 0.9),
                (FieldPath::MenuPackage, "Buffet A".into(), 0.9),
                (FieldPath::MenuPackage, "Buffet B".into(), 0.9),
                (FieldPath::MenuPackage, "vegetarian option".into(), 0.9),
                (FieldPath::GuestCount, FieldValue::Number(70), 0.85),
            ]
        );

        let red = &pending[2];
        assert_eq!(red.message_id, "msg-003");
        assert_eq!(red.original_text, "switch to red linens");

        let staff = ["msg-001", "msg-004", "msg-006", "msg-007", "msg-009"];
        assert!(pending.iter().all(|s| !staff.contains(&s.message_id.as_str())));
    }

    #[test]
    fn accept_updates_record_and_hides_suggestion() {
        let mut store = ReconciliationStore::demo().unwrap();
        let start = pending_for(&store, FieldPath::TimelineStart).remove(0);

        let outcome = store.accept_suggestion(&start).unwrap();
        assert_eq!(outcome.previous, FieldValue::from("6:00 PM"));
        assert_eq!(outcome.value, FieldValue::from("7:30 PM"));
        assert!(!outcome.contract_update_required);
        assert_eq!(store.record().timeline.start, "7:30 PM");
        assert!(store.is_accepted(&start.id));
        assert!(pending_for(&store, FieldPath::TimelineStart).is_empty());
    }

    #[test]
    fn accepting_guest_count_flags_contract() {
        let mut store = ReconciliationStore::demo().unwrap();
        let guests = pending_for(&store, FieldPath::GuestCount).remove(0);
        assert_eq!(guests.value, FieldValue::Number(66));

        let outcome = store.accept_suggestion(&guests).unwrap();
        assert!(outcome.contract_update_required);
        assert_eq!(outcome.previous, FieldValue::Number(62));
        assert_eq!(store.current_guest_count(), 66);
        assert_eq!(store.baseline_guest_count(), 62);

        // "4 more RSVPs" in msg-002 is already part of the accepted 66.
        let guests = pending_for(&store, FieldPath::GuestCount);
        assert!(guests.iter().all(|s| s.message_id != "msg-002"));
        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].value, FieldValue::Number(70));
        assert_eq!(guests[0].message_id, "msg-010");
        assert_eq!(guests[0].confidence, 0.85);
    }

    #[test]
    fn accepting_one_hyphenated_suggestion_keeps_the_other() {
        let record = crate::demo::fixture().unwrap().event;
        let mut store = ReconciliationStore::new(
            record,
            vec![
                Discussion {
                    id: "d-1".to_string(),
                    event_id: "evt-001".to_string(),
                    title: "a".to_string(),
                    messages: vec![guest_message("m", "red linens")],
                },
                Discussion {
                    id: "d".to_string(),
                    event_id: "evt-001".to_string(),
                    title: "b".to_string(),
                    messages: vec![guest_message("1-m", "blue linens")],
                },
            ],
        );

        let red = pending_for(&store, FieldPath::LinenColor).remove(0);
        assert_eq!(red.value, FieldValue::from("red"));
        store.accept_suggestion(&red).unwrap();

        let linens = pending_for(&store, FieldPath::LinenColor);
        assert_eq!(linens.len(), 1);
        assert_eq!(linens[0].value, FieldValue::from("blue"));
    }

    #[test]
    fn invalid_accept_changes_nothing() {
        let mut store = ReconciliationStore::demo().unwrap();
        let before = store.record().clone();

        assert!(matches!(
            store.accept("sug-x", "timeline.begin", "7:00 PM".into()),
            Err(ReconcileError::InvalidFieldPath(_))
        ));
        assert!(matches!(
            store.accept("sug-y", "guestCount", "lots".into()),
            Err(ReconcileError::InvalidFieldValue { .. })
        ));
        assert_eq!(store.record(), &before);
        assert!(!store.is_accepted("sug-x"));
        assert!(!store.is_accepted("sug-y"));
    }

    #[test]
    fn plain_ignore_hides_one_suggestion() {
        let mut store = ReconciliationStore::demo().unwrap();
        let before = store.pending_suggestions().len();
        let blue = pending_for(&store, FieldPath::LinenColor).into_iter().find(|s| s.value == FieldValue::from("blue")).unwrap();

        store.ignore_suggestion(&blue, false).unwrap();
        let linens = pending_for(&store, FieldPath::LinenColor);
        assert_eq!(linens.len(), 1);
        assert_eq!(linens[0].value, FieldValue::from("red"));
        assert_eq!(store.pending_suggestions().len(), before - 1);
        assert!(store.ignored().is_empty());
        assert_eq!(store.record().linen_color, "white");
    }

    #[test]
    fn permanent_ignore_silences_field_for_discussion() {
        let mut store = ReconciliationStore::demo().unwrap();
        let menu = pending_for(&store, FieldPath::MenuPackage).remove(0);

        store.ignore_suggestion(&menu, true).unwrap();
        store.ignore_suggestion(&menu, true).unwrap();
        assert_eq!(store.ignored().len(), 1);
        assert_eq!(store.ignored()[0].discussion_id, "disc-001");
        assert_eq!(store.ignored()[0].event_id, "evt-001");
        assert!(pending_for(&store, FieldPath::MenuPackage).is_empty());
    }

    #[test]
    fn permanent_ignore_leaves_other_discussions_alone() {
        let mut store = ReconciliationStore::demo().unwrap();
        store.ignore("sug-any", FieldPath::LinenColor, "disc-001", true).unwrap();

        let linens = pending_for(&store, FieldPath::LinenColor);
        assert_eq!(linens.len(), 2);
        assert!(linens.iter().all(|s| s.message_id == "msg-011"));
    }

    #[test]
    fn permanent_ignore_requires_known_discussion() {
        let mut store = ReconciliationStore::demo().unwrap();
        assert!(matches!(
            store.ignore("sug-1", FieldPath::LinenColor, "disc-404", true),
            Err(ReconcileError::UnknownDiscussion(d)) if d == "disc-404"
        ));
    }

    #[test]
    fn reset_restores_everything() {
        let mut store = ReconciliationStore::demo().unwrap();
        let initial = store.view();

        let first = store.pending_suggestions().remove(0);
        store.accept_suggestion(&first).unwrap();
        store.ignore("sug-any", FieldPath::MenuPackage, "disc-001", true).unwrap();
        assert_ne!(store.view(), initial);

        store.reset();
        assert_eq!(store.view(), initial);
    }

    #[test]
    fn view_serializes_for_the_ui() {
        let store = ReconciliationStore::demo().unwrap();
        let json = serde_json::to_value(store.view()).unwrap();

        assert_eq!(json["event"]["guestCount"], 62);
        assert_eq!(json["discussions"][0]["messages"][1]["isGuest"], true);
        assert_eq!(json["suggestions"][0]["field"], "guestCount");
        assert_eq!(json["suggestions"][0]["value"], 66);
    }
}
