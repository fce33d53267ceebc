//! Data model shared by the engine and the state store.
//!
//! All types serialize with camelCase keys so they can be exchanged with the
//! surrounding application unchanged.

use crate::FieldPath;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single message in a discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub body: String,
    /// Only guest-authored messages are scanned for suggestions.
    pub is_guest: bool,
}

/// An email-like thread about one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// The canonical event record. Fields are addressed by [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub guest_count: i64,
    pub timeline: Timeline,
    pub menu_package: String,
    pub linen_color: String,
    pub venue: String,
    pub contact: Contact,
}

/// A value read from or written to the event record.
///
/// Serialized untagged, so it crosses the boundary as a plain JSON string or
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// A proposed change to one field, derived from one text match.
///
/// Never mutated after creation. Identity is `id`; deduplication is keyed on
/// `(field, value)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub field: FieldPath,
    pub value: FieldValue,
    /// Heuristic score in `[0, 0.95]`.
    pub confidence: f64,
    pub message_id: String,
    /// The literal substring the rule matched.
    pub original_text: String,
}

/// A standing suppression of one field's suggestions for one discussion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredSuggestion {
    pub field: FieldPath,
    pub event_id: String,
    pub discussion_id: String,
}
