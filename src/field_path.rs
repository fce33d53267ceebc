//! Dotted-path addressing into the [`EventRecord`].
//!
//! Paths form a closed set: every leaf of the record has exactly one
//! [`FieldPath`] variant, so a suggestion can only ever name a field that
//! exists. String paths coming from outside are parsed with [`FromStr`] and
//! rejected with [`ReconcileError::InvalidFieldPath`] when they do not name a
//! leaf.
//!
//! ```text
//! "timeline.start" ──parse──▶ FieldPath::TimelineStart ──get/set──▶ record.timeline.start
//! "timeline"       ──parse──▶ InvalidFieldPath (not a leaf)
//! ```

use crate::error::{ReconcileError, Result};
use crate::{EventRecord, FieldValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldPath {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "guestCount")]
    GuestCount,
    #[serde(rename = "timeline.start")]
    TimelineStart,
    #[serde(rename = "timeline.end")]
    TimelineEnd,
    #[serde(rename = "menuPackage")]
    MenuPackage,
    #[serde(rename = "linenColor")]
    LinenColor,
    #[serde(rename = "venue")]
    Venue,
    #[serde(rename = "contact.name")]
    ContactName,
    #[serde(rename = "contact.email")]
    ContactEmail,
}

impl FieldPath {
    pub const ALL: [FieldPath; 11] = [
        FieldPath::Id,
        FieldPath::Name,
        FieldPath::Date,
        FieldPath::GuestCount,
        FieldPath::TimelineStart,
        FieldPath::TimelineEnd,
        FieldPath::MenuPackage,
        FieldPath::LinenColor,
        FieldPath::Venue,
        FieldPath::ContactName,
        FieldPath::ContactEmail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldPath::Id => "id",
            FieldPath::Name => "name",
            FieldPath::Date => "date",
            FieldPath::GuestCount => "guestCount",
            FieldPath::TimelineStart => "timeline.start",
            FieldPath::TimelineEnd => "timeline.end",
            FieldPath::MenuPackage => "menuPackage",
            FieldPath::LinenColor => "linenColor",
            FieldPath::Venue => "venue",
            FieldPath::ContactName => "contact.name",
            FieldPath::ContactEmail => "contact.email",
        }
    }

    /// Accepting a change to this field means the signed contract has to be
    /// revised.
    pub fn requires_contract_update(self) -> bool {
        matches!(self, FieldPath::GuestCount | FieldPath::MenuPackage)
    }

    /// Read the addressed field.
    pub fn get(self, record: &EventRecord) -> FieldValue {
        match self {
            FieldPath::GuestCount => FieldValue::Number(record.guest_count),
            FieldPath::Date => FieldValue::Text(record.date.format(DATE_FORMAT).to_string()),
            FieldPath::Id => FieldValue::Text(record.id.clone()),
            FieldPath::Name => FieldValue::Text(record.name.clone()),
            FieldPath::TimelineStart => FieldValue::Text(record.timeline.start.clone()),
            FieldPath::TimelineEnd => FieldValue::Text(record.timeline.end.clone()),
            FieldPath::MenuPackage => FieldValue::Text(record.menu_package.clone()),
            FieldPath::LinenColor => FieldValue::Text(record.linen_color.clone()),
            FieldPath::Venue => FieldValue::Text(record.venue.clone()),
            FieldPath::ContactName => FieldValue::Text(record.contact.name.clone()),
            FieldPath::ContactEmail => FieldValue::Text(record.contact.email.clone()),
        }
    }

    /// Write `value` into the addressed field and return the previous value.
    ///
    /// The record is left untouched when the value has the wrong shape.
    pub fn set(self, record: &mut EventRecord, value: FieldValue) -> Result<FieldValue> {
        let previous = self.get(record);
        match (self, value) {
            (FieldPath::GuestCount, FieldValue::Number(n)) => record.guest_count = n,
            (FieldPath::Date, FieldValue::Text(s)) => {
                record.date = NaiveDate::parse_from_str(&s, DATE_FORMAT)
                    .map_err(|_| ReconcileError::InvalidFieldValue { field: self, value: FieldValue::Text(s) })?;
            }
            (field, FieldValue::Text(s)) => match field.text_slot(record) {
                Some(slot) => *slot = s,
                None => return Err(ReconcileError::InvalidFieldValue { field, value: FieldValue::Text(s) }),
            },
            (field, value) => return Err(ReconcileError::InvalidFieldValue { field, value }),
        }
        Ok(previous)
    }

    /// The string backing a plain text leaf; `None` for typed leaves.
    fn text_slot(self, record: &mut EventRecord) -> Option<&mut String> {
        match self {
            FieldPath::Id => Some(&mut record.id),
            FieldPath::Name => Some(&mut record.name),
            FieldPath::TimelineStart => Some(&mut record.timeline.start),
            FieldPath::TimelineEnd => Some(&mut record.timeline.end),
            FieldPath::MenuPackage => Some(&mut record.menu_package),
            FieldPath::LinenColor => Some(&mut record.linen_color),
            FieldPath::Venue => Some(&mut record.venue),
            FieldPath::ContactName => Some(&mut record.contact.name),
            FieldPath::ContactEmail => Some(&mut record.contact.email),
            FieldPath::GuestCount | FieldPath::Date => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::ALL
            .iter()
            .copied()
            .find(|path| path.as_str() == s)
            .ok_or_else(|| ReconcileError::InvalidFieldPath(s.to_string()))
    }
}

/// Read the field addressed by `dotted_path`.
pub fn resolve_field_path(record: &EventRecord, dotted_path: &str) -> Result<FieldValue> {
    Ok(dotted_path.parse::<FieldPath>()?.get(record))
}

/// Write `value` at `dotted_path` and return the value it replaced.
pub fn apply_field_path(record: &mut EventRecord, dotted_path: &str, value: FieldValue) -> Result<FieldValue> {
    dotted_path.parse::<FieldPath>()?.set(record, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Contact, Timeline};

    fn record() -> EventRecord {
        EventRecord {
            id: "evt-001".to_string(),
            name: "Johnson Wedding Reception".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            guest_count: 62,
            timeline: Timeline { start: "6:00 PM".to_string(), end: "11:00 PM".to_string() },
            menu_package: "Buffet A".to_string(),
            linen_color: "white".to_string(),
            venue: "Grand Ballroom".to_string(),
            contact: Contact { name: "Sarah Johnson".to_string(), email: "sarah.johnson@email.com".to_string() },
        }
    }

    #[test]
    fn resolves_every_leaf() {
        let r = record();
        assert_eq!(resolve_field_path(&r, "guestCount").unwrap(), FieldValue::Number(62));
        assert_eq!(resolve_field_path(&r, "timeline.start").unwrap(), FieldValue::from("6:00 PM"));
        assert_eq!(resolve_field_path(&r, "timeline.end").unwrap(), FieldValue::from("11:00 PM"));
        assert_eq!(resolve_field_path(&r, "contact.email").unwrap(), FieldValue::from("sarah.johnson@email.com"));
        assert_eq!(resolve_field_path(&r, "date").unwrap(), FieldValue::from("2024-06-15"));

        for path in FieldPath::ALL {
            assert!(resolve_field_path(&r, path.as_str()).is_ok(), "{path} should resolve");
        }
    }

    #[test]
    fn apply_returns_previous_value() {
        let mut r = record();
        let prev = apply_field_path(&mut r, "timeline.start", "7:30 PM".into()).unwrap();
        assert_eq!(prev, FieldValue::from("6:00 PM"));
        assert_eq!(r.timeline.start, "7:30 PM");

        let prev = apply_field_path(&mut r, "guestCount", FieldValue::Number(66)).unwrap();
        assert_eq!(prev, FieldValue::Number(62));
        assert_eq!(r.guest_count, 66);

        apply_field_path(&mut r, "contact.name", "Sam Johnson".into()).unwrap();
        assert_eq!(r.contact.name, "Sam Johnson");
        assert_eq!(r.contact.email, "sarah.johnson@email.com");

        apply_field_path(&mut r, "date", "2024-07-01".into()).unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn malformed_paths_are_rejected() {
        let mut r = record();
        for bad in ["", "timeline", "timeline.", "timeline.start.hour", "guestcount", ".venue", "contact.phone"] {
            assert!(
                matches!(resolve_field_path(&r, bad), Err(ReconcileError::InvalidFieldPath(p)) if p == bad),
                "resolve should reject {bad:?}"
            );
            assert!(
                matches!(apply_field_path(&mut r, bad, "x".into()), Err(ReconcileError::InvalidFieldPath(_))),
                "apply should reject {bad:?}"
            );
        }
        assert_eq!(r, record());
    }

    #[test]
    fn wrong_value_shape_leaves_record_untouched() {
        let mut r = record();
        assert!(matches!(
            apply_field_path(&mut r, "guestCount", "sixty".into()),
            Err(ReconcileError::InvalidFieldValue { field: FieldPath::GuestCount, .. })
        ));
        assert!(matches!(
            apply_field_path(&mut r, "linenColor", FieldValue::Number(3)),
            Err(ReconcileError::InvalidFieldValue { field: FieldPath::LinenColor, .. })
        ));
        assert!(matches!(
            apply_field_path(&mut r, "date", "June 15".into()),
            Err(ReconcileError::InvalidFieldValue { field: FieldPath::Date, .. })
        ));
        assert_eq!(r, record());
    }

    #[test]
    fn contract_fields() {
        let flagged: Vec<FieldPath> = FieldPath::ALL.into_iter().filter(|p| p.requires_contract_update()).collect();
        assert_eq!(flagged, vec![FieldPath::GuestCount, FieldPath::MenuPackage]);
    }
}
