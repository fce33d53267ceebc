//! Error types.
//!
//! Extraction itself never fails: a body that matches nothing simply yields no
//! suggestions. Errors come from the edges of the engine: addressing the event
//! record by dotted path, building a registry from rule data, and decoding
//! input documents.

use crate::{FieldPath, FieldValue};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReconcileError>;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The dotted path does not name a leaf of the event record.
    #[error("invalid field path `{0}`")]
    InvalidFieldPath(String),

    /// The value has the wrong shape for the addressed field.
    #[error("cannot write {value} to `{field}`")]
    InvalidFieldValue { field: FieldPath, value: FieldValue },

    #[error("rule \"{rule}\" has base confidence {confidence}, expected a value in (0, 1]")]
    InvalidConfidence { rule: &'static str, confidence: f64 },

    #[error("rule \"{0}\" is registered more than once")]
    DuplicateRule(&'static str),

    #[error("unknown discussion `{0}`")]
    UnknownDiscussion(String),

    #[error("failed to decode input: {0}")]
    Decode(#[from] serde_json::Error),
}
