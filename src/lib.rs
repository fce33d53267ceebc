extern crate self as reconcile;

use regex::{Captures, Regex};

#[macro_use]
mod macros;
mod api;
pub mod demo;
mod engine;
mod error;
mod field_path;
mod model;
mod rules;
mod store;

pub use api::{
    Candidate, Context, ExtractionDetails, ExtractionResult, extract, extract_and_rank, extract_and_rank_with,
    extract_verbose_with, rank,
};
pub use engine::{BucketMask, Registry, RunMetrics};
pub use error::{ReconcileError, Result};
pub use field_path::{FieldPath, apply_field_path, resolve_field_path};
pub use model::{Contact, Discussion, EventRecord, FieldValue, IgnoredSuggestion, Message, Suggestion, Timeline};
pub use store::{AcceptOutcome, DiscussionsView, ReconciliationStore};

// --- Rule types -------------------------------------------------------------

/// What an extractor pulled out of one match.
///
/// Most rules read an absolute value straight from the text. Relative phrasing
/// ("4 more guests") yields a `Delta` that the engine resolves against the
/// caller's current record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Absolute(FieldValue),
    Delta(i64),
}

/// Turns one regex match into a raw value. Returning `None` drops the match.
pub type Extractor = fn(&Captures<'_>) -> Option<Extracted>;

/// A declarative extraction rule: when `pattern` matches a guest message,
/// `extractor` produces a value for `field` scored at `confidence`.
///
/// Rules are plain data; the engine iterates them uniformly in registry order.
/// Use [`Registry::new`] to validate a rule set before running it.
pub struct FieldRule {
    pub name: &'static str,
    pub field: FieldPath,
    /// Matched globally (every non-overlapping hit, left to right). The
    /// `Regex` is a static reference created via the `regex!` macro.
    pub pattern: &'static Regex,
    pub extractor: Extractor,
    /// Base confidence in `(0, 1]`.
    pub confidence: f64,
    /// Coarse input features that must all be present for the rule to run.
    pub buckets: BucketMask,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("pattern", &self.pattern.as_str())
            .field("extractor", &"<function>")
            .field("confidence", &self.confidence)
            .field("buckets", &self.buckets)
            .finish()
    }
}
