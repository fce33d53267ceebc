use crate::engine::{self, Registry, RunMetrics};
use crate::error::{ReconcileError, Result};
use crate::{Discussion, EventRecord, FieldPath, FieldValue, IgnoredSuggestion, Suggestion, resolve_field_path};

/// Extraction context.
///
/// Holds the caller state needed to resolve relative expressions (like
/// "4 more guests"). It is a snapshot: the engine reads it, never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Guest count the relative deltas are added to.
    pub current_guest_count: i64,
}

impl Context {
    pub fn new(current_guest_count: i64) -> Self {
        Context { current_guest_count }
    }

    /// Snapshot the guest count of `record`.
    pub fn from_record(record: &EventRecord) -> Result<Self> {
        match resolve_field_path(record, FieldPath::GuestCount.as_str())? {
            FieldValue::Number(n) => Ok(Context::new(n)),
            value => Err(ReconcileError::InvalidFieldValue { field: FieldPath::GuestCount, value }),
        }
    }
}

/// A suggestion together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub suggestion: Suggestion,
    /// Name of the rule that produced it.
    pub rule: &'static str,
    pub discussion_id: String,
}

/// Additional details returned by [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionDetails {
    /// Every candidate in generation order, before dedup.
    pub candidates: Vec<Candidate>,
    /// Ranked candidates (same order as [`ExtractionResult::suggestions`]).
    pub ranked: Vec<Candidate>,
    pub metrics: RunMetrics,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub suggestions: Vec<Suggestion>,
    pub details: ExtractionDetails,
}

/// Run the built-in rules over `discussions` and return ranked, deduplicated
/// suggestions.
///
/// This is the one entry point surrounding code should call.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use reconcile::{Discussion, Message, extract_and_rank};
///
/// let discussion = Discussion {
///     id: "disc-001".into(),
///     event_id: "evt-001".into(),
///     title: "Final details".into(),
///     messages: vec![Message {
///         id: "msg-003".into(),
///         author: "Sarah Johnson".into(),
///         timestamp: Utc::now(),
///         body: "could we switch to red linens instead".into(),
///         is_guest: true,
///     }],
/// };
///
/// let out = extract_and_rank(&[discussion], &[], 62);
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].field.as_str(), "linenColor");
/// assert_eq!(out[0].confidence, 0.95);
/// ```
pub fn extract_and_rank(
    discussions: &[Discussion],
    ignored: &[IgnoredSuggestion],
    current_guest_count: i64,
) -> Vec<Suggestion> {
    extract_and_rank_with(Registry::builtin(), discussions, ignored, &Context::new(current_guest_count))
}

/// Like [`extract_and_rank`], with a caller-supplied registry and context.
pub fn extract_and_rank_with(
    registry: &Registry,
    discussions: &[Discussion],
    ignored: &[IgnoredSuggestion],
    context: &Context,
) -> Vec<Suggestion> {
    engine::Scanner::new(registry, ignored, context).run(discussions)
}

/// Raw extraction with the built-in rules: one suggestion per match, in
/// generation order, not deduplicated.
pub fn extract(discussions: &[Discussion], ignored: &[IgnoredSuggestion], context: &Context) -> Vec<Suggestion> {
    let mut metrics = RunMetrics::default();
    engine::Scanner::new(Registry::builtin(), ignored, context)
        .extract(discussions, &mut metrics)
        .into_iter()
        .map(|c| c.suggestion)
        .collect()
}

/// Collapse `(field, value)` duplicates to their highest-confidence member
/// and sort by confidence, descending. Ties keep input order.
pub fn rank(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    engine::rank_by(suggestions, |s| s)
}

/// Extract and rank, and return the raw candidates and run metrics too.
///
/// Useful for rule debugging. The default [`extract_and_rank_with`] path does
/// not keep the pre-dedup candidates around.
pub fn extract_verbose_with(
    registry: &Registry,
    discussions: &[Discussion],
    ignored: &[IgnoredSuggestion],
    context: &Context,
) -> ExtractionResult {
    let run = engine::Scanner::new(registry, ignored, context).run_with_metrics(discussions);
    let suggestions = run.ranked.iter().map(|c| c.suggestion.clone()).collect();

    ExtractionResult {
        suggestions,
        details: ExtractionDetails { candidates: run.candidates, ranked: run.ranked, metrics: run.metrics },
    }
}
