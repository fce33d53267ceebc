//! Engine run metrics.
//!
//! Counters and timings collected by `Scanner::run_with_metrics`. They are
//! cheap (plain integers and two `Instant` reads per stage) so the scanner
//! always collects them; `Scanner::run` simply discards them.

use crate::Candidate;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunMetrics {
    /// Total elapsed time (extraction + ranking).
    pub total: Duration,
    /// Time spent walking discussions and running rules.
    pub extraction: Duration,
    /// Time spent deduplicating and sorting.
    pub ranking: Duration,
    /// Guest messages scanned.
    pub messages_scanned: usize,
    /// Staff messages skipped without scanning.
    pub staff_messages_skipped: usize,
    /// Rule evaluations (one per rule per scanned message that got past gating).
    pub rules_evaluated: usize,
    /// Rules skipped because the message lacked a required bucket.
    pub rules_gated: usize,
    /// Rules skipped because their field is ignored for the discussion.
    pub rules_ignored: usize,
    /// Regex matches across all evaluated rules.
    pub matches: usize,
    /// Matches whose extractor or resolution produced no value.
    pub dropped: usize,
}

/// Scanner output bundled with metrics.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Every candidate in generation order, before dedup.
    pub candidates: Vec<Candidate>,
    /// Deduplicated candidates, confidence descending.
    pub ranked: Vec<Candidate>,
    pub metrics: RunMetrics,
}
