//! The extraction walk.
//!
//! `Scanner` applies a [`Registry`] to a set of discussions:
//!
//! ```text
//! for discussion (given order)
//!   ignored = fields permanently ignored for this discussion
//!   for message (given order)
//!     staff message?            -> skip
//!     TriggerInfo::scan(body)   -> buckets + boost flag
//!     for rule (registry order, bucket-gated)
//!       rule.field in ignored?  -> skip
//!       for match in pattern.captures_iter(body)   (left to right)
//!         extractor -> Extracted -> resolve_value -> FieldValue
//!         score(rule.confidence, boosted)
//!         emit Candidate
//! ```
//!
//! Ignore scope is the whole discussion: a field ignored for `disc-001` is
//! suppressed for every message in it, including messages added later, and
//! stays live for every other discussion.
//!
//! Suggestion ids are built from the discussion id, message id, rule index
//! and match offset. That is unique within a run (one match per rule per
//! start offset) and stable across runs over the same data, so a caller's
//! accepted-id list keeps pointing at the same suggestions. Caller ids are
//! length-prefixed because they may contain the `-` separator themselves.

use super::dedup::rank_by;
use super::metrics::{RunMetrics, RunResult};
use super::registry::{Registry, RuleId};
use super::resolve::{resolve_value, score};
use super::trigger::TriggerInfo;
use crate::{Candidate, Context, Discussion, FieldPath, FieldRule, IgnoredSuggestion, Message, Suggestion};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};

/// `sug-<len>:<discussion>-<len>:<message>-r<rule>-<offset>`.
fn suggestion_id(discussion_id: &str, message_id: &str, rule_id: RuleId, offset: usize) -> String {
    format!(
        "sug-{}:{}-{}:{}-r{}-{}",
        discussion_id.len(),
        discussion_id,
        message_id.len(),
        message_id,
        rule_id,
        offset
    )
}

#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    registry: &'a Registry,
    ignored: &'a [IgnoredSuggestion],
    context: &'a Context,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(registry: &'a Registry, ignored: &'a [IgnoredSuggestion], context: &'a Context) -> Self {
        Scanner { registry, ignored, context }
    }

    fn ignored_fields(&self, discussion_id: &str) -> HashSet<FieldPath> {
        self.ignored.iter().filter(|ig| ig.discussion_id == discussion_id).map(|ig| ig.field).collect()
    }

    /// Produce candidates in generation order (discussion, message, rule, match).
    pub(crate) fn extract(&self, discussions: &[Discussion], metrics: &mut RunMetrics) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for discussion in discussions {
            let ignored = self.ignored_fields(&discussion.id);
            if !ignored.is_empty() {
                debug!(discussion = %discussion.id, ?ignored, "fields ignored for discussion");
            }

            for message in &discussion.messages {
                if !message.is_guest {
                    metrics.staff_messages_skipped += 1;
                    continue;
                }
                metrics.messages_scanned += 1;
                self.scan_message(discussion, message, &ignored, metrics, &mut candidates);
            }
        }

        candidates
    }

    fn scan_message(
        &self,
        discussion: &Discussion,
        message: &Message,
        ignored: &HashSet<FieldPath>,
        metrics: &mut RunMetrics,
        out: &mut Vec<Candidate>,
    ) {
        let trigger = TriggerInfo::scan(&message.body);
        trace!(message = %message.id, buckets = ?trigger.buckets, boosted = trigger.boosted, "trigger scan");

        let mut active = 0;
        for (rule_id, rule) in self.registry.active(&trigger) {
            active += 1;
            if ignored.contains(&rule.field) {
                metrics.rules_ignored += 1;
                debug!(rule = rule.name, message = %message.id, "rule suppressed by ignore");
                continue;
            }
            metrics.rules_evaluated += 1;
            self.apply_rule(rule_id, rule, discussion, message, trigger.boosted, metrics, out);
        }
        metrics.rules_gated += self.registry.len() - active;
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_rule(
        &self,
        rule_id: RuleId,
        rule: &FieldRule,
        discussion: &Discussion,
        message: &Message,
        boosted: bool,
        metrics: &mut RunMetrics,
        out: &mut Vec<Candidate>,
    ) {
        for caps in rule.pattern.captures_iter(&message.body) {
            let Some(m) = caps.get(0) else { continue };
            metrics.matches += 1;

            let value = (rule.extractor)(&caps).and_then(|extracted| {
                trace!(rule = rule.name, text = m.as_str(), ?extracted, "extracted");
                resolve_value(rule.field, extracted, self.context)
            });
            let Some(value) = value else {
                metrics.dropped += 1;
                debug!(rule = rule.name, text = m.as_str(), "match produced no value");
                continue;
            };

            let confidence = score(rule.confidence, boosted);
            debug!(rule = rule.name, message = %message.id, %value, confidence, "suggestion");

            out.push(Candidate {
                suggestion: Suggestion {
                    id: suggestion_id(&discussion.id, &message.id, rule_id, m.start()),
                    field: rule.field,
                    value,
                    confidence,
                    message_id: message.id.clone(),
                    original_text: m.as_str().to_string(),
                },
                rule: rule.name,
                discussion_id: discussion.id.clone(),
            });
        }
    }

    /// Extract and rank, returning timing details.
    pub(crate) fn run_with_metrics(self, discussions: &[Discussion]) -> RunResult {
        let mut metrics = RunMetrics::default();
        let total_start = Instant::now();

        let candidates = self.extract(discussions, &mut metrics);
        metrics.extraction = total_start.elapsed();

        let ranking_start = Instant::now();
        let ranked = rank_by(candidates.clone(), |c| &c.suggestion);
        metrics.ranking = ranking_start.elapsed();
        metrics.total = total_start.elapsed();

        RunResult { candidates, ranked, metrics }
    }

    /// Extract and rank.
    pub(crate) fn run(self, discussions: &[Discussion]) -> Vec<Suggestion> {
        let mut metrics = RunMetrics::default();
        let candidates = self.extract(discussions, &mut metrics);
        rank_by(candidates, |c| &c.suggestion).into_iter().map(|c| c.suggestion).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::suggestion_id;

    #[test]
    fn ids_keep_hyphenated_components_apart() {
        assert_eq!(suggestion_id("disc-001", "msg-003", 5, 12), "sug-8:disc-001-7:msg-003-r5-12");
        assert_ne!(suggestion_id("d-1", "m", 5, 0), suggestion_id("d", "1-m", 5, 0));
        assert_ne!(suggestion_id("d", "1:m", 5, 0), suggestion_id("d-1:", "m", 5, 0));
    }
}
