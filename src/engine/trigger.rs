//! Trigger scanning (message pre-classification).
//!
//! Before any rule runs on a guest message, the body is scanned once for:
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains digits" or
//!   "mentions a color". Rules declare the buckets their pattern needs, and
//!   the registry skips a rule when one is missing.
//! - **Boost tokens**: "actually", "change" and "switch" signal a deliberate
//!   change request and raise the confidence of every suggestion from the
//!   message.
//!
//! ## Design notes
//!
//! - The scan must never disable a rule whose pattern could match. Patterns are
//!   case-insensitive with Unicode simple case folding, so the scan lowercases
//!   with `to_lowercase()` and also folds `ſ` (long s) to `s`; digit detection
//!   uses `char::is_numeric`, a superset of `\d`.
//! - Boost tokens are plain substring checks on the lowercased body
//!   ("changes" and "switching" count).

use super::registry::BucketMask;

pub(crate) const BOOST_TOKENS: &[&str] = &["actually", "change", "switch"];

const MENU_WORDS: &[&str] = &["buffet", "vegetarian", "plated"];
pub(crate) const COLORS: &[&str] = &["red", "blue", "green", "white", "black", "purple", "gold", "silver"];
const LINEN_WORDS: &[&str] = &["linen", "napkin", "tablecloth"];

/// Characteristics detected from one message body.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
    pub boosted: bool,
}

impl TriggerInfo {
    pub fn scan(body: &str) -> Self {
        let lower = body.to_lowercase();
        let folded = lower.replace('\u{17f}', "s");
        let mut buckets = BucketMask::empty();

        if body.chars().any(char::is_numeric) {
            buckets |= BucketMask::HAS_DIGITS;
        }
        if MENU_WORDS.iter().any(|w| folded.contains(w)) {
            buckets |= BucketMask::MENUISH;
        }
        if COLORS.iter().any(|c| folded.contains(c)) {
            buckets |= BucketMask::COLORISH;
        }
        if LINEN_WORDS.iter().any(|w| folded.contains(w)) {
            buckets |= BucketMask::LINENISH;
        }

        let boosted = BOOST_TOKENS.iter().any(|t| lower.contains(t));

        TriggerInfo { buckets, boosted }
    }
}
