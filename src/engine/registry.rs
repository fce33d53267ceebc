//! The Field Pattern Registry.
//!
//! A `Registry` is the validated, ordered sequence of [`FieldRule`]s the
//! scanner iterates. Order matters: it is part of the generation order that
//! breaks confidence ties during ranking.
//!
//! Validation happens once, here, so that a bad rule (for example a base
//! confidence of `-0.2`) fails when the registry is built rather than
//! silently skewing scores at extraction time.
//!
//! ## Buckets
//!
//! Each rule declares the coarse input features (`BucketMask`) its pattern
//! cannot match without. `TriggerInfo::scan` computes the features present in
//! a message body and the registry hands the scanner only the rules whose
//! buckets are all present.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `Registry::rules` and is stable for the
//!   lifetime of the registry; suggestion ids embed it.
//! - Rule names are unique.

use super::trigger::TriggerInfo;
use crate::FieldRule;
use crate::error::{ReconcileError, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast message classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u8 {
        const HAS_DIGITS = 1 << 0;
        const MENUISH    = 1 << 1;
        const COLORISH   = 1 << 2;
        const LINENISH   = 1 << 3;
    }
}

static BUILTIN: Lazy<Registry> =
    Lazy::new(|| Registry::new(crate::rules::get()).expect("built-in extraction rules are valid"));

#[derive(Debug)]
pub struct Registry {
    rules: Vec<FieldRule>,
}

impl Registry {
    /// Validate `rules` and freeze them into a registry.
    ///
    /// Fails on a base confidence outside `(0, 1]` (or not finite) and on a
    /// rule name registered twice.
    pub fn new(rules: Vec<FieldRule>) -> Result<Self> {
        let mut names = HashSet::new();
        for rule in &rules {
            let c = rule.confidence;
            if !c.is_finite() || c <= 0.0 || c > 1.0 {
                return Err(ReconcileError::InvalidConfidence { rule: rule.name, confidence: c });
            }
            if !names.insert(rule.name) {
                return Err(ReconcileError::DuplicateRule(rule.name));
            }
        }
        Ok(Registry { rules })
    }

    /// The built-in rule set (guest count, start time, menu package, linens).
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose bucket requirements are met by `trigger`, in registry order.
    pub(crate) fn active<'a>(&'a self, trigger: &'a TriggerInfo) -> impl Iterator<Item = (RuleId, &'a FieldRule)> {
        self.rules.iter().enumerate().filter(move |(_, rule)| trigger.buckets.contains(rule.buckets))
    }
}
