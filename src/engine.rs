//! Extraction and ranking engine.
//!
//! This module is the entry point for the suggestion pipeline. It is split
//! into focused submodules under `src/engine/` while keeping public paths
//! stable (for example `crate::engine::Registry` and `crate::engine::BucketMask`).
//!
//! ## How the parts work together
//!
//! ```text
//! rules (all)  ──┐
//!               │  Registry::new                 (registry.rs)
//!               └───────────────┬──────────────
//!                               │
//! discussions ─▶ Scanner::run   │                (scanner.rs)
//!                 per guest message:
//!                   TriggerInfo::scan ─▶ buckets + boost flag   (trigger.rs)
//!                   per active rule, skipping ignored fields:
//!                     captures_iter ─▶ extractor ─▶ Extracted
//!                     resolve_value / score                     (resolve.rs)
//!                               │
//!                               v
//!                       Vec<Candidate> (generation order)
//!                               │
//!                     rank_by (dedup.rs)
//!                       - collapse (field, value) to best confidence
//!                       - stable sort by confidence, descending
//!                               │
//!                               v
//!                        Vec<Suggestion>
//! ```
//!
//! Everything here is a pure function of its inputs. The caller's state (the
//! ignore list and the current guest count) comes in through arguments and
//! the engine never writes anything back.
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: validates rule data and exposes the ordered rule set.
//! - `trigger.rs`: scans a message body for coarse buckets and boost tokens.
//! - `scanner.rs`: walks discussions/messages/rules and produces candidates.
//! - `resolve.rs`: turns extractor output into a final value and confidence.
//! - `dedup.rs`: defines the dedup key and the ranking stage.
//! - `metrics.rs`: counters and timings for verbose runs.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events at `debug`/`trace` level for gating,
//! ignores, matches and resolution. The CLI prints them when `RECONCILE_LOG`
//! is set (for example `RECONCILE_LOG=reconcile=trace`).

#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/trigger.rs"]
mod trigger;

pub(crate) use dedup::rank_by;
pub use metrics::RunMetrics;
pub use registry::{BucketMask, Registry};
pub(crate) use scanner::Scanner;
