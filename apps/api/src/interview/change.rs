//! Change heuristics — describe how a candidate rewrote a design-document section.
//!
//! Default: `KeywordLengthHeuristic` (length ratios plus architecture keywords).
//! The description is folded into later prompts as a synthetic candidate note,
//! so the interviewer can comment on how the design evolved.
//!
//! Carried in `AppState` as `Arc<dyn ChangeHeuristic>`.

/// Implement this to swap the rewrite-description policy without touching the state machine.
pub trait ChangeHeuristic: Send + Sync {
    /// Returns a short description of the change from `old` to `new`,
    /// or `None` when there is nothing worth recording.
    fn describe(&self, old: &str, new: &str) -> Option<String>;
}

pub const EXPANDED: &str = "significantly expanded their approach";
pub const SIMPLIFIED: &str = "simplified and refined their approach";
pub const DISTRIBUTED: &str = "moved from basic to more distributed architecture approach";
pub const REFINED: &str = "refined their approach with additional considerations";

/// Growth ratio at or above which a rewrite counts as an expansion.
const EXPANSION_RATIO: f64 = 1.5;
/// Shrink ratio at or below which a rewrite counts as a simplification.
const SIMPLIFICATION_RATIO: f64 = 0.7;

const ARCHITECTURE_KEYWORDS: &[&str] = &[
    "microservice",
    "distributed",
    "cache",
    "queue",
    "load balancer",
    "shard",
    "replica",
    "partition",
    "cdn",
    "pub/sub",
];

/// Length- and keyword-based rewrite classifier.
///
/// Checks in order:
/// 1. blank before or after, or identical after trimming → no description.
///    Clearing a section is not treated as a rewrite: there is no new
///    approach to describe, and the section simply drops out of the context.
///    Filling a blank section is a first draft, not a revision.
/// 2. length ≥ 1.5× → expanded
/// 3. length ≤ 0.7× → simplified
/// 4. new architecture keywords → distributed
/// 5. anything else → refined
pub struct KeywordLengthHeuristic;

impl ChangeHeuristic for KeywordLengthHeuristic {
    fn describe(&self, old: &str, new: &str) -> Option<String> {
        let old = old.trim();
        let new = new.trim();

        if old.is_empty() || new.is_empty() || old == new {
            return None;
        }

        let ratio = new.chars().count() as f64 / old.chars().count() as f64;

        let description = if ratio >= EXPANSION_RATIO {
            EXPANDED
        } else if ratio <= SIMPLIFICATION_RATIO {
            SIMPLIFIED
        } else if introduces_architecture_keywords(old, new) {
            DISTRIBUTED
        } else {
            REFINED
        };

        Some(description.to_string())
    }
}

fn introduces_architecture_keywords(old: &str, new: &str) -> bool {
    let old = old.to_lowercase();
    let new = new.to_lowercase();
    ARCHITECTURE_KEYWORDS
        .iter()
        .any(|k| new.contains(k) && !old.contains(k))
}
