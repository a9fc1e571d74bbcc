//! Build metrics.
//!
//! Counters collected while building one [`ActionEconomy`](crate::ActionEconomy).
//! They are not part of the rendered view-model; the CLI report prints them
//! and tests use them to check why an item is missing.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Items offered to the builder.
    pub considered: usize,
    /// Items skipped because no activation bucket could be found.
    pub without_bucket: usize,
    /// Items hidden by the category or spell filter.
    pub filtered: usize,
    /// Spell copies dropped by de-duplication.
    pub duplicates: usize,
    /// Extra rows added for spell-like activities.
    pub activity_rows: usize,
    /// Descriptions that fell back to raw text after enrichment failed.
    pub enrich_failures: usize,
    /// Wall time of the build.
    pub elapsed: Duration,
}
