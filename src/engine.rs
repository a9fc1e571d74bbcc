//! Classification and filter engine.
//!
//! Turns an actor's items into the action-economy view-model. Every render
//! recomputes it from scratch; there is no incremental path.
//!
//! ## How the parts work together
//!
//! ```text
//! items ── activation_bucket (activity.rs) ── none? skip
//!              │
//!              v
//!        category_for_item (classify.rs)
//!              │
//!              ├─ spells:  should_include_spell (spells.rs)
//!              │           SeenSpells per bucket  (dedup.rs)
//!              └─ others:  FilterConfig::shows
//!              │
//!              v
//!        make_row (rows.rs)  ── enrich description, damage/save text
//!              │
//!              ├─ spell-like activities of non-spell items
//!              │     spell_activity_row → the activity's own bucket
//!              v
//!        ActionEconomy::finish (economy.rs)
//!          - collation sort per bucket (collate.rs)
//!          - counts + BuildStats (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `classify.rs`: item type → [`Category`](crate::Category).
//! - `spells.rs`: the spell sub-filter over both preparation shapes.
//! - `dedup.rs`: spell identity keys, so duplicate copies show once.
//! - `rows.rs`: `Row` / `ActivityRow` view-models.
//! - `collate.rs`: name order for the catalog language.
//! - `economy.rs`: the per-actor build loop and bucket output.
//! - `metrics.rs`: counters and timing for one build.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/collate.rs"]
mod collate;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/economy.rs"]
mod economy;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/rows.rs"]
mod rows;
#[path = "engine/spells.rs"]
mod spells;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use classify::category_for_item;
pub use economy::{ActionEconomy, build_action_economy};
pub use metrics::BuildStats;
pub use rows::{ActivityRow, Row};
pub use spells::should_include_spell;
