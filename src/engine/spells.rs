//! Spell sub-filter.
//!
//! Spell data comes in two shapes: the legacy `preparation.{mode, prepared}`
//! block and the newer `method` + `prepared` fields. The newer fields win when
//! present. Source data is only read.

use crate::model::{Item, SpellData};
use crate::settings::SpellFilter;

/// Preparation modes that make a spell castable without preparing it.
const ALWAYS_AVAILABLE: [&str; 4] = ["always", "atwill", "innate", "pact"];

fn preparation_method(spell: &SpellData) -> Option<&str> {
    first_some!(
        spell.method.as_deref().filter(|m| !m.is_empty()),
        spell.preparation.as_ref().and_then(|p| p.mode.as_deref()),
    )
}

fn is_prepared(spell: &SpellData) -> bool {
    spell.prepared.unwrap_or_else(|| spell.preparation.as_ref().is_some_and(|p| p.prepared))
}

/// Whether a spell item passes the spell sub-filter.
///
/// `all` admits everything. Otherwise a spell needs at least one active flag
/// it satisfies: prepared (or always available), ritual, or cantrip.
pub fn should_include_spell(spell: &Item, filter: &SpellFilter) -> bool {
    if filter.all {
        return true;
    }
    let data = &spell.spell;
    let always = preparation_method(data).is_some_and(|m| ALWAYS_AVAILABLE.contains(&m));

    (filter.prepared && (is_prepared(data) || always))
        || (filter.ritual && data.ritual)
        || (filter.cantrips && data.level == Some(0))
}
