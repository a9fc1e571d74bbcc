//! Spell identity keys.
//!
//! An actor can hold several copies of the same spell (dragged in twice,
//! granted by two features). Each bucket shows a spell once; copies are
//! recognised by:
//!
//! - the source identity (`flags.core.sourceId`, `flags.dnd5e.sourceId`,
//!   `system.sourceId`, `system.identifier`, `system.slug`), else
//! - the composite of name, level and school.

use crate::EconomyBucket;
use crate::model::Item;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum SpellKey {
    Source(String),
    Composite { name: String, level: Option<i64>, school: String },
}

impl SpellKey {
    pub(crate) fn for_item(item: &Item) -> Self {
        match &item.source_id {
            Some(source) => SpellKey::Source(source.clone()),
            None => SpellKey::Composite {
                name: item.name.clone(),
                level: item.spell.level,
                school: item.spell.school.clone(),
            },
        }
    }
}

/// Spells already placed, per bucket.
#[derive(Debug, Default)]
pub(crate) struct SeenSpells {
    seen: HashSet<(EconomyBucket, SpellKey)>,
}

impl SeenSpells {
    /// `true` the first time a spell is offered for `bucket`.
    pub(crate) fn first_sighting(&mut self, bucket: EconomyBucket, item: &Item) -> bool {
        self.seen.insert((bucket, SpellKey::for_item(item)))
    }
}
