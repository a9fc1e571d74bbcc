use super::classify::category_for_item;
use super::collate::Collation;
use super::dedup::SeenSpells;
use super::metrics::BuildStats;
use super::rows::{Row, describe, make_row, spell_activity_row};
use super::spells::should_include_spell;
use crate::activity::{activation_bucket, activity_bucket};
use crate::api::Context;
use crate::model::Item;
use crate::settings::FilterConfig;
use crate::{Category, EconomyBucket};
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// Rows per bucket plus counts, as consumed by the action-table template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEconomy {
    pub action: Vec<Row>,
    pub bonus: Vec<Row>,
    pub reaction: Vec<Row>,
    pub action_count: usize,
    pub bonus_count: usize,
    pub reaction_count: usize,
    #[serde(skip)]
    pub stats: BuildStats,
}

impl ActionEconomy {
    pub fn bucket(&self, bucket: EconomyBucket) -> &[Row] {
        match bucket {
            EconomyBucket::Action => &self.action,
            EconomyBucket::Bonus => &self.bonus,
            EconomyBucket::Reaction => &self.reaction,
        }
    }

    fn bucket_mut(&mut self, bucket: EconomyBucket) -> &mut Vec<Row> {
        match bucket {
            EconomyBucket::Action => &mut self.action,
            EconomyBucket::Bonus => &mut self.bonus,
            EconomyBucket::Reaction => &mut self.reaction,
        }
    }

    pub fn total(&self) -> usize {
        self.action.len() + self.bonus.len() + self.reaction.len()
    }

    /// Sort each bucket by name and fill in the counts.
    fn finish(&mut self, collation: Collation) {
        for bucket in EconomyBucket::ALL {
            // Stable, so equal names keep item order.
            self.bucket_mut(bucket).sort_by_cached_key(|row| collation.key(&row.name));
        }
        self.action_count = self.action.len();
        self.bonus_count = self.bonus.len();
        self.reaction_count = self.reaction.len();
    }
}

/// Build the action economy for one actor.
///
/// Items without an activation bucket are left out. The remaining items pass
/// the category filter (spells: the spell sub-filter, then per-bucket
/// de-duplication) before a row is built. Non-spell items also contribute one
/// row per spell-like activity, placed in the activity's own bucket.
pub fn build_action_economy(ctx: &Context<'_>, items: &[Item], filters: &FilterConfig) -> ActionEconomy {
    let started = Instant::now();
    let mut out = ActionEconomy::default();
    let mut seen = SeenSpells::default();

    for item in items {
        out.stats.considered += 1;

        let Some(bucket) = activation_bucket(item) else {
            debug!(item = %item.name, "no activation bucket, skipped");
            out.stats.without_bucket += 1;
            continue;
        };

        let category = category_for_item(item);
        let visible = match category {
            Category::Spells => should_include_spell(item, &filters.spells),
            other => filters.shows(other),
        };
        if !visible {
            debug!(item = %item.name, category = category.as_str(), "hidden by filter");
            out.stats.filtered += 1;
            continue;
        }
        if category == Category::Spells && !seen.first_sighting(bucket, item) {
            debug!(item = %item.name, bucket = bucket.as_str(), "duplicate spell, skipped");
            out.stats.duplicates += 1;
            continue;
        }

        let description = describe(ctx, item, &mut out.stats);
        let row = make_row(ctx, item, description);

        let extra: Vec<(EconomyBucket, Row)> = if category == Category::Spells {
            Vec::new()
        } else {
            item.activities
                .iter()
                .filter(|act| act.is_spell_like())
                .map(|act| (activity_bucket(act).unwrap_or(bucket), spell_activity_row(ctx, &row, item, act)))
                .collect()
        };

        out.bucket_mut(bucket).push(row);
        for (target, row) in extra {
            out.stats.activity_rows += 1;
            out.bucket_mut(target).push(row);
        }
    }

    out.finish(Collation::for_lang(ctx.lang()));
    out.stats.elapsed = started.elapsed();
    out
}
