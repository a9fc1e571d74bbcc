//! Per-item activity extraction and per-activity display fields.

use crate::api::Context;
use crate::format::{damage_icon, damage_row, format_damage_row, format_damage_text};
use crate::model::{Activation, Activity, DamageLabel, DamagePart, Item, Labels, SaveData, Usable, Uses};
use crate::{DASH, EconomyBucket};

/// The item's activities in stored order. Shape normalization happens at
/// ingestion, so this is a plain view.
pub fn list_activities(item: &Item) -> &[Activity] {
    &item.activities
}

/// What a click on a row uses: an activity, or the item itself when it has
/// none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UseTarget<'a> {
    Activity(&'a Activity),
    Item(&'a Item),
}

impl<'a> UseTarget<'a> {
    pub fn activity(self) -> Option<&'a Activity> {
        match self {
            UseTarget::Activity(a) => Some(a),
            UseTarget::Item(_) => None,
        }
    }
}

impl Usable for UseTarget<'_> {
    fn save(&self) -> Option<&SaveData> {
        match self {
            UseTarget::Activity(a) => a.save(),
            UseTarget::Item(i) => i.save(),
        }
    }

    fn labels(&self) -> &Labels {
        match self {
            UseTarget::Activity(a) => a.labels(),
            UseTarget::Item(i) => i.labels(),
        }
    }

    fn damage_parts(&self) -> &[DamagePart] {
        match self {
            UseTarget::Activity(a) => a.damage_parts(),
            UseTarget::Item(i) => i.damage_parts(),
        }
    }
}

/// First activity flagged `canUse`, else the first activity, else the item.
pub fn primary_usable_activity(item: &Item) -> UseTarget<'_> {
    item.activities
        .iter()
        .find(|a| a.can_use)
        .or_else(|| item.activities.first())
        .map_or(UseTarget::Item(item), UseTarget::Activity)
}

// --- Buckets -----------------------------------------------------------------

/// Guess the bucket from the localized activation label.
fn bucket_from_label(label: &str) -> Option<EconomyBucket> {
    if regex!(r"(?i)bonus").is_match(label) {
        Some(EconomyBucket::Bonus)
    } else if regex!(r"(?i)reaksiyon|reaction").is_match(label) {
        Some(EconomyBucket::Reaction)
    } else if regex!(r"(?i)aksiyon|action").is_match(label) {
        Some(EconomyBucket::Action)
    } else {
        None
    }
}

/// Bucket from the activity's own activation type.
pub fn activity_bucket(activity: &Activity) -> Option<EconomyBucket> {
    activity.activation.kind.as_deref().and_then(EconomyBucket::from_activation)
}

/// Which bucket an item belongs to, or `None` if it is not part of the
/// action economy.
///
/// The first activity with a recognised activation type decides; then the
/// item's own activation; then its activation label.
pub fn activation_bucket(item: &Item) -> Option<EconomyBucket> {
    first_some!(
        item.activities.iter().find_map(activity_bucket),
        item.activation.kind.as_deref().and_then(EconomyBucket::from_activation),
        bucket_from_label(&item.labels.activation),
    )
}

// --- Display fields ----------------------------------------------------------

/// `"v/m"`, `"v"` without a maximum, or the dash when nothing is tracked.
pub fn uses_text(uses: Option<&Uses>) -> String {
    let Some(uses) = uses else {
        return DASH.to_string();
    };
    let value_empty = uses.value.as_ref().is_none_or(|v| v.is_zero());
    let value = uses.value.as_ref().map_or_else(|| "0".to_string(), ToString::to_string);

    match &uses.max {
        None if value_empty => DASH.to_string(),
        None => value,
        Some(max) if max.is_zero() && value_empty => DASH.to_string(),
        Some(max) => format!("{value}/{max}"),
    }
}

/// Short activation code: `A`, `B`, `R`, a localized minute/hour/day code,
/// or the first three letters of anything else.
pub fn time_short(ctx: &Context<'_>, activation: &Activation) -> String {
    let Some(kind) = activation.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) else {
        return DASH.to_string();
    };
    match kind.to_lowercase().as_str() {
        "action" | "a" => "A".to_string(),
        "bonus" | "ba" | "bonusaction" => "B".to_string(),
        "reaction" | "r" => "R".to_string(),
        "minute" | "min" => ctx.localize_or("ACTION_SHEET.TimeShort.Minute", "min"),
        "hour" | "hr" => ctx.localize_or("ACTION_SHEET.TimeShort.Hour", "hr"),
        "day" => ctx.localize_or("ACTION_SHEET.TimeShort.Day", "day"),
        _ => kind.chars().take(3).collect::<String>().to_uppercase(),
    }
}

fn damage_label_row(ctx: &Context<'_>, entry: &DamageLabel) -> String {
    match entry.kind.raw_text().and_then(|t| damage_icon(ctx, t)) {
        Some(icon) => damage_row(&entry.formula, Some(&icon)),
        None => damage_row(entry.text.as_deref().unwrap_or(&entry.formula), None),
    }
}

/// Damage markup for an item or activity; empty when it has no damage.
///
/// Pre-formatted `labels.damages` entries come first (secondary lines and
/// entries without a formula are skipped), then raw damage parts, then the
/// free-text damage label.
pub fn damage_html<S: Usable + ?Sized>(ctx: &Context<'_>, source: &S) -> String {
    let labels = source.labels();

    let from_labels: String = labels
        .damages
        .iter()
        .filter(|d| d.first_damage != Some(false) && !d.formula.trim().is_empty())
        .map(|d| damage_label_row(ctx, d))
        .collect();
    if !from_labels.is_empty() {
        return from_labels;
    }

    let from_parts: String = source
        .damage_parts()
        .iter()
        .filter(|p| !p.formula.trim().is_empty())
        .map(|p| format_damage_row(ctx, &p.formula, p.kind.raw_text().unwrap_or_default()))
        .collect();
    if !from_parts.is_empty() {
        return from_parts;
    }

    let text = labels.damage_text();
    if text.is_empty() { String::new() } else { format_damage_text(ctx, &text) }
}
