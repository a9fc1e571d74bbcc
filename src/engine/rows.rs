//! Row view-models handed to the template renderer.

use super::metrics::BuildStats;
use crate::DASH;
use crate::activity::{damage_html, primary_usable_activity, time_short, uses_text};
use crate::api::Context;
use crate::format::{escape, format_save_text};
use crate::model::{Activity, Capabilities, Item};
use serde::Serialize;
use tracing::warn;

fn or_dash(text: String) -> String {
    if text.is_empty() { DASH.to_string() } else { text }
}

/// One activity inside an expanded row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub uses_text: String,
    pub time_short: String,
    pub damage_html: String,
    pub has_roll_attack: bool,
    pub has_roll_damage: bool,
    pub has_use: bool,
}

impl ActivityRow {
    pub(crate) fn build(ctx: &Context<'_>, item: &Item, activity: &Activity) -> Self {
        ActivityRow {
            id: activity.id.clone(),
            name: activity.name.clone().unwrap_or_else(|| item.name.clone()),
            icon: activity.icon.clone().unwrap_or_default(),
            uses_text: uses_text(activity.uses.as_ref()),
            time_short: time_short(ctx, &activity.activation),
            damage_html: or_dash(damage_html(ctx, activity)),
            has_roll_attack: activity.caps.contains(Capabilities::ROLL_ATTACK),
            has_roll_damage: activity.caps.contains(Capabilities::ROLL_DAMAGE),
            has_use: activity.caps.contains(Capabilities::USE),
        }
    }
}

/// One line of the action table. Empty fields hold the dash placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Id of the underlying item, also for spell-like activity rows.
    pub id: String,
    pub name: String,
    pub img: String,
    pub uses: String,
    /// Save text of the primary activity, else the to-hit/roll label.
    pub roll_text: String,
    pub roll_html: String,
    pub dmg_text: String,
    pub dmg_html: String,
    pub range: String,
    pub target: String,
    /// Enriched description markup.
    pub description: String,
    pub activities: Vec<ActivityRow>,
}

/// Enriched description, or the raw one when the enricher fails.
pub(crate) fn describe(ctx: &Context<'_>, item: &Item, stats: &mut BuildStats) -> String {
    match ctx.enricher.enrich(&item.description, item) {
        Ok(html) => html,
        Err(err) => {
            warn!(item = %item.name, error = %err, "description enrichment failed, showing raw text");
            stats.enrich_failures += 1;
            item.description.clone()
        }
    }
}

pub(crate) fn make_row(ctx: &Context<'_>, item: &Item, description: String) -> Row {
    let labels = &item.labels;

    let save_text = format_save_text(ctx, &primary_usable_activity(item));
    let roll_text = if save_text.is_empty() { labels.roll_text() } else { save_text };

    let dmg_text = labels.damage_text();
    let html = damage_html(ctx, item);
    let dmg_html = if !html.is_empty() {
        html
    } else if !dmg_text.is_empty() {
        escape(&dmg_text)
    } else {
        DASH.to_string()
    };

    Row {
        id: item.id.clone(),
        name: item.name.clone(),
        img: item.img.clone(),
        uses: uses_text(item.uses.as_ref()),
        roll_text: or_dash(roll_text),
        roll_html: String::new(),
        dmg_text: or_dash(dmg_text),
        dmg_html,
        range: or_dash(labels.range.normalize()),
        target: or_dash(labels.target.normalize()),
        description,
        activities: item.activities.iter().map(|a| ActivityRow::build(ctx, item, a)).collect(),
    }
}

/// Extra row for a spell cast through a non-spell item: the parent row with
/// the activity's name and icon, and only that activity expanded.
pub(crate) fn spell_activity_row(ctx: &Context<'_>, base: &Row, item: &Item, activity: &Activity) -> Row {
    let mut row = base.clone();
    if let Some(name) = &activity.name {
        row.name = name.clone();
    }
    if let Some(icon) = &activity.icon {
        row.img = icon.clone();
    }
    row.activities = vec![ActivityRow::build(ctx, item, activity)];

    if activity.caps.contains(Capabilities::ROLL_ATTACK) {
        row.roll_text = ctx.localize("ACTION_SHEET.RollAttack");
    }
    let html = damage_html(ctx, activity);
    if !html.is_empty() {
        row.dmg_html = html;
        row.dmg_text = String::new();
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_text_takes_precedence_over_roll_labels() {
        let ctx = Context::builtin();
        let item = Item::from_value(&json!({
            "name": "Poison Spray",
            "labels": {"toHit": "+5"},
            "system": {"activities": [{"save": {"ability": "con", "dc": 13}}]}
        }));
        assert_eq!(make_row(&ctx, &item, String::new()).roll_text, "CON 13");

        let plain = Item::from_value(&json!({"labels": {"toHit": "", "attack": "+7"}}));
        assert_eq!(make_row(&ctx, &plain, String::new()).roll_text, "+7");
    }

    #[test]
    fn empty_fields_show_the_dash() {
        let ctx = Context::builtin();
        let row = make_row(&ctx, &Item::from_value(&json!({"name": "Rock"})), String::new());
        for field in [&row.uses, &row.roll_text, &row.dmg_text, &row.dmg_html, &row.range, &row.target] {
            assert_eq!(field, DASH);
        }
        assert!(row.roll_html.is_empty());
    }

    #[test]
    fn rows_serialize_in_camel_case() {
        let ctx = Context::builtin();
        let item = Item::from_value(&json!({"id": "x", "name": "Dagger", "system": {"activities": [{"id": "a", "hasRollAttack": true}]}}));
        let value = serde_json::to_value(make_row(&ctx, &item, String::new())).unwrap();
        assert_eq!(value["dmgHtml"], json!(DASH));
        assert_eq!(value["activities"][0]["hasRollAttack"], json!(true));
        assert_eq!(value["activities"][0]["timeShort"], json!(DASH));
        assert_eq!(value["activities"][0]["name"], json!("Dagger"));
    }

    #[test]
    fn spell_activity_row_overrides_parent_fields() {
        let ctx = Context::builtin();
        let item = Item::from_value(&json!({
            "id": "wand",
            "name": "Wand of Fire",
            "img": "wand.webp",
            "labels": {"damage": "1d4 fire"},
            "system": {"activities": [
                {"id": "zap", "name": "Scorching Ray", "icon": "ray.webp", "type": "cast",
                 "hasRollAttack": true, "damage": {"parts": [["2d6", "fire"]]}},
                {"id": "bonk", "type": "attack"}
            ]}
        }));
        let base = make_row(&ctx, &item, String::new());
        let row = spell_activity_row(&ctx, &base, &item, &item.activities[0]);

        assert_eq!(row.id, "wand");
        assert_eq!(row.name, "Scorching Ray");
        assert_eq!(row.img, "ray.webp");
        assert_eq!(row.roll_text, "Roll Attack");
        assert!(row.dmg_html.contains("2d6"));
        assert!(row.dmg_text.is_empty());
        assert_eq!(row.activities.len(), 1);
        assert_eq!(row.activities[0].id, "zap");
        assert_eq!(base.activities.len(), 2);
    }
}
