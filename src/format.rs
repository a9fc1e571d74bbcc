//! Damage rows and saving-throw text.
//!
//! Everything here renders strings for the row view-model. Damage rows are
//! HTML fragments; save text is plain text such as `DEX 15`.

use crate::DASH;
use crate::api::Context;
use crate::host::fallback_icon;
use crate::model::{AbilityRef, DcRef, Usable};
use crate::normalize::{MatchMode, best_label_match, format_number, label_candidates, resolve_damage_text};
use regex::RegexBuilder;

/// Escape text for use in element content and quoted attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// --- Damage ------------------------------------------------------------------

/// Display data for a resolved damage or healing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DamageIcon {
    pub label: String,
    pub icon: String,
}

/// Resolve a key or localized label to its registry label and icon.
/// `None` when the type cannot be resolved.
pub(crate) fn damage_icon(ctx: &Context<'_>, key_or_label: &str) -> Option<DamageIcon> {
    let raw = key_or_label.trim();
    if raw.is_empty() {
        return None;
    }
    let key = match ctx.system.type_entry(raw) {
        Some(_) => raw.to_string(),
        None => resolve_damage_text(ctx, raw)?,
    };
    let entry = ctx.system.type_entry(&key);

    let label = entry
        .filter(|e| !e.label.is_empty())
        .map(|e| ctx.localize(&e.label))
        .unwrap_or_else(|| raw.to_string());
    let icon = entry.and_then(|e| e.icon.clone()).unwrap_or_else(|| fallback_icon(&key));

    Some(DamageIcon { label, icon })
}

/// One damage row; an empty formula shows the dash placeholder.
pub(crate) fn damage_row(formula: &str, icon: Option<&DamageIcon>) -> String {
    let formula = formula.trim();
    let shown = if formula.is_empty() { DASH.to_string() } else { escape(formula) };
    let icon_html = icon
        .map(|i| {
            let label = escape(&i.label);
            format!(
                r#"<span data-tooltip="{label}" aria-label="{label}"><dnd5e-icon src="{}"></dnd5e-icon></span>"#,
                escape(&i.icon)
            )
        })
        .unwrap_or_default();
    format!(r#"<div class="row"><span class="formula">{shown}</span>{icon_html}</div>"#)
}

/// Render `formula` with the icon and tooltip of the given damage type.
pub fn format_damage_row(ctx: &Context<'_>, formula: &str, key_or_label: &str) -> String {
    damage_row(formula, damage_icon(ctx, key_or_label).as_ref())
}

/// Render free damage text such as `"2d6 fire, 1d4 healing"` as one row per
/// comma-separated segment.
///
/// Each segment is matched against every localized type label; the longest
/// contained label wins and is removed to leave the formula. Segments with no
/// known label become bare formula rows.
pub fn format_damage_text(ctx: &Context<'_>, text: &str) -> String {
    let candidates = label_candidates(ctx);

    text.split(',')
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .map(|seg| match best_label_match(&candidates, &seg.to_lowercase(), MatchMode::Needle) {
            Some(found) => {
                let formula = strip_label(seg, &found.label);
                format_damage_row(ctx, &formula, &found.key)
            }
            None => damage_row(seg, None),
        })
        .collect()
}

/// Remove the first case-insensitive occurrence of `label` from `segment`.
fn strip_label(segment: &str, label: &str) -> String {
    match RegexBuilder::new(&regex::escape(label)).case_insensitive(true).build() {
        Ok(re) => re.replace(segment, "").trim().to_string(),
        Err(_) => segment.to_string(),
    }
}

// --- Saves -------------------------------------------------------------------

/// Pull `(ability, dc)` out of a host label like `"Dex DC 13"` or `"DC 13 ÇEV"`.
fn parse_save_label(label: &str) -> Option<(String, f64)> {
    let ability_first = regex!(r"(?i)(\p{L}{3,})\s*DC\s*(\d+)");
    let dc_first = regex!(r"(?i)DC\s*(\d+)\s*(\p{L}{3,})");

    let (ability, dc) = if let Some(caps) = ability_first.captures(label) {
        (caps.get(1)?, caps.get(2)?)
    } else {
        let caps = dc_first.captures(label)?;
        (caps.get(2)?, caps.get(1)?)
    };
    let dc = dc.as_str().parse::<f64>().ok()?;
    Some((ability.as_str().to_string(), dc))
}

/// Saving-throw text: `"DEX 15"`, `"DEX DC —"` when the DC is missing, the bare
/// DC when no single ability is known, or `""`.
///
/// Structured `save` data wins; `labels.save` only fills pieces that are
/// absent.
pub fn format_save_text<S: Usable + ?Sized>(ctx: &Context<'_>, source: &S) -> String {
    let save = source.save();
    let ability_absent = save.is_none_or(|s| s.ability == AbilityRef::Absent);
    let mut ability = save.and_then(|s| s.ability.single()).map(str::to_string);
    let mut dc = save.map(|s| s.dc).unwrap_or_default();

    if ability_absent || dc == DcRef::Absent {
        if let Some((label_ability, label_dc)) = source.labels().save.as_deref().and_then(parse_save_label) {
            if ability_absent {
                ability = Some(label_ability);
            }
            if dc == DcRef::Absent {
                dc = DcRef::Value(label_dc);
            }
        }
    }

    match (ability, dc) {
        (Some(ability), DcRef::Value(n)) => format!("{} {}", ability_abbr(ctx, &ability), format_number(n)),
        (Some(ability), _) => format!("{} DC {DASH}", ability_abbr(ctx, &ability)),
        (None, DcRef::Value(n)) => format_number(n),
        (None, _) => String::new(),
    }
}

/// Uppercased ability abbreviation for a registry key or localized text.
pub fn ability_abbr(ctx: &Context<'_>, key_or_label: &str) -> String {
    let raw = key_or_label.trim();
    let needle = raw.to_lowercase();
    if needle.is_empty() {
        return String::new();
    }

    if let Some(entry) = ctx.system.abilities.get(&needle) {
        let abbr = match &entry.abbreviation {
            Some(reference) => ctx.localize_or(reference, &needle),
            None => needle.clone(),
        };
        return abbr.to_uppercase();
    }

    for (key, entry) in &ctx.system.abilities {
        let label = ctx.localize_or(&entry.label, "").to_lowercase();
        let abbr = entry.abbreviation.as_deref().map(|a| ctx.localize_or(a, "")).unwrap_or_default();
        let label_hit = !label.is_empty() && label.contains(&needle);
        let abbr_hit = !abbr.is_empty() && abbr.to_lowercase() == needle;
        if label_hit || abbr_hit {
            let shown = if abbr.is_empty() { key.as_str() } else { abbr.as_str() };
            return shown.to_uppercase();
        }
    }

    raw.chars().take(3).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Catalog, SystemConfig};
    use crate::model::Activity;
    use serde_json::json;

    fn activity(value: serde_json::Value) -> Activity {
        Activity::from_value(&value, None)
    }

    #[test]
    fn damage_row_uses_registry_label_and_fallback_icon() {
        let ctx = Context::builtin();
        assert_eq!(
            format_damage_row(&ctx, "1d8", "slashing"),
            r#"<div class="row"><span class="formula">1d8</span><span data-tooltip="Slashing" aria-label="Slashing"><dnd5e-icon src="systems/dnd5e/icons/svg/damage/slashing.svg"></dnd5e-icon></span></div>"#
        );
    }

    #[test]
    fn damage_row_without_formula_or_type() {
        let ctx = Context::builtin();
        assert_eq!(format_damage_row(&ctx, "  ", "banana"), r#"<div class="row"><span class="formula">—</span></div>"#);
    }

    #[test]
    fn registry_icons_win_and_markup_is_escaped() {
        let system = SystemConfig::from_json(r#"{"damageTypes": {"fire": {"label": "Fire & \"Flame\"", "icon": "fire.svg"}}}"#)
            .unwrap();
        let catalog = Catalog::default();
        let ctx = Context::new(&system, &catalog);
        let html = format_damage_row(&ctx, "<b>1d6</b>", "fire");
        assert!(html.contains(r#"<span class="formula">&lt;b&gt;1d6&lt;/b&gt;</span>"#));
        assert!(html.contains(r#"data-tooltip="Fire &amp; &quot;Flame&quot;""#));
        assert!(html.contains(r#"src="fire.svg""#));
    }

    #[test]
    fn damage_text_splits_segments_and_matches_labels() {
        let ctx = Context::builtin();
        let html = format_damage_text(&ctx, "2d6 fire, 1d4 healing");
        assert_eq!(html.matches(r#"<div class="row">"#).count(), 2);
        assert!(html.contains(r#"<span class="formula">2d6</span><span data-tooltip="Fire""#));
        assert!(html.contains(r#"<span class="formula">1d4</span><span data-tooltip="Healing""#));
    }

    #[test]
    fn damage_text_keeps_unknown_segments_bare() {
        let ctx = Context::builtin();
        let html = format_damage_text(&ctx, "3 sparkle, 1d4 Temporary HP,");
        assert!(html.starts_with(r#"<div class="row"><span class="formula">3 sparkle</span></div>"#));
        assert!(html.contains(r#"<span class="formula">1d4</span><span data-tooltip="Temporary HP""#));
        assert_eq!(format_damage_text(&ctx, ""), "");
    }

    #[test]
    fn save_text_from_structured_fields() {
        let ctx = Context::builtin();
        assert_eq!(format_save_text(&ctx, &activity(json!({"save": {"ability": "dex", "dc": {"value": 15}}}))), "DEX 15");
        assert_eq!(format_save_text(&ctx, &activity(json!({"save": {"ability": ["wis"], "dc": "13"}}))), "WIS 13");
        assert_eq!(format_save_text(&ctx, &activity(json!({"save": {"ability": "con", "dc": "hard"}}))), "CON DC —");
        assert_eq!(format_save_text(&ctx, &activity(json!({"save": {"ability": "con"}}))), "CON DC —");
    }

    #[test]
    fn save_text_without_a_single_ability() {
        let ctx = Context::builtin();
        assert_eq!(format_save_text(&ctx, &activity(json!({"save": {"ability": ["str", "dex"], "dc": 12}}))), "12");
        assert_eq!(format_save_text(&ctx, &activity(json!({"save": {"dc": 12}}))), "12");
        assert_eq!(format_save_text(&ctx, &activity(json!({}))), "");
    }

    #[test]
    fn save_label_fills_missing_pieces() {
        let ctx = Context::builtin();
        let from_label = activity(json!({"labels": {"save": "Dex DC 13"}}));
        assert_eq!(format_save_text(&ctx, &from_label), "DEX 13");

        let dc_first = activity(json!({"save": {"ability": "wis"}, "labels": {"save": "DC 17 ÇEV"}}));
        assert_eq!(format_save_text(&ctx, &dc_first), "WIS 17");

        let structured_wins = activity(json!({"save": {"ability": "str", "dc": 10}, "labels": {"save": "Dex DC 13"}}));
        assert_eq!(format_save_text(&ctx, &structured_wins), "STR 10");
    }

    #[test]
    fn ability_abbreviation_fallbacks() {
        let ctx = Context::builtin();
        assert_eq!(ability_abbr(&ctx, "dex"), "DEX");
        assert_eq!(ability_abbr(&ctx, "Wisdom"), "WIS");
        assert_eq!(ability_abbr(&ctx, "ÇEV"), "ÇEV");
        assert_eq!(ability_abbr(&ctx, "Sanity"), "SAN");

        let bare = Catalog::default();
        let ctx = Context::new(SystemConfig::builtin(), &bare);
        assert_eq!(ability_abbr(&ctx, "cha"), "CHA");
    }
}
