use super::*;
use crate::api::Context;
use crate::error::EnrichError;
use crate::host::{Catalog, Enricher, SystemConfig};
use crate::model::Item;
use crate::settings::{FilterConfig, SpellFilter};
use crate::{DASH, EconomyBucket};
use serde_json::{Value, json};

fn items(raw: Value) -> Vec<Item> {
    match raw {
        Value::Array(list) => list.iter().map(Item::from_value).collect(),
        other => vec![Item::from_value(&other)],
    }
}

fn names(rows: &[Row]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

fn spell(name: &str, system: Value) -> Value {
    json!({"name": name, "type": "spell", "system": system})
}

const ONLY_CANTRIPS: SpellFilter = SpellFilter { all: false, prepared: false, ritual: false, cantrips: true };
const NO_SPELLS: SpellFilter = SpellFilter { all: false, prepared: false, ritual: false, cantrips: false };

#[test]
fn weapon_lands_in_action_with_damage_row() {
    let ctx = Context::builtin();
    let list = items(json!({
        "id": "ls",
        "name": "Longsword",
        "type": "weapon",
        "system": {"activation": {"type": "action"}},
        "damage": {"parts": [["1d8", "slashing"]]}
    }));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());

    assert_eq!(out.action_count, 1);
    assert_eq!((out.bonus_count, out.reaction_count), (0, 0));
    let row = &out.action[0];
    assert!(row.dmg_html.contains(r#"<span class="formula">1d8</span>"#));
    assert!(row.dmg_html.contains(r#"data-tooltip="Slashing""#));
    assert!(row.dmg_html.contains("systems/dnd5e/icons/svg/damage/slashing.svg"));
}

#[test]
fn items_without_any_activation_are_excluded() {
    let ctx = Context::builtin();
    let list = items(json!([
        {"name": "Rope", "type": "loot"},
        {"name": "Ring", "type": "equipment", "labels": {"activation": "Special"},
         "system": {"activities": [{"activation": {"type": "special"}}]}},
    ]));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(out.total(), 0);
    assert_eq!(out.stats.without_bucket, 2);
}

#[test]
fn cantrip_filter_scenarios() {
    let ctx = Context::builtin();
    let list = items(spell("Fire Bolt", json!({"level": 0, "activation": {"type": "action"}})));

    let cases = [(ONLY_CANTRIPS, 1), (NO_SPELLS, 0), (SpellFilter { all: true, ..NO_SPELLS }, 1)];
    for (spells, expected) in cases {
        let filters = FilterConfig { spells, ..FilterConfig::default() };
        let out = build_action_economy(&ctx, &list, &filters);
        assert_eq!(out.action_count, expected, "filter: {spells:?}");
    }
}

#[test]
fn category_filters_hide_items() {
    let ctx = Context::builtin();
    let list = items(json!([
        {"name": "Dagger", "type": "weapon", "system": {"activation": {"type": "action"}}},
        {"name": "Potion", "type": "consumable", "system": {"activation": {"type": "bonus"}}},
        {"name": "Oddity", "type": "mystery", "system": {"activation": {"type": "action"}}},
    ]));
    let filters = FilterConfig { weapons: false, ..FilterConfig::default() };
    let out = build_action_economy(&ctx, &list, &filters);
    assert_eq!(names(&out.action), ["Oddity"]);
    assert_eq!(names(&out.bonus), ["Potion"]);
    assert_eq!(out.stats.filtered, 1);

    // A stored record that never mentioned "other" still shows it.
    let legacy = FilterConfig::migrate(&json!({"weapons": true}));
    assert_eq!(build_action_economy(&ctx, &list, &legacy).action_count, 2);
}

#[test]
fn duplicate_spells_show_once_per_bucket() {
    let ctx = Context::builtin();
    let shield = |name: &str| {
        json!({"name": name, "type": "spell", "flags": {"core": {"sourceId": "Compendium.shield"}},
               "system": {"level": 1, "prepared": true, "activation": {"type": "reaction"}}})
    };
    let list = items(json!([shield("Shield"), shield("Shield"), shield("Shield (granted)")]));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(names(&out.reaction), ["Shield"]);
    assert_eq!(out.stats.duplicates, 2);
}

#[test]
fn filtered_copies_do_not_hide_visible_ones() {
    let ctx = Context::builtin();
    let list = items(json!([
        spell("Detect Magic", json!({"level": 1, "prepared": false, "identifier": "detect-magic",
                                     "activation": {"type": "action"}})),
        spell("Detect Magic", json!({"level": 1, "method": "innate", "identifier": "detect-magic",
                                     "activation": {"type": "action"}})),
    ]));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(out.action_count, 1);
    assert_eq!(out.stats.filtered, 1);
    assert_eq!(out.stats.duplicates, 0);
}

#[test]
fn spell_like_activities_add_rows_in_their_own_bucket() {
    let ctx = Context::builtin();
    let list = items(json!({
        "id": "staff",
        "name": "Staff of Frost",
        "type": "weapon",
        "system": {
            "activation": {"type": "action"},
            "activities": {
                "strike": {"type": "attack", "activation": {"type": "action"}},
                "wall": {"type": "cast", "name": "Wall of Ice", "activation": {"type": "bonus"}},
                "cone": {"type": "spell", "name": "Cone of Cold"},
            }
        }
    }));
    let filters = FilterConfig { spells: NO_SPELLS, ..FilterConfig::default() };
    let out = build_action_economy(&ctx, &list, &filters);

    assert_eq!(names(&out.action), ["Cone of Cold", "Staff of Frost"]);
    assert_eq!(names(&out.bonus), ["Wall of Ice"]);
    assert!(out.bonus.iter().all(|r| r.id == "staff"));
    assert_eq!(out.stats.activity_rows, 2);
}

#[test]
fn spell_items_do_not_add_activity_rows() {
    let ctx = Context::builtin();
    let list = items(spell(
        "Magic Missile",
        json!({"level": 1, "prepared": true, "activities": [{"type": "spell", "activation": {"type": "action"}}]}),
    ));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(out.total(), 1);
}

#[test]
fn buckets_sort_by_folded_name_and_rebuild_identically() {
    let ctx = Context::builtin();
    let list = items(json!([
        {"name": "zephyr strike", "type": "feat", "system": {"activation": {"type": "bonus"}}},
        {"name": "Ölüm Dokunuşu", "type": "feat", "system": {"activation": {"type": "bonus"}}},
        {"name": "Action Surge", "type": "feat", "system": {"activation": {"type": "bonus"}}},
        {"name": "Misty Step", "type": "feat", "system": {"activation": {"type": "bonus"}}},
    ]));
    let first = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(names(&first.bonus), ["Action Surge", "Misty Step", "Ölüm Dokunuşu", "zephyr strike"]);

    let second = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(first.bonus, second.bonus);
    assert_eq!(first.bonus_count, 4);
}

#[test]
fn turkish_catalog_sorts_with_turkish_alphabet() {
    let catalog = Catalog::from_json(r#"{"lang": "tr"}"#).unwrap();
    let ctx = Context::new(SystemConfig::builtin(), &catalog);
    let list = items(json!([
        {"name": "Çığlık", "type": "feat", "system": {"activation": {"type": "bonus"}}},
        {"name": "Cüce", "type": "feat", "system": {"activation": {"type": "bonus"}}},
        {"name": "İnce", "type": "feat", "system": {"activation": {"type": "bonus"}}},
        {"name": "Işık", "type": "feat", "system": {"activation": {"type": "bonus"}}},
    ]));
    let economy = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(names(&economy.bonus), ["Cüce", "Çığlık", "Işık", "İnce"]);

    let english = build_action_economy(&Context::builtin(), &list, &FilterConfig::default());
    assert_eq!(names(&english.bonus)[..2], ["Çığlık", "Cüce"]);
}

#[test]
fn free_text_damage_fallback_renders_each_segment() {
    let ctx = Context::builtin();
    let list = items(json!({
        "name": "Vampiric Touch",
        "type": "feat",
        "system": {"activation": {"type": "action"}},
        "labels": {"damage": "2d6 fire, 1d4 healing"}
    }));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    let row = &out.action[0];
    assert_eq!(row.dmg_text, "2d6 fire, 1d4 healing");
    assert_eq!(row.dmg_html.matches(r#"<div class="row">"#).count(), 2);
    assert!(row.dmg_html.contains(r#"data-tooltip="Fire""#));
    assert!(row.dmg_html.contains(r#"data-tooltip="Healing""#));
}

struct Failing;

impl Enricher for Failing {
    fn enrich(&self, _raw: &str, _item: &Item) -> Result<String, EnrichError> {
        Err(EnrichError::Failed("renderer offline".into()))
    }
}

#[test]
fn enrichment_failure_keeps_raw_description() {
    let failing = Failing;
    let ctx = Context::builtin().with_enricher(&failing);
    let list = items(json!({
        "name": "Second Wind",
        "type": "feat",
        "system": {"activation": {"type": "bonus"}, "description": {"value": "<p>Regain [[1d10]] hp.</p>"}}
    }));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(out.bonus[0].description, "<p>Regain [[1d10]] hp.</p>");
    assert_eq!(out.stats.enrich_failures, 1);
    assert_eq!(out.bonus[0].uses, DASH);
}

#[test]
fn bucket_accessor_matches_fields() {
    let ctx = Context::builtin();
    let list = items(json!({"name": "Parry", "type": "feat", "labels": {"activation": "1 Reaction"}}));
    let out = build_action_economy(&ctx, &list, &FilterConfig::default());
    assert_eq!(names(out.bucket(EconomyBucket::Reaction)), ["Parry"]);
    assert!(out.bucket(EconomyBucket::Action).is_empty());
}
