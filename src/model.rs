//! Item and activity records.
//!
//! Host exports are loosely typed: one logical field can arrive as a string, a
//! list, a tagged object or a keyed map depending on the game-system version.
//! Ingestion (`Item::from_value`, `Activity::from_value`) settles every shape
//! once, through a short chain of named fallback steps per field, so nothing
//! downstream branches on raw JSON.
//!
//! Ingestion is total. Unknown or malformed fields become empty values; an
//! item never fails to load.

use crate::normalize::{Label, TypeRef, format_number};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// --- Raw value helpers -------------------------------------------------------

/// Follow `path` through nested objects; `null` counts as absent.
fn get<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    let mut cur = value;
    for key in path {
        cur = cur.get(key)?;
    }
    (!cur.is_null()).then_some(cur)
}

/// A non-empty trimmed string or a stringified number.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => n.as_f64().map(format_number),
        _ => None,
    }
}

fn text_at(value: &Value, path: &[&str]) -> Option<String> {
    get(value, path).and_then(scalar_text)
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

// --- Capabilities ------------------------------------------------------------

bitflags::bitflags! {
    /// Host actions an activity exposes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const USE         = 1 << 0;
        const ROLL_ATTACK = 1 << 1;
        const ROLL_DAMAGE = 1 << 2;
    }
}

impl Capabilities {
    /// Accepts a `capabilities` name list and/or `hasUse`-style booleans.
    fn from_value(value: &Value) -> Self {
        let mut caps = Capabilities::empty();

        if let Some(Value::Array(names)) = get(value, &["capabilities"]) {
            for name in names.iter().filter_map(Value::as_str) {
                match name {
                    "use" => caps |= Capabilities::USE,
                    "rollAttack" => caps |= Capabilities::ROLL_ATTACK,
                    "rollDamage" => caps |= Capabilities::ROLL_DAMAGE,
                    _ => {}
                }
            }
        }

        if truthy(value.get("hasUse")) {
            caps |= Capabilities::USE;
        }
        if truthy(value.get("hasRollAttack")) {
            caps |= Capabilities::ROLL_ATTACK;
        }
        if truthy(value.get("hasRollDamage")) {
            caps |= Capabilities::ROLL_DAMAGE;
        }

        caps
    }
}

// --- Field families ----------------------------------------------------------

/// Activation cost (`type`, or `value` in the older `time` shape).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    pub kind: Option<String>,
}

impl Activation {
    fn from_value(value: Option<&Value>) -> Self {
        let kind = match value {
            Some(v @ Value::String(_)) => scalar_text(v),
            Some(v) => first_some!(text_at(v, &["type"]), text_at(v, &["value"])),
            None => None,
        };
        Activation { kind }
    }
}

/// A use counter as the host stores it: usually a number, sometimes a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Count {
    Number(f64),
    Text(String),
}

impl Count {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Count::Number),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.parse::<f64>().map(Count::Number).unwrap_or_else(|_| Count::Text(s.to_string())))
                }
            }
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Count::Number(n) if *n == 0.0)
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Count::Number(n) => f.write_str(&format_number(*n)),
            Count::Text(s) => f.write_str(s),
        }
    }
}

/// Remaining / maximum uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uses {
    pub value: Option<Count>,
    pub max: Option<Count>,
}

impl Uses {
    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let max = first_some!(get(value, &["max"]), get(value, &["total"]), get(value, &["capacity"]));
        let current = first_some!(get(value, &["value"]), get(value, &["spent"]), get(value, &["remaining"]));
        Some(Uses { value: current.and_then(Count::from_value), max: max.and_then(Count::from_value) })
    }
}

/// One `(formula, type)` damage part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamagePart {
    pub formula: String,
    pub kind: TypeRef,
}

impl DamagePart {
    fn from_value(value: &Value) -> Option<Self> {
        let part = match value {
            Value::Array(pair) => DamagePart {
                formula: pair.first().and_then(scalar_text).unwrap_or_default(),
                kind: pair.get(1).map(TypeRef::from).unwrap_or_default(),
            },
            Value::Object(_) => DamagePart {
                formula: first_some!(text_at(value, &["formula"]), text_at(value, &["value"])).unwrap_or_default(),
                kind: first_some!(
                    get(value, &["type"]),
                    get(value, &["damageType"]),
                    get(value, &["damageTypes"]),
                    get(value, &["types"]),
                )
                .map(TypeRef::from)
                .unwrap_or_default(),
            },
            _ => return None,
        };
        (!part.formula.is_empty() || part.kind != TypeRef::Absent).then_some(part)
    }
}

/// Parts arrive as a list, as an object holding `parts`, or as a keyed map.
fn parse_parts(value: &Value) -> Vec<DamagePart> {
    match value {
        Value::Array(list) => list.iter().filter_map(DamagePart::from_value).collect(),
        Value::Object(map) => match map.get("parts") {
            Some(Value::Array(list)) => list.iter().filter_map(DamagePart::from_value).collect(),
            _ => map.values().filter_map(DamagePart::from_value).collect(),
        },
        _ => Vec::new(),
    }
}

/// A pre-formatted damage line from `labels.damages`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageLabel {
    pub formula: String,
    pub kind: TypeRef,
    /// `Some(false)` marks a secondary line that is not shown.
    pub first_damage: Option<bool>,
    /// Full text for plain-string entries such as `"2d6 fire"`.
    pub text: Option<String>,
}

impl DamageLabel {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => Some(DamageLabel {
                formula: text_at(value, &["formula"]).unwrap_or_default(),
                kind: first_some!(get(value, &["damageType"]), get(value, &["type"])).map(TypeRef::from).unwrap_or_default(),
                first_damage: value.get("firstDamage").and_then(Value::as_bool),
                text: None,
            }),
            Value::String(s) => {
                let text = s.trim();
                if text.is_empty() {
                    return None;
                }
                // The last word names the type: "1d8 healing", "2d6 fire".
                let (formula, kind) = match text.rsplit_once(char::is_whitespace) {
                    Some((formula, last)) => (formula.trim().to_string(), TypeRef::Text(last.to_string())),
                    None => (text.to_string(), TypeRef::Absent),
                };
                Some(DamageLabel { formula, kind, first_damage: None, text: Some(text.to_string()) })
            }
            _ => None,
        }
    }
}

/// Pre-localized display strings supplied by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labels {
    pub to_hit: Label,
    pub attack: Label,
    pub roll: Label,
    pub damage: Label,
    pub damages: Vec<DamageLabel>,
    pub damages_text: Label,
    pub dmg: Label,
    pub range: Label,
    pub target: Label,
    pub save: Option<String>,
    pub activation: String,
}

impl Labels {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Labels::default();
        };
        let label = |key: &str| value.get(key).map(Label::from).unwrap_or_default();

        let damages: Vec<DamageLabel> = match value.get("damages") {
            Some(Value::Array(list)) => list.iter().filter_map(DamageLabel::from_value).collect(),
            _ => Vec::new(),
        };
        let damages_text = if damages.is_empty() {
            label("damages")
        } else {
            let formulas: Vec<&str> = damages
                .iter()
                .filter(|d| d.first_damage != Some(false))
                .map(|d| d.text.as_deref().unwrap_or(&d.formula))
                .filter(|f| !f.is_empty())
                .collect();
            Label::Plain(formulas.join(", "))
        };

        Labels {
            to_hit: label("toHit"),
            attack: label("attack"),
            roll: label("roll"),
            damage: label("damage"),
            damages,
            damages_text,
            dmg: label("dmg"),
            range: label("range"),
            target: label("target"),
            save: value.get("save").and_then(scalar_text),
            activation: label("activation").normalize(),
        }
    }

    /// First non-empty of `toHit`, `attack`, `roll`.
    pub fn roll_text(&self) -> String {
        [&self.to_hit, &self.attack, &self.roll]
            .into_iter()
            .map(Label::normalize)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// First non-empty of `damage`, `damages`, `dmg`.
    pub fn damage_text(&self) -> String {
        [&self.damage, &self.damages_text, &self.dmg]
            .into_iter()
            .map(Label::normalize)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }
}

/// Saving-throw ability as stored: one key, or a set of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AbilityRef {
    #[default]
    Absent,
    Single(String),
    Many(Vec<String>),
}

impl AbilityRef {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if !s.trim().is_empty() => AbilityRef::Single(s.trim().to_string()),
            Value::Array(list) => {
                let keys: Vec<String> = list.iter().filter_map(scalar_text).collect();
                if keys.is_empty() { AbilityRef::Absent } else { AbilityRef::Many(keys) }
            }
            _ => AbilityRef::Absent,
        }
    }

    /// The ability when exactly one is named. Multi-ability saves yield `None`.
    pub fn single(&self) -> Option<&str> {
        match self {
            AbilityRef::Single(key) => Some(key.as_str()),
            AbilityRef::Many(keys) if keys.len() == 1 => Some(keys[0].as_str()),
            _ => None,
        }
    }
}

/// Saving-throw DC as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DcRef {
    #[default]
    Absent,
    Value(f64),
    /// Present but not a number.
    Unparseable,
}

impl DcRef {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => DcRef::Absent,
            Value::Number(n) => n.as_f64().map(DcRef::Value).unwrap_or(DcRef::Unparseable),
            Value::String(s) => s.trim().parse::<f64>().map(DcRef::Value).unwrap_or(DcRef::Unparseable),
            Value::Object(_) => get(value, &["value"]).map(DcRef::from_value).unwrap_or(DcRef::Unparseable),
            _ => DcRef::Unparseable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveData {
    pub ability: AbilityRef,
    pub dc: DcRef,
}

impl SaveData {
    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let ability = first_some!(
            get(value, &["ability"]),
            get(value, &["abil"]),
            get(value, &["attribute"]),
            get(value, &["stat"]),
        );
        let dc = first_some!(get(value, &["dc"]), get(value, &["value"]), get(value, &["DC"]));
        Some(SaveData {
            ability: ability.map(AbilityRef::from_value).unwrap_or_default(),
            dc: dc.map(DcRef::from_value).unwrap_or_default(),
        })
    }
}

/// Legacy `preparation` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preparation {
    pub mode: Option<String>,
    pub prepared: bool,
}

/// Spell-specific fields. Both the legacy `preparation` block and the newer
/// decomposed `method` / `prepared` fields are kept as found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellData {
    /// `None` when a level is present but not a number.
    pub level: Option<i64>,
    pub school: String,
    pub ritual: bool,
    pub method: Option<String>,
    pub prepared: Option<bool>,
    pub preparation: Option<Preparation>,
}

impl Default for SpellData {
    fn default() -> Self {
        SpellData { level: Some(0), school: String::new(), ritual: false, method: None, prepared: None, preparation: None }
    }
}

impl SpellData {
    fn from_value(system: &Value) -> Self {
        let level = match first_some!(get(system, &["level", "value"]), get(system, &["level"]), get(system, &["levels"])) {
            None => Some(0),
            Some(Value::Number(n)) => n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(_) => None,
        };

        let ritual_property = match get(system, &["properties"]) {
            Some(Value::Array(props)) => props.iter().any(|p| p.as_str() == Some("ritual")),
            Some(props @ Value::Object(_)) => truthy(props.get("ritual")),
            _ => false,
        };

        SpellData {
            level,
            school: text_at(system, &["school"]).unwrap_or_default(),
            ritual: truthy(system.get("ritual")) || ritual_property,
            method: get(system, &["method"]).map(|m| scalar_text(m).unwrap_or_default()),
            prepared: get(system, &["prepared"]).map(|p| truthy(Some(p))),
            preparation: get(system, &["preparation"]).map(|p| Preparation {
                mode: text_at(p, &["mode"]),
                prepared: truthy(p.get("prepared")),
            }),
        }
    }
}

// --- Records -----------------------------------------------------------------

/// Read access shared by items and activities, so formatters accept either.
pub trait Usable {
    fn save(&self) -> Option<&SaveData>;
    fn labels(&self) -> &Labels;
    fn damage_parts(&self) -> &[DamagePart];
}

/// A sub-action of an item (one attack mode, one casting mode...).
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    /// Activity type (`attack`, `save`, `spell`, `cast`...).
    pub kind: String,
    pub activation: Activation,
    pub uses: Option<Uses>,
    pub damage: Vec<DamagePart>,
    pub save: Option<SaveData>,
    pub labels: Labels,
    pub can_use: bool,
    pub caps: Capabilities,
}

impl Activity {
    /// Build from raw JSON. `key` is the map key when activities arrive keyed
    /// by id and is used when the entry carries no id of its own.
    pub fn from_value(value: &Value, key: Option<&str>) -> Self {
        Activity {
            id: first_some!(text_at(value, &["id"]), text_at(value, &["_id"]), key.map(str::to_string)).unwrap_or_default(),
            name: text_at(value, &["name"]),
            icon: first_some!(text_at(value, &["icon"]), text_at(value, &["img"])),
            kind: first_some!(text_at(value, &["type"]), text_at(value, &["kind"]), text_at(value, &["activityType"]))
                .unwrap_or_default(),
            activation: Activation::from_value(first_some!(
                get(value, &["activation"]),
                get(value, &["time"]),
                get(value, &["system", "activation"]),
            )),
            uses: get(value, &["uses"]).and_then(Uses::from_value),
            damage: first_some!(
                get(value, &["damage", "parts"]),
                get(value, &["damage", "damageParts"]),
                get(value, &["damageParts"]),
                get(value, &["system", "damage", "parts"]),
                get(value, &["system", "damageParts"]),
            )
            .map(parse_parts)
            .unwrap_or_default(),
            save: first_some!(get(value, &["save"]), get(value, &["system", "save"])).and_then(SaveData::from_value),
            labels: Labels::from_value(first_some!(
                get(value, &["labels"]),
                get(value, &["label"]),
                get(value, &["system", "labels"]),
            )),
            can_use: truthy(value.get("canUse")),
            caps: Capabilities::from_value(value),
        }
    }

    /// Activities that cast a spell from a non-spell item.
    pub fn is_spell_like(&self) -> bool {
        matches!(self.kind.as_str(), "spell" | "cast" | "spellcast")
    }
}

impl Usable for Activity {
    fn save(&self) -> Option<&SaveData> {
        self.save.as_ref()
    }

    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn damage_parts(&self) -> &[DamagePart] {
        &self.damage
    }
}

/// Activities arrive as a list, a collection exposing `contents`, or a map
/// keyed by id. Non-object entries are dropped.
fn ingest_activities(value: Option<&Value>) -> Vec<Activity> {
    let from_list = |list: &[Value]| -> Vec<Activity> {
        list.iter().filter(|v| v.is_object()).map(|v| Activity::from_value(v, None)).collect()
    };

    match value {
        Some(Value::Array(list)) => from_list(list),
        Some(Value::Object(map)) => match map.get("contents") {
            Some(Value::Array(list)) => from_list(list),
            _ => map.iter().filter(|(_, v)| v.is_object()).map(|(k, v)| Activity::from_value(v, Some(k))).collect(),
        },
        _ => Vec::new(),
    }
}

/// A piece of equipment, spell, feature... owned by an actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub img: String,
    /// Item type (`weapon`, `spell`, `feat`...).
    pub kind: String,
    pub activation: Activation,
    pub uses: Option<Uses>,
    pub damage: Vec<DamagePart>,
    pub save: Option<SaveData>,
    pub labels: Labels,
    pub description: String,
    pub activities: Vec<Activity>,
    pub spell: SpellData,
    /// Compendium/source identity, used to spot duplicate spells.
    pub source_id: Option<String>,
}

impl Item {
    pub fn from_value(value: &Value) -> Self {
        Item {
            id: first_some!(text_at(value, &["id"]), text_at(value, &["_id"])).unwrap_or_default(),
            name: text_at(value, &["name"]).unwrap_or_default(),
            img: first_some!(text_at(value, &["img"]), text_at(value, &["image"])).unwrap_or_default(),
            kind: text_at(value, &["type"]).unwrap_or_default(),
            activation: Activation::from_value(first_some!(
                get(value, &["system", "activation"]),
                get(value, &["activation"]),
            )),
            uses: get(value, &["system", "uses"]).and_then(Uses::from_value),
            damage: first_some!(get(value, &["damage", "parts"]), get(value, &["system", "damage", "parts"]))
                .map(parse_parts)
                .unwrap_or_default(),
            save: first_some!(get(value, &["system", "save"]), get(value, &["save"])).and_then(SaveData::from_value),
            labels: Labels::from_value(get(value, &["labels"])),
            description: get(value, &["system", "description", "value"])
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            activities: ingest_activities(get(value, &["system", "activities"])),
            spell: get(value, &["system"]).map(SpellData::from_value).unwrap_or_default(),
            source_id: first_some!(
                text_at(value, &["flags", "core", "sourceId"]),
                text_at(value, &["flags", "dnd5e", "sourceId"]),
                text_at(value, &["system", "sourceId"]),
                text_at(value, &["system", "identifier"]),
                text_at(value, &["system", "slug"]),
            ),
        }
    }
}

impl Usable for Item {
    fn save(&self) -> Option<&SaveData> {
        self.save.as_ref()
    }

    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn damage_parts(&self) -> &[DamagePart] {
        &self.damage
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Item::from_value(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyed_activities_keep_document_order_and_drop_non_objects() {
        let item = Item::from_value(&json!({
            "name": "Staff",
            "system": {"activities": {
                "zz1": {"name": "Strike"},
                "bad": 7,
                "aa2": {"_id": "explicit", "name": "Cast"},
            }}
        }));
        let ids: Vec<&str> = item.activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["zz1", "explicit"]);
    }

    #[test]
    fn activities_accept_list_and_contents_shapes() {
        let list = Item::from_value(&json!({"system": {"activities": [{"id": "a"}, {"id": "b"}]}}));
        assert_eq!(list.activities.len(), 2);

        let collection = Item::from_value(&json!({"system": {"activities": {"contents": [{"id": "c"}]}}}));
        assert_eq!(collection.activities[0].id, "c");

        let missing = Item::from_value(&json!({"system": {}}));
        assert!(missing.activities.is_empty());
    }

    #[test]
    fn malformed_items_still_ingest() {
        for raw in [json!(null), json!(42), json!("sword"), json!([1, 2]), json!({"system": "oops", "labels": 3})] {
            let item = Item::from_value(&raw);
            assert!(item.name.is_empty());
            assert!(item.activities.is_empty());
            assert_eq!(item.spell.level, Some(0));
        }
    }

    #[test]
    fn damage_parts_accept_pairs_and_objects() {
        let act = Activity::from_value(
            &json!({"damage": {"parts": [["1d6", "fire"], {"formula": "2", "types": ["cold"]}, 5]}}),
            None,
        );
        assert_eq!(act.damage.len(), 2);
        assert_eq!(act.damage[0].formula, "1d6");
        assert_eq!(act.damage[0].kind.raw_text(), Some("fire"));
        assert_eq!(act.damage[1].kind.raw_text(), Some("cold"));
    }

    #[test]
    fn save_fields_cover_nested_dc_and_ability_sets() {
        let save = SaveData::from_value(&json!({"ability": ["wis"], "dc": {"value": 14}})).unwrap();
        assert_eq!(save.ability.single(), Some("wis"));
        assert_eq!(save.dc, DcRef::Value(14.0));

        let multi = SaveData::from_value(&json!({"ability": ["str", "dex"], "dc": "hard"})).unwrap();
        assert_eq!(multi.ability.single(), None);
        assert_eq!(multi.dc, DcRef::Unparseable);
    }

    #[test]
    fn uses_fall_back_across_field_names() {
        let uses = Uses::from_value(&json!({"total": "3", "remaining": 1})).unwrap();
        assert_eq!(uses.max, Some(Count::Number(3.0)));
        assert_eq!(uses.value, Some(Count::Number(1.0)));

        let formula = Uses::from_value(&json!({"max": "@prof", "value": ""})).unwrap();
        assert_eq!(formula.max, Some(Count::Text("@prof".into())));
        assert_eq!(formula.value, None);
    }

    #[test]
    fn spell_data_reads_both_preparation_shapes() {
        let legacy = Item::from_value(&json!({"system": {"level": 1, "preparation": {"mode": "pact", "prepared": false}}}));
        assert_eq!(legacy.spell.method, None);
        assert_eq!(legacy.spell.preparation.as_ref().and_then(|p| p.mode.as_deref()), Some("pact"));

        let modern = Item::from_value(&json!({"system": {"level": {"value": 3}, "method": "spell", "prepared": 1, "properties": ["vocal", "ritual"]}}));
        assert_eq!(modern.spell.level, Some(3));
        assert_eq!(modern.spell.prepared, Some(true));
        assert!(modern.spell.ritual);
    }

    #[test]
    fn source_identity_prefers_core_flags() {
        let item = Item::from_value(&json!({
            "flags": {"core": {"sourceId": "Compendium.fireball"}},
            "system": {"identifier": "fireball"}
        }));
        assert_eq!(item.source_id.as_deref(), Some("Compendium.fireball"));
    }

    #[test]
    fn string_damage_labels_split_off_the_type_word() {
        let labels = Labels::from_value(Some(&json!({"damages": ["2d6 fire", {"formula": "1d4", "damageType": "cold", "firstDamage": false}]})));
        assert_eq!(labels.damages[0].formula, "2d6");
        assert_eq!(labels.damages[0].kind.raw_text(), Some("fire"));
        assert_eq!(labels.damages[1].first_damage, Some(false));
        assert_eq!(labels.damage_text(), "2d6 fire");
    }
}
