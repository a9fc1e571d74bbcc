//! Label and damage-type normalization.
//!
//! Two field families show up in many shapes in host data:
//!
//! - display labels (`labels.range`, `labels.target`...): strings, numbers,
//!   lists, `{label}` / `{text}` objects or `{parts: [[formula, type]]}`
//!   records. They are captured once as a [`Label`] and rendered with
//!   [`Label::normalize`].
//! - damage types: a key, a list or set of keys, a structured record, or
//!   free localized text. They are captured as a [`TypeRef`] and resolved to a
//!   canonical registry key with [`resolve_damage_key`].

use crate::api::Context;
use once_cell::sync::Lazy;
use serde_json::{Number, Value};
use std::collections::HashMap;
use tracing::trace;

/// Render a float the way the host prints numbers: integral values without
/// a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_number).unwrap_or_default()
    }
}

fn non_null<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    value.get(key).filter(|v| !v.is_null())
}

// --- Labels ------------------------------------------------------------------

/// A display label as the host stored it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Label {
    /// Absent, null, or a shape with no text (booleans).
    #[default]
    Empty,
    Plain(String),
    Number(Number),
    List(Vec<Label>),
    /// `{label: ".."}` or `{text: ".."}`.
    Field(String),
    /// `{parts: [[formula, type], ...]}`.
    Parts(Vec<(String, String)>),
    /// Any other object; rendered as compact JSON.
    Opaque(Value),
}

impl From<&Value> for Label {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null | Value::Bool(_) => Label::Empty,
            Value::String(s) => Label::Plain(s.clone()),
            Value::Number(n) => Label::Number(n.clone()),
            Value::Array(items) => Label::List(items.iter().map(Label::from).collect()),
            Value::Object(map) => {
                if let Some(Value::String(s)) = map.get("label") {
                    return Label::Field(s.clone());
                }
                if let Some(Value::String(s)) = map.get("text") {
                    return Label::Field(s.clone());
                }
                if let Some(Value::Array(parts)) = map.get("parts") {
                    let part_text = |v: Option<&Value>| match v {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Number(n)) => number_text(n),
                        _ => String::new(),
                    };
                    let pairs = parts
                        .iter()
                        .map(|p| match p {
                            Value::Array(pair) => (part_text(pair.first()), part_text(pair.get(1))),
                            _ => (String::new(), String::new()),
                        })
                        .collect();
                    return Label::Parts(pairs);
                }
                Label::Opaque(value.clone())
            }
        }
    }
}

impl Label {
    /// Canonical display string. Total; idempotent on plain strings.
    pub fn normalize(&self) -> String {
        match self {
            Label::Empty => String::new(),
            Label::Plain(s) | Label::Field(s) => s.trim().to_string(),
            Label::Number(n) => number_text(n),
            Label::List(items) => {
                items.iter().map(Label::normalize).filter(|s| !s.is_empty()).collect::<Vec<_>>().join(", ")
            }
            Label::Parts(pairs) => {
                let formulas: Vec<&str> = pairs.iter().map(|(f, _)| f.as_str()).filter(|f| !f.is_empty()).collect();
                let mut types: Vec<&str> = Vec::new();
                for (_, t) in pairs {
                    if !t.is_empty() && !types.contains(&t.as_str()) {
                        types.push(t);
                    }
                }
                let formula = formulas.join(" + ");
                if types.is_empty() { formula } else { format!("{formula} ({})", types.join(", ")) }
            }
            Label::Opaque(v) => serde_json::to_string(v).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalize().is_empty()
    }
}

/// Normalize a raw JSON label in one step.
pub fn normalize_label(value: &Value) -> String {
    Label::from(value).normalize()
}

// --- Damage types ------------------------------------------------------------

/// A damage-type reference as the host stored it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeRef {
    #[default]
    Absent,
    /// A key or free localized text.
    Text(String),
    /// A list or set of keys; the first one counts.
    Many(Vec<String>),
    /// A record carrying the type under `type`, `value`, `damageType` or `types`.
    Structured(Box<TypeRef>),
}

impl From<&Value> for TypeRef {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) if !s.trim().is_empty() => TypeRef::Text(s.trim().to_string()),
            Value::Number(n) => TypeRef::Text(number_text(n)),
            Value::Array(items) => {
                let keys: Vec<String> = items
                    .iter()
                    .filter_map(|v| match TypeRef::from(v) {
                        TypeRef::Text(s) => Some(s),
                        _ => None,
                    })
                    .collect();
                if keys.is_empty() { TypeRef::Absent } else { TypeRef::Many(keys) }
            }
            Value::Object(_) => first_some!(
                non_null(value, "type"),
                non_null(value, "value"),
                non_null(value, "damageType"),
                non_null(value, "types"),
            )
            .map(|inner| TypeRef::Structured(Box::new(TypeRef::from(inner))))
            .unwrap_or_default(),
            _ => TypeRef::Absent,
        }
    }
}

impl TypeRef {
    /// The single raw string this reference stands for, before resolution.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            TypeRef::Absent => None,
            TypeRef::Text(s) => Some(s.as_str()),
            TypeRef::Many(keys) => keys.first().map(String::as_str),
            TypeRef::Structured(inner) => inner.raw_text(),
        }
    }
}

/// Alternate terms the registries do not carry as labels.
static DAMAGE_SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bludgeon", "bludgeoning"),
        ("pierce", "piercing"),
        ("slash", "slashing"),
        ("ezme", "bludgeoning"),
        ("delme", "piercing"),
        ("kesme", "slashing"),
        ("iyileştir", "healing"),
    ])
});

/// A registry entry's localized label, lowercased for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabelCandidate {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchMode {
    /// The label must occur inside the needle.
    Needle,
    /// Either string may contain the other.
    Either,
}

/// Localized labels of every damage then healing type, in registry order,
/// plus the Turkish healing verb stem.
pub(crate) fn label_candidates(ctx: &Context<'_>) -> Vec<LabelCandidate> {
    let mut out: Vec<LabelCandidate> = ctx
        .system
        .type_entries()
        .filter(|(_, entry)| !entry.label.is_empty())
        .map(|(key, entry)| LabelCandidate {
            key: key.to_string(),
            label: ctx.localize(&entry.label).trim().to_lowercase(),
        })
        .filter(|c| !c.label.is_empty())
        .collect();
    out.push(LabelCandidate { key: "healing".to_string(), label: "iyileştir".to_string() });
    out
}

/// Longest candidate label matching `needle` (already lowercased). Earlier
/// candidates win ties.
pub(crate) fn best_label_match<'c>(
    candidates: &'c [LabelCandidate],
    needle: &str,
    mode: MatchMode,
) -> Option<&'c LabelCandidate> {
    if needle.is_empty() {
        return None;
    }
    let mut best: Option<&LabelCandidate> = None;
    for cand in candidates {
        let hit = match mode {
            MatchMode::Needle => needle.contains(&cand.label),
            MatchMode::Either => needle.contains(&cand.label) || cand.label.contains(needle),
        };
        if hit && best.is_none_or(|b| cand.label.chars().count() > b.label.chars().count()) {
            best = Some(cand);
        }
    }
    best
}

/// Resolve free text to a canonical damage/healing key.
///
/// Order: exact registry key, longest matching localized label, synonym
/// table. `None` when nothing matches.
pub fn resolve_damage_text(ctx: &Context<'_>, text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if ctx.system.type_entry(trimmed).is_some() {
        return Some(trimmed.to_string());
    }

    let needle = trimmed.to_lowercase();
    if ctx.system.type_entry(&needle).is_some() {
        return Some(needle);
    }

    let candidates = label_candidates(ctx);
    if let Some(found) = best_label_match(&candidates, &needle, MatchMode::Either) {
        trace!(text = trimmed, key = %found.key, label = %found.label, "damage type matched by label");
        return Some(found.key.clone());
    }

    let synonym = DAMAGE_SYNONYMS.get(needle.as_str()).map(|key| key.to_string());
    if synonym.is_none() {
        trace!(text = trimmed, "damage type unresolved");
    }
    synonym
}

/// Resolve any stored damage-type shape to a canonical key.
pub fn resolve_damage_key(ctx: &Context<'_>, raw: &TypeRef) -> Option<String> {
    raw.raw_text().and_then(|text| resolve_damage_text(ctx, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Catalog, SystemConfig};
    use serde_json::json;

    #[test]
    fn normalize_label_is_total() {
        let cases = [
            (json!(null), ""),
            (json!("  Melee  "), "Melee"),
            (json!(30), "30"),
            (json!(1.5), "1.5"),
            (json!(true), ""),
            (json!(["5 ft", "", null, 60]), "5 ft, 60"),
            (json!({"label": " Self "}), "Self"),
            (json!({"text": "1 creature"}), "1 creature"),
            (
                json!({"parts": [["1d8", "slashing"], ["1d6", "fire"], ["2", "slashing"]]}),
                "1d8 + 1d6 + 2 (slashing, fire)",
            ),
            (json!({"parts": [["1d4"], "junk"]}), "1d4"),
            (json!({"units": "ft", "value": 5}), r#"{"units":"ft","value":5}"#),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_label(&raw), expected, "input: {raw}");
        }
    }

    #[test]
    fn normalize_label_is_idempotent_on_strings() {
        let once = normalize_label(&json!("  2d6 fire "));
        assert_eq!(normalize_label(&Value::String(once.clone())), once);
    }

    #[test]
    fn type_refs_take_first_and_follow_structured_priority() {
        assert_eq!(TypeRef::from(&json!(["cold", "fire"])).raw_text(), Some("cold"));
        assert_eq!(TypeRef::from(&json!({"value": "acid", "damageType": "fire"})).raw_text(), Some("acid"));
        assert_eq!(TypeRef::from(&json!({"types": ["thunder"]})).raw_text(), Some("thunder"));
        assert_eq!(TypeRef::from(&json!({"type": null, "damageType": "force"})).raw_text(), Some("force"));
        assert_eq!(TypeRef::from(&json!({})), TypeRef::Absent);
        assert_eq!(TypeRef::from(&json!("  ")), TypeRef::Absent);
    }

    #[test]
    fn damage_keys_resolve_by_key_label_and_synonym() {
        let ctx = Context::builtin();
        assert_eq!(resolve_damage_text(&ctx, "fire").as_deref(), Some("fire"));
        assert_eq!(resolve_damage_text(&ctx, "FIRE").as_deref(), Some("fire"));
        assert_eq!(resolve_damage_text(&ctx, "Temporary HP").as_deref(), Some("temphp"));
        assert_eq!(resolve_damage_text(&ctx, "2 slashing damage").as_deref(), Some("slashing"));
        assert_eq!(resolve_damage_text(&ctx, "kesme").as_deref(), Some("slashing"));
        assert_eq!(resolve_damage_text(&ctx, "iyileştirme").as_deref(), Some("healing"));
        assert_eq!(resolve_damage_text(&ctx, "banana"), None);
        assert_eq!(resolve_damage_text(&ctx, ""), None);
    }

    #[test]
    fn longest_label_wins_regardless_of_order() {
        let system = SystemConfig::from_json(
            r#"{"damageTypes": {"a": {"label": "Fire"}, "b": {"label": "Holy Fire"}, "c": {"label": "Fire"}}}"#,
        )
        .unwrap();
        let catalog = Catalog::default();
        let ctx = Context::new(&system, &catalog);

        assert_eq!(resolve_damage_text(&ctx, "3d6 holy fire").as_deref(), Some("b"));
        // Equal length: first encountered.
        assert_eq!(resolve_damage_text(&ctx, "1d4 fire").as_deref(), Some("a"));
    }

    #[test]
    fn localized_labels_drive_matching() {
        let catalog = Catalog::builtin().clone().merged(
            Catalog::from_json(r#"{"lang": "tr", "entries": {"DND5E.DamageFire": "Ateş"}}"#).unwrap(),
        );
        let ctx = Context::new(SystemConfig::builtin(), &catalog);
        assert_eq!(resolve_damage_key(&ctx, &TypeRef::Text("2d6 ateş".into())).as_deref(), Some("fire"));
        assert_eq!(resolve_damage_key(&ctx, &TypeRef::Absent), None);
    }

    #[test]
    fn type_lists_resolve_through_their_first_entry() {
        let ctx = Context::builtin();
        let list = TypeRef::from(&json!(["Fire", "cold"]));
        assert_eq!(list, TypeRef::Many(vec!["Fire".to_string(), "cold".to_string()]));
        assert_eq!(resolve_damage_key(&ctx, &list).as_deref(), Some("fire"));

        let nested = TypeRef::from(&json!({"types": [null, 3, "thunder"]}));
        assert_eq!(resolve_damage_key(&ctx, &nested), None);
        assert_eq!(nested.raw_text(), Some("3"));
    }
}
