//! Host collaborators: type registries, localization and enrichment.
//!
//! The tabletop host owns all of these. The crate only reads them, so they
//! are plain data (`SystemConfig`, `Catalog`) or small traits the host
//! implements (`Localizer`, `Enricher`). Built-in 5e defaults exist for the
//! CLI and for hosts that do not ship their own registries.

use crate::error::{ConfigError, EnrichError};
use crate::model::Item;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Icon path used when a registered type carries no icon of its own.
pub fn fallback_icon(key: &str) -> String {
    format!("systems/dnd5e/icons/svg/damage/{key}.svg")
}

// --- Registries --------------------------------------------------------------

/// A damage or healing type entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Localization reference for the display label.
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// An ability score entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

/// Keyed registries published by the game system.
///
/// Maps keep document order: fuzzy label matching breaks ties by encounter
/// order, damage types before healing types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    #[serde(default)]
    pub damage_types: IndexMap<String, TypeEntry>,
    #[serde(default)]
    pub healing_types: IndexMap<String, TypeEntry>,
    #[serde(default)]
    pub abilities: IndexMap<String, AbilityEntry>,
}

static BUILTIN_SYSTEM: Lazy<SystemConfig> = Lazy::new(|| {
    const DAMAGE: &[(&str, &str)] = &[
        ("acid", "DND5E.DamageAcid"),
        ("bludgeoning", "DND5E.DamageBludgeoning"),
        ("cold", "DND5E.DamageCold"),
        ("fire", "DND5E.DamageFire"),
        ("force", "DND5E.DamageForce"),
        ("lightning", "DND5E.DamageLightning"),
        ("necrotic", "DND5E.DamageNecrotic"),
        ("piercing", "DND5E.DamagePiercing"),
        ("poison", "DND5E.DamagePoison"),
        ("psychic", "DND5E.DamagePsychic"),
        ("radiant", "DND5E.DamageRadiant"),
        ("slashing", "DND5E.DamageSlashing"),
        ("thunder", "DND5E.DamageThunder"),
    ];
    const HEALING: &[(&str, &str)] = &[("healing", "DND5E.Healing"), ("temphp", "DND5E.HealingTemp")];
    const ABILITIES: &[(&str, &str)] = &[
        ("str", "Str"),
        ("dex", "Dex"),
        ("con", "Con"),
        ("int", "Int"),
        ("wis", "Wis"),
        ("cha", "Cha"),
    ];

    let entry = |label: &str| TypeEntry { label: label.to_string(), icon: None };

    SystemConfig {
        damage_types: DAMAGE.iter().map(|(k, l)| (k.to_string(), entry(l))).collect(),
        healing_types: HEALING.iter().map(|(k, l)| (k.to_string(), entry(l))).collect(),
        abilities: ABILITIES
            .iter()
            .map(|(k, camel)| {
                let entry = AbilityEntry {
                    label: format!("DND5E.Ability{camel}"),
                    abbreviation: Some(format!("DND5E.Ability{camel}Abbr")),
                };
                (k.to_string(), entry)
            })
            .collect(),
    }
});

impl SystemConfig {
    /// The 5e registries with their stock localization references.
    pub fn builtin() -> &'static SystemConfig {
        &BUILTIN_SYSTEM
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse { what: "system config", source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            what: "system config",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Look a canonical key up in damage types, then healing types.
    pub fn type_entry(&self, key: &str) -> Option<&TypeEntry> {
        self.damage_types.get(key).or_else(|| self.healing_types.get(key))
    }

    /// Every damage and healing type, damage types first.
    pub(crate) fn type_entries(&self) -> impl Iterator<Item = (&str, &TypeEntry)> {
        self.damage_types.iter().chain(self.healing_types.iter()).map(|(k, v)| (k.as_str(), v))
    }
}

// --- Localization ------------------------------------------------------------

/// Resolves label references for the active locale.
pub trait Localizer {
    /// Returns `key` unchanged when it has no translation.
    fn localize(&self, key: &str) -> String;

    /// BCP-47-ish language tag of the active locale.
    fn lang(&self) -> &str {
        "en"
    }
}

/// A flat key → string translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub entries: HashMap<String, String>,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog { lang: default_lang(), entries: HashMap::new() }
    }
}

static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    const EN: &[(&str, &str)] = &[
        ("DND5E.DamageAcid", "Acid"),
        ("DND5E.DamageBludgeoning", "Bludgeoning"),
        ("DND5E.DamageCold", "Cold"),
        ("DND5E.DamageFire", "Fire"),
        ("DND5E.DamageForce", "Force"),
        ("DND5E.DamageLightning", "Lightning"),
        ("DND5E.DamageNecrotic", "Necrotic"),
        ("DND5E.DamagePiercing", "Piercing"),
        ("DND5E.DamagePoison", "Poison"),
        ("DND5E.DamagePsychic", "Psychic"),
        ("DND5E.DamageRadiant", "Radiant"),
        ("DND5E.DamageSlashing", "Slashing"),
        ("DND5E.DamageThunder", "Thunder"),
        ("DND5E.Healing", "Healing"),
        ("DND5E.HealingTemp", "Temporary HP"),
        ("DND5E.AbilityStr", "Strength"),
        ("DND5E.AbilityStrAbbr", "str"),
        ("DND5E.AbilityDex", "Dexterity"),
        ("DND5E.AbilityDexAbbr", "dex"),
        ("DND5E.AbilityCon", "Constitution"),
        ("DND5E.AbilityConAbbr", "con"),
        ("DND5E.AbilityInt", "Intelligence"),
        ("DND5E.AbilityIntAbbr", "int"),
        ("DND5E.AbilityWis", "Wisdom"),
        ("DND5E.AbilityWisAbbr", "wis"),
        ("DND5E.AbilityCha", "Charisma"),
        ("DND5E.AbilityChaAbbr", "cha"),
        ("ACTION_SHEET.Title", "Actions"),
        ("ACTION_SHEET.Action", "Action"),
        ("ACTION_SHEET.BonusAction", "Bonus Action"),
        ("ACTION_SHEET.Reaction", "Reaction"),
        ("ACTION_SHEET.Empty", "Nothing to show"),
        ("ACTION_SHEET.RollAttack", "Roll Attack"),
        ("ACTION_SHEET.TimeShort.Minute", "min"),
        ("ACTION_SHEET.TimeShort.Hour", "hr"),
        ("ACTION_SHEET.TimeShort.Day", "day"),
        ("ACTION_SHEET.FilterTitle", "Action Sheet Filters"),
        ("ACTION_SHEET.FilterPrompt", "Choose which item categories appear in the action table."),
        ("ACTION_SHEET.FilterSave", "Save"),
        ("ACTION_SHEET.FilterReset", "Reset"),
        ("ACTION_SHEET.Close", "Close"),
        ("ACTION_SHEET.Filter.Categories.Weapons", "Weapons"),
        ("ACTION_SHEET.Filter.Categories.Spells", "Spells"),
        ("ACTION_SHEET.Filter.Categories.Equipment", "Equipment"),
        ("ACTION_SHEET.Filter.Categories.Consumables", "Consumables"),
        ("ACTION_SHEET.Filter.Categories.Tools", "Tools"),
        ("ACTION_SHEET.Filter.Categories.Features", "Features"),
        ("ACTION_SHEET.Filter.Categories.Other", "Other"),
        ("ACTION_SHEET.Filter.Spells.All", "All Spells"),
        ("ACTION_SHEET.Filter.Spells.Prepared", "Prepared"),
        ("ACTION_SHEET.Filter.Spells.Ritual", "Ritual"),
        ("ACTION_SHEET.Filter.Spells.Cantrips", "Cantrips"),
    ];

    Catalog { lang: default_lang(), entries: EN.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect() }
});

impl Catalog {
    /// English strings for the built-in registries and the filter dialog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse { what: "catalog", source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            what: "catalog",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Layer `other` on top of `self`; `other` wins on conflicts and sets the language.
    pub fn merged(mut self, other: Catalog) -> Catalog {
        self.lang = other.lang;
        self.entries.extend(other.entries);
        self
    }
}

impl Localizer for Catalog {
    fn localize(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
    }

    fn lang(&self) -> &str {
        &self.lang
    }
}

// --- Enrichment --------------------------------------------------------------

/// Turns a raw item description into rich display markup (links, inline rolls).
pub trait Enricher {
    fn enrich(&self, raw: &str, item: &Item) -> Result<String, EnrichError>;
}

/// Returns descriptions unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Enricher for PassThrough {
    fn enrich(&self, raw: &str, _item: &Item) -> Result<String, EnrichError> {
        Ok(raw.to_string())
    }
}
