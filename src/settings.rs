//! Persisted filter settings.
//!
//! One record, stored under [`SETTING_KEY`], decides which item categories
//! show up in the action table and how spells are narrowed down. The record
//! is versioned; every read goes through [`FilterConfig::migrate`] so older
//! shapes (the boolean-only spell filter, missing keys) come back complete.

use crate::Category;
use crate::error::StoreError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the persisted settings record.
pub const SETTING_KEY: &str = "aeFilters";

/// Current shape of [`FilterConfig`].
pub const FILTER_CONFIG_VERSION: u32 = 2;

// --- Config record -----------------------------------------------------------

/// Spell sub-filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpellFilter {
    pub all: bool,
    pub prepared: bool,
    pub ritual: bool,
    pub cantrips: bool,
}

impl Default for SpellFilter {
    fn default() -> Self {
        SpellFilter { all: false, prepared: true, ritual: false, cantrips: false }
    }
}

impl SpellFilter {
    /// `all` wins: when it is set the narrower flags are cleared.
    pub fn exclusive(self) -> Self {
        if self.all {
            SpellFilter { all: true, prepared: false, ritual: false, cantrips: false }
        } else {
            self
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        let flag = |v: &Value, key: &str, default: bool| v.get(key).and_then(Value::as_bool).unwrap_or(default);
        match value {
            // Legacy shape: one switch for every spell.
            Some(Value::Bool(all)) => SpellFilter { all: *all, prepared: false, ritual: false, cantrips: false },
            Some(v @ Value::Object(_)) => SpellFilter {
                all: flag(v, "all", false),
                prepared: flag(v, "prepared", true),
                ritual: flag(v, "ritual", false),
                cantrips: flag(v, "cantrips", false),
            },
            _ => SpellFilter::default(),
        }
    }
}

/// Which item categories appear in the action table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    pub version: u32,
    pub weapons: bool,
    pub equipment: bool,
    pub features: bool,
    pub consumables: bool,
    pub tools: bool,
    pub other: bool,
    pub spells: SpellFilter,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            version: FILTER_CONFIG_VERSION,
            weapons: true,
            equipment: true,
            features: true,
            consumables: true,
            tools: true,
            other: true,
            spells: SpellFilter::default(),
        }
    }
}

impl FilterConfig {
    /// Read any stored shape into the current one. Missing categories read as
    /// shown; anything that is not an object yields the defaults.
    pub fn migrate(value: &Value) -> Self {
        if !value.is_object() {
            return FilterConfig::default();
        }
        let shown = |key: &str| value.get(key).and_then(Value::as_bool).unwrap_or(true);

        FilterConfig {
            version: FILTER_CONFIG_VERSION,
            weapons: shown("weapons"),
            equipment: shown("equipment"),
            features: shown("features"),
            consumables: shown("consumables"),
            tools: shown("tools"),
            other: shown("other"),
            spells: SpellFilter::from_value(value.get("spells")),
        }
    }

    fn category_mut(&mut self, category: Category) -> Option<&mut bool> {
        match category {
            Category::Weapons => Some(&mut self.weapons),
            Category::Equipment => Some(&mut self.equipment),
            Category::Features => Some(&mut self.features),
            Category::Consumables => Some(&mut self.consumables),
            Category::Tools => Some(&mut self.tools),
            Category::Other => Some(&mut self.other),
            Category::Spells => None,
        }
    }

    /// Whether rows of `category` are shown. Spells always pass here; they are
    /// narrowed by [`SpellFilter`] instead.
    pub fn shows(&self, category: Category) -> bool {
        match category {
            Category::Weapons => self.weapons,
            Category::Equipment => self.equipment,
            Category::Features => self.features,
            Category::Consumables => self.consumables,
            Category::Tools => self.tools,
            Category::Other => self.other,
            Category::Spells => true,
        }
    }

    /// Toggle a non-spell category. Returns `false` for [`Category::Spells`].
    pub fn set_category(&mut self, category: Category, shown: bool) -> bool {
        match self.category_mut(category) {
            Some(flag) => {
                *flag = shown;
                true
            }
            None => false,
        }
    }
}

impl<'de> Deserialize<'de> for FilterConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| FilterConfig::migrate(&v))
    }
}

// --- Stores ------------------------------------------------------------------

/// Key/value storage for settings records, owned by the host.
pub trait SettingsStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Settings held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings kept in one JSON file, an object keyed by setting name.
///
/// A missing file reads as empty. Saving rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Option<Value>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text).map(Some).map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_document()?.and_then(|doc| doc.get(key).cloned()))
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut doc = match self.read_document()? {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        doc.insert(key.to_string(), value);

        let text = serde_json::to_string_pretty(&Value::Object(doc))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        }
        std::fs::write(&self.path, text).map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}

/// Read the filter record, migrated. Defaults when nothing is stored.
pub fn read_filters(store: &dyn SettingsStore) -> Result<FilterConfig, StoreError> {
    Ok(store.load(SETTING_KEY)?.map(|v| FilterConfig::migrate(&v)).unwrap_or_default())
}

/// Replace the stored filter record.
pub fn write_filters(store: &mut dyn SettingsStore, config: &FilterConfig) -> Result<(), StoreError> {
    let value = serde_json::to_value(config)?;
    store.save(SETTING_KEY, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_show_everything_and_prepared_spells() {
        let cfg = FilterConfig::default();
        assert!(Category::TOGGLEABLE.iter().all(|c| cfg.shows(*c)));
        assert_eq!(cfg.spells, SpellFilter { all: false, prepared: true, ritual: false, cantrips: false });
        assert_eq!(cfg.version, FILTER_CONFIG_VERSION);
    }

    #[test]
    fn legacy_boolean_spell_filter_migrates() {
        let on = FilterConfig::migrate(&json!({"weapons": false, "spells": true}));
        assert!(!on.weapons);
        assert!(on.tools);
        assert_eq!(on.spells, SpellFilter { all: true, prepared: false, ritual: false, cantrips: false });

        let off = FilterConfig::migrate(&json!({"spells": false}));
        assert_eq!(off.spells, SpellFilter { all: false, prepared: false, ritual: false, cantrips: false });
    }

    #[test]
    fn missing_keys_read_as_shown() {
        let cfg = FilterConfig::migrate(&json!({"spells": {"ritual": true}}));
        assert!(cfg.other && cfg.features);
        assert_eq!(cfg.spells, SpellFilter { all: false, prepared: true, ritual: true, cantrips: false });

        assert_eq!(FilterConfig::migrate(&json!("garbage")), FilterConfig::default());
    }

    #[test]
    fn deserialize_goes_through_migration() {
        let cfg: FilterConfig = serde_json::from_str(r#"{"equipment": false, "spells": false}"#).unwrap();
        assert!(!cfg.equipment);
        assert!(!cfg.spells.prepared);
        assert_eq!(cfg.version, FILTER_CONFIG_VERSION);
    }

    #[test]
    fn exclusivity_favours_all() {
        let both = SpellFilter { all: true, prepared: true, ritual: true, cantrips: true };
        assert_eq!(both.exclusive(), SpellFilter { all: true, prepared: false, ritual: false, cantrips: false });
        let some = SpellFilter { all: false, prepared: true, ritual: false, cantrips: true };
        assert_eq!(some.exclusive(), some);
    }

    #[test]
    fn spells_are_not_a_toggle() {
        let mut cfg = FilterConfig::default();
        assert!(!cfg.set_category(Category::Spells, false));
        assert!(cfg.set_category(Category::Tools, false));
        assert!(!cfg.shows(Category::Tools));
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(read_filters(&store).unwrap(), FilterConfig::default());

        let cfg = FilterConfig { other: false, ..FilterConfig::default() };
        write_filters(&mut store, &cfg).unwrap();
        assert_eq!(read_filters(&store).unwrap(), cfg);
        assert_eq!(store.load(SETTING_KEY).unwrap().unwrap()["version"], json!(FILTER_CONFIG_VERSION));
    }

    #[test]
    fn file_store_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        let spells = SpellFilter { all: false, prepared: false, ritual: true, cantrips: true };
        let cfg = FilterConfig { spells, ..FilterConfig::default() };
        write_filters(&mut store, &cfg).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(read_filters(&reopened).unwrap(), cfg);
        assert_eq!(reopened.load("theme").unwrap(), Some(json!("dark")));
    }

    #[test]
    fn file_store_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileStore::new(dir.path().join("none.json"));
        assert_eq!(missing.load(SETTING_KEY).unwrap(), None);

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let broken = JsonFileStore::new(&path);
        assert!(matches!(broken.load(SETTING_KEY), Err(StoreError::Parse { .. })));
    }
}
