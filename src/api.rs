use crate::dialog::{DialogAction, FilterForm};
use crate::engine::{self, ActionEconomy};
use crate::error::{ConfigError, StoreError};
use crate::host::{Catalog, Enricher, Localizer, PassThrough, SystemConfig};
use crate::model::Item;
use crate::settings::{FilterConfig, SettingsStore, read_filters, write_filters};
use serde_json::Value;
use tracing::warn;

static PASS_THROUGH: PassThrough = PassThrough;

/// Host collaborators for one render.
///
/// Everything is borrowed; the host owns registries, translations and the
/// enricher. Cheap to copy.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Damage, healing and ability registries.
    pub system: &'a SystemConfig,
    /// Active-locale translations.
    pub i18n: &'a dyn Localizer,
    /// Description enricher. Defaults to [`PassThrough`].
    pub enricher: &'a dyn Enricher,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("damage_types", &self.system.damage_types.len())
            .field("healing_types", &self.system.healing_types.len())
            .field("abilities", &self.system.abilities.len())
            .field("lang", &self.i18n.lang())
            .finish_non_exhaustive()
    }
}

impl Context<'static> {
    /// Built-in 5e registries with English strings.
    pub fn builtin() -> Self {
        Context::new(SystemConfig::builtin(), Catalog::builtin())
    }
}

impl<'a> Context<'a> {
    pub fn new(system: &'a SystemConfig, i18n: &'a dyn Localizer) -> Self {
        Context { system, i18n, enricher: &PASS_THROUGH }
    }

    pub fn with_enricher<'b>(self, enricher: &'b dyn Enricher) -> Context<'b>
    where
        'a: 'b,
    {
        Context { system: self.system, i18n: self.i18n, enricher }
    }

    pub fn localize(&self, key: &str) -> String {
        self.i18n.localize(key)
    }

    /// Like [`localize`](Self::localize), but `fallback` when the catalog has
    /// no entry.
    pub(crate) fn localize_or(&self, key: &str, fallback: &str) -> String {
        let text = self.i18n.localize(key);
        if text.is_empty() || text == key { fallback.to_string() } else { text }
    }

    pub fn lang(&self) -> &str {
        self.i18n.lang()
    }
}

/// Parse exported actor items: a JSON list, or an object with an `items`
/// list. Individual items never fail to load.
///
/// # Example
/// ```
/// let items = sheetwright::parse_items(r#"{"items": [{"name": "Dagger", "type": "weapon"}]}"#).unwrap();
/// assert_eq!(items[0].name, "Dagger");
/// ```
pub fn parse_items(text: &str) -> Result<Vec<Item>, ConfigError> {
    let value: Value = serde_json::from_str(text).map_err(|source| ConfigError::Parse { what: "items", source })?;

    let list = match &value {
        Value::Array(list) => Some(list),
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(list)) => Some(list),
            _ => None,
        },
        _ => None,
    };
    match list {
        Some(list) => Ok(list.iter().map(Item::from_value).collect()),
        None => {
            warn!("items JSON is neither a list nor an object with an `items` list");
            Ok(Vec::new())
        }
    }
}

/// Pre-render hook: read the stored filters and build the action economy.
///
/// A failing settings store does not stop the render; the default filters
/// are used and the failure is logged.
pub fn render_details(ctx: &Context<'_>, items: &[Item], store: &dyn SettingsStore) -> ActionEconomy {
    let filters = match read_filters(store) {
        Ok(filters) => filters,
        Err(err) => {
            warn!(error = %err, "filter settings unavailable, using defaults");
            FilterConfig::default()
        }
    };
    engine::build_action_economy(ctx, items, &filters)
}

/// Dialog hook: persist the outcome of the filter dialog.
///
/// Returns the config that was written (the host re-renders open sheets),
/// or `None` when the dialog was closed without saving.
pub fn apply_filter_dialog(
    store: &mut dyn SettingsStore,
    form: &FilterForm,
    action: DialogAction,
) -> Result<Option<FilterConfig>, StoreError> {
    match form.finish(action) {
        Some(config) => {
            write_filters(store, &config)?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}
