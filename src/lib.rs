use serde::Serialize;

#[macro_use]
mod macros;
mod activity;
mod api;
mod dialog;
mod dispatch;
mod engine;
mod error;
mod format;
mod host;
mod model;
mod normalize;
mod settings;

pub use activity::{
    UseTarget, activation_bucket, activity_bucket, damage_html, list_activities, primary_usable_activity, time_short,
    uses_text,
};
pub use api::{Context, apply_filter_dialog, parse_items, render_details};
pub use dialog::{Checkbox, DialogAction, FilterField, FilterForm, FormField};
pub use dispatch::{
    ActionHandler, Dispatch, RowAction, dispatch_activity_click, dispatch_row_click, find_activity, find_item,
};
pub use engine::{ActionEconomy, ActivityRow, BuildStats, Row, build_action_economy, category_for_item, should_include_spell};
pub use error::{ConfigError, EnrichError, StoreError};
pub use format::{ability_abbr, format_damage_row, format_damage_text, format_save_text};
pub use host::{AbilityEntry, Catalog, Enricher, Localizer, PassThrough, SystemConfig, TypeEntry, fallback_icon};
pub use model::{
    AbilityRef, Activation, Activity, Capabilities, Count, DamageLabel, DamagePart, DcRef, Item, Labels, Preparation,
    SaveData, SpellData, Usable, Uses,
};
pub use normalize::{Label, TypeRef, normalize_label, resolve_damage_key, resolve_damage_text};
pub use settings::{
    FILTER_CONFIG_VERSION, FilterConfig, JsonFileStore, MemoryStore, SETTING_KEY, SettingsStore, SpellFilter,
    read_filters, write_filters,
};

/// Placeholder shown for any empty display field.
pub const DASH: &str = "—";

// --- Classification types ----------------------------------------------------

/// When an item can be used within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EconomyBucket {
    Action,
    Bonus,
    Reaction,
}

impl EconomyBucket {
    pub const ALL: [EconomyBucket; 3] = [EconomyBucket::Action, EconomyBucket::Bonus, EconomyBucket::Reaction];

    /// Map a host activation type (`"action"`, `"bonus"`, `"reaction"`) to a bucket.
    pub fn from_activation(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "action" => Some(EconomyBucket::Action),
            "bonus" => Some(EconomyBucket::Bonus),
            "reaction" => Some(EconomyBucket::Reaction),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EconomyBucket::Action => "action",
            EconomyBucket::Bonus => "bonus",
            EconomyBucket::Reaction => "reaction",
        }
    }
}

/// Filterable item category, derived from the item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Weapons,
    Spells,
    Equipment,
    Consumables,
    Tools,
    Features,
    Other,
}

impl Category {
    /// Categories with a plain on/off switch, in dialog order. Spells have
    /// their own sub-filter instead.
    pub const TOGGLEABLE: [Category; 6] = [
        Category::Weapons,
        Category::Equipment,
        Category::Features,
        Category::Consumables,
        Category::Tools,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Weapons => "weapons",
            Category::Spells => "spells",
            Category::Equipment => "equipment",
            Category::Consumables => "consumables",
            Category::Tools => "tools",
            Category::Features => "features",
            Category::Other => "other",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "weapons" => Some(Category::Weapons),
            "spells" => Some(Category::Spells),
            "equipment" => Some(Category::Equipment),
            "consumables" => Some(Category::Consumables),
            "tools" => Some(Category::Tools),
            "features" => Some(Category::Features),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Localization reference for the dialog label.
    pub fn label_key(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        let capitalized: String = chars.next().map(|c| c.to_ascii_uppercase()).into_iter().chain(chars).collect();
        format!("ACTION_SHEET.Filter.Categories.{capitalized}")
    }
}
