//! Filter dialog form state.
//!
//! The host draws the dialog; this module owns what the checkboxes mean. It
//! keeps the spell checkboxes mutually consistent while the user clicks
//! ([`FilterForm::set`]) and turns the submitted form into a
//! [`FilterConfig`] ([`FilterForm::finish`]).

use crate::Category;
use crate::api::Context;
use crate::settings::{FilterConfig, SpellFilter};
use indexmap::IndexMap;
use serde::Serialize;

/// One input of the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// A non-spell category switch.
    Category(Category),
    SpellsAll,
    SpellsPrepared,
    SpellsRitual,
    SpellsCantrips,
}

impl FilterField {
    /// Form input name.
    pub fn name(self) -> &'static str {
        match self {
            FilterField::Category(cat) => cat.as_str(),
            FilterField::SpellsAll => "spellsAll",
            FilterField::SpellsPrepared => "spellsPrepared",
            FilterField::SpellsRitual => "spellsRitual",
            FilterField::SpellsCantrips => "spellsCantrips",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "spellsAll" => Some(FilterField::SpellsAll),
            "spellsPrepared" => Some(FilterField::SpellsPrepared),
            "spellsRitual" => Some(FilterField::SpellsRitual),
            "spellsCantrips" => Some(FilterField::SpellsCantrips),
            other => Category::parse(other).filter(|c| *c != Category::Spells).map(FilterField::Category),
        }
    }

    fn label_key(self) -> String {
        match self {
            FilterField::Category(cat) => cat.label_key(),
            FilterField::SpellsAll => "ACTION_SHEET.Filter.Spells.All".to_string(),
            FilterField::SpellsPrepared => "ACTION_SHEET.Filter.Spells.Prepared".to_string(),
            FilterField::SpellsRitual => "ACTION_SHEET.Filter.Spells.Ritual".to_string(),
            FilterField::SpellsCantrips => "ACTION_SHEET.Filter.Spells.Cantrips".to_string(),
        }
    }
}

/// Checkbox state as rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Checkbox {
    pub checked: bool,
    pub disabled: bool,
}

impl Checkbox {
    fn checked(checked: bool) -> Self {
        Checkbox { checked, disabled: false }
    }

    /// Only enabled, checked boxes count on submit.
    fn submitted(self) -> bool {
        self.checked && !self.disabled
    }
}

/// A form input ready for a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
}

/// How the dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Save,
    Reset,
    Close,
}

impl DialogAction {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "save" => Some(DialogAction::Save),
            "reset" => Some(DialogAction::Reset),
            "close" => Some(DialogAction::Close),
            _ => None,
        }
    }

    /// Localized button label.
    pub fn label(self, ctx: &Context<'_>) -> String {
        match self {
            DialogAction::Save => ctx.localize("ACTION_SHEET.FilterSave"),
            DialogAction::Reset => ctx.localize("ACTION_SHEET.FilterReset"),
            DialogAction::Close => ctx.localize("ACTION_SHEET.Close"),
        }
    }
}

const SPELL_FIELDS: [FilterField; 4] =
    [FilterField::SpellsAll, FilterField::SpellsPrepared, FilterField::SpellsRitual, FilterField::SpellsCantrips];

/// Live state of the filter dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    categories: IndexMap<Category, Checkbox>,
    spells_all: Checkbox,
    spells_prepared: Checkbox,
    spells_ritual: Checkbox,
    spells_cantrips: Checkbox,
}

impl FilterForm {
    /// Form pre-filled from the stored configuration.
    pub fn open(config: &FilterConfig) -> Self {
        let mut form = FilterForm {
            categories: Category::TOGGLEABLE.iter().map(|c| (*c, Checkbox::checked(config.shows(*c)))).collect(),
            spells_all: Checkbox::checked(config.spells.all),
            spells_prepared: Checkbox::checked(config.spells.prepared),
            spells_ritual: Checkbox::checked(config.spells.ritual),
            spells_cantrips: Checkbox::checked(config.spells.cantrips),
        };
        form.sync();
        form
    }

    pub fn title(ctx: &Context<'_>) -> String {
        ctx.localize("ACTION_SHEET.FilterTitle")
    }

    pub fn prompt(ctx: &Context<'_>) -> String {
        ctx.localize("ACTION_SHEET.FilterPrompt")
    }

    pub fn get(&self, field: FilterField) -> Option<Checkbox> {
        match field {
            FilterField::Category(cat) => self.categories.get(&cat).copied(),
            FilterField::SpellsAll => Some(self.spells_all),
            FilterField::SpellsPrepared => Some(self.spells_prepared),
            FilterField::SpellsRitual => Some(self.spells_ritual),
            FilterField::SpellsCantrips => Some(self.spells_cantrips),
        }
    }

    fn get_mut(&mut self, field: FilterField) -> Option<&mut Checkbox> {
        match field {
            FilterField::Category(cat) => self.categories.get_mut(&cat),
            FilterField::SpellsAll => Some(&mut self.spells_all),
            FilterField::SpellsPrepared => Some(&mut self.spells_prepared),
            FilterField::SpellsRitual => Some(&mut self.spells_ritual),
            FilterField::SpellsCantrips => Some(&mut self.spells_cantrips),
        }
    }

    /// Toggle an input as a click would. Disabled inputs ignore the change and
    /// `false` is returned.
    pub fn set(&mut self, field: FilterField, checked: bool) -> bool {
        match self.get_mut(field) {
            Some(cb) if !cb.disabled => {
                cb.checked = checked;
                self.sync();
                true
            }
            _ => false,
        }
    }

    /// Enforce spell exclusivity: "all" clears and disables the narrower
    /// boxes; "prepared" or "ritual" disables "all".
    pub fn sync(&mut self) {
        if self.spells_all.checked {
            self.spells_prepared.checked = false;
            self.spells_ritual.checked = false;
            self.spells_cantrips.checked = false;
        }
        if self.spells_prepared.checked || self.spells_ritual.checked {
            self.spells_all.checked = false;
        }

        self.spells_all.disabled = self.spells_prepared.checked || self.spells_ritual.checked;
        let narrow_disabled = self.spells_all.checked;
        self.spells_prepared.disabled = narrow_disabled;
        self.spells_ritual.disabled = narrow_disabled;
        self.spells_cantrips.disabled = narrow_disabled;
    }

    /// Every input in display order, spell group first.
    pub fn fields(&self, ctx: &Context<'_>) -> Vec<FormField> {
        let categories = self.categories.keys().map(|c| FilterField::Category(*c));
        SPELL_FIELDS
            .into_iter()
            .chain(categories)
            .filter_map(|field| {
                let cb = self.get(field)?;
                Some(FormField {
                    name: field.name(),
                    label: ctx.localize(&field.label_key()),
                    checked: cb.checked,
                    disabled: cb.disabled,
                })
            })
            .collect()
    }

    /// Outcome of closing the dialog: the config to store, or `None` when
    /// nothing should be written.
    ///
    /// On save the exclusivity rule is applied again to the submitted values,
    /// so a box that is both checked and disabled never reaches storage.
    pub fn finish(&self, action: DialogAction) -> Option<FilterConfig> {
        match action {
            DialogAction::Close => None,
            DialogAction::Reset => Some(FilterConfig::default()),
            DialogAction::Save => {
                let mut config = FilterConfig::default();
                for (cat, cb) in &self.categories {
                    config.set_category(*cat, cb.submitted());
                }
                config.spells = SpellFilter {
                    all: self.spells_all.submitted(),
                    prepared: self.spells_prepared.submitted(),
                    ritual: self.spells_ritual.submitted(),
                    cantrips: self.spells_cantrips.submitted(),
                }
                .exclusive();
                Some(config)
            }
        }
    }
}
