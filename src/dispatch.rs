//! Row click routing.
//!
//! A rendered row carries only ids. These helpers find the item and activity
//! behind a click and decide which host action it maps to; the host performs
//! it through [`ActionHandler`].

use crate::activity::primary_usable_activity;
use crate::model::{Activity, Capabilities, Item};
use tracing::debug;

/// Buttons on an activity sub-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ActivityUse,
    RollAttack,
    RollDamage,
}

impl RowAction {
    /// Parse the `data-action` attribute value.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "activity-use" => Some(RowAction::ActivityUse),
            "roll-attack" => Some(RowAction::RollAttack),
            "roll-damage" => Some(RowAction::RollDamage),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowAction::ActivityUse => "activity-use",
            RowAction::RollAttack => "roll-attack",
            RowAction::RollDamage => "roll-damage",
        }
    }

    fn capability(self) -> Capabilities {
        match self {
            RowAction::ActivityUse => Capabilities::USE,
            RowAction::RollAttack => Capabilities::ROLL_ATTACK,
            RowAction::RollDamage => Capabilities::ROLL_DAMAGE,
        }
    }
}

/// A resolved click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch<'a> {
    UseItem(&'a Item),
    UseActivity(&'a Item, &'a Activity),
    RollAttack(&'a Item, &'a Activity),
    RollDamage(&'a Item, &'a Activity),
}

/// Host side of row interaction.
pub trait ActionHandler {
    fn use_item(&mut self, item: &Item);
    fn use_activity(&mut self, item: &Item, activity: &Activity);
    fn roll_attack(&mut self, item: &Item, activity: &Activity);
    fn roll_damage(&mut self, item: &Item, activity: &Activity);
}

impl Dispatch<'_> {
    pub fn item(&self) -> &Item {
        match self {
            Dispatch::UseItem(item)
            | Dispatch::UseActivity(item, _)
            | Dispatch::RollAttack(item, _)
            | Dispatch::RollDamage(item, _) => item,
        }
    }

    pub fn invoke(self, handler: &mut dyn ActionHandler) {
        match self {
            Dispatch::UseItem(item) => handler.use_item(item),
            Dispatch::UseActivity(item, act) => handler.use_activity(item, act),
            Dispatch::RollAttack(item, act) => handler.roll_attack(item, act),
            Dispatch::RollDamage(item, act) => handler.roll_damage(item, act),
        }
    }
}

pub fn find_item<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    items.iter().find(|item| item.id == id)
}

pub fn find_activity<'a>(item: &'a Item, id: &str) -> Option<&'a Activity> {
    item.activities.iter().find(|act| act.id == id)
}

/// Clicking a row uses the item.
pub fn dispatch_row_click<'a>(items: &'a [Item], item_id: &str) -> Option<Dispatch<'a>> {
    find_item(items, item_id).map(Dispatch::UseItem)
}

/// Clicking a sub-row button.
///
/// An unknown or missing activity id falls back to the item's primary usable
/// activity. When the activity lacks the requested capability the click
/// becomes a plain item use. `None` only when the item itself is unknown.
pub fn dispatch_activity_click<'a>(
    items: &'a [Item],
    item_id: &str,
    activity_id: Option<&str>,
    action: RowAction,
) -> Option<Dispatch<'a>> {
    let item = find_item(items, item_id)?;
    let activity = activity_id
        .and_then(|id| find_activity(item, id))
        .or_else(|| primary_usable_activity(item).activity());

    let Some(activity) = activity else {
        debug!(item = %item.name, action = action.as_str(), "item has no activities, using item");
        return Some(Dispatch::UseItem(item));
    };
    if !activity.caps.contains(action.capability()) {
        debug!(item = %item.name, activity = %activity.id, action = action.as_str(), "capability missing, using item");
        return Some(Dispatch::UseItem(item));
    }

    Some(match action {
        RowAction::ActivityUse => Dispatch::UseActivity(item, activity),
        RowAction::RollAttack => Dispatch::RollAttack(item, activity),
        RowAction::RollDamage => Dispatch::RollDamage(item, activity),
    })
}
