use crate::Category;
use crate::model::Item;

/// Category of an item by its type. Unknown types land in `Other`.
pub fn category_for_item(item: &Item) -> Category {
    match item.kind.as_str() {
        "weapon" => Category::Weapons,
        "spell" => Category::Spells,
        "equipment" => Category::Equipment,
        "consumable" => Category::Consumables,
        "tool" => Category::Tools,
        "feat" | "class" | "subclass" | "background" => Category::Features,
        _ => Category::Other,
    }
}
