//! Item types and aggregation helpers.
//!
//! Every interactable thing in the world -- loose objects, containers, food,
//! readables, and enemies -- is an [`Item`] with a [`ItemKind`] tag carrying
//! the variant-specific state. Functions here handle the recursive mass and
//! damage math for containers.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use variantly::Variantly;

use crate::health::HealthState;
use crate::idgen;
use crate::inventory::Inventory;
use crate::world::{Location, WorldObject};

/// Anything in the world that can be inspected or manipulated.
///
/// `symbol` is the token used to refer to this item in map data; `name` is
/// the display name the fuzzy matcher scores player input against. The name
/// is the one field that changes after construction (a slain enemy is
/// renamed "Dead <name>").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// The stable id of this item.
    pub id: Uuid,
    /// The symbol used to refer to this item in map data.
    pub symbol: String,
    /// The display name of the item.
    pub name: String,
    /// Whether and how the item can be picked up.
    pub take: TakePolicy,
    /// Base mass, before any contents are counted.
    pub mass: u32,
    /// Base damage, before any contents are counted.
    pub damage: u32,
    /// The current [`Location`] of the item.
    pub location: Location,
    /// Variant-specific state.
    pub kind: ItemKind,
}

impl Item {
    /// Construct an item with a stable id derived from its map symbol.
    pub fn new(symbol: &str, name: &str, take: TakePolicy, mass: u32, damage: u32, kind: ItemKind) -> Item {
        Item {
            id: idgen::uuid_from_token(&idgen::NAMESPACE_ITEM, symbol),
            symbol: symbol.to_string(),
            name: name.to_string(),
            take,
            mass,
            damage,
            location: Location::Nowhere,
            kind,
        }
    }

    /// Whether this item is a living enemy. Anything that isn't an enemy is
    /// never alive.
    pub fn is_alive(&self) -> bool {
        match &self.kind {
            ItemKind::Enemy { health, .. } => health.is_alive(),
            _ => false,
        }
    }

    /// Contents of this item, if it can hold other items (container or enemy).
    pub fn contents(&self) -> Option<&Inventory> {
        match &self.kind {
            ItemKind::Container { contents } => Some(contents),
            ItemKind::Enemy { inventory, .. } => Some(inventory),
            _ => None,
        }
    }

    /// Mutable contents of this item, if it can hold other items.
    pub fn contents_mut(&mut self) -> Option<&mut Inventory> {
        match &mut self.kind {
            ItemKind::Container { contents } => Some(contents),
            ItemKind::Enemy { inventory, .. } => Some(inventory),
            _ => None,
        }
    }
}

impl WorldObject for Item {
    fn id(&self) -> Uuid {
        self.id
    }
    fn symbol(&self) -> &str {
        &self.symbol
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn location(&self) -> &Location {
        &self.location
    }
}

/// Variant-specific state for an [`Item`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Variantly)]
pub enum ItemKind {
    #[default]
    Plain,
    /// Holds other items up to its contents' mass cap.
    Container { contents: Inventory },
    /// Restores `saturation` HP when eaten; consumed in the process.
    Food { saturation: u32 },
    /// Carries literal text shown on read.
    Readable { text: String },
    /// Fights back; drops its takeable inventory on death.
    Enemy { health: HealthState, inventory: Inventory },
}

/// Whether and how an item can be taken into inventory.
///
/// The `rule` field keeps the external `"true" | "false" | "consequence"`
/// encoding used by map data. The optional message accompanies whichever
/// outcome the rule produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakePolicy {
    #[serde(default)]
    pub rule: TakeRule,
    #[serde(default)]
    pub message: Option<String>,
}

impl TakePolicy {
    /// Policy for an ordinary takeable item with no attached message.
    pub fn takeable() -> TakePolicy {
        TakePolicy::default()
    }
}

/// Three-valued pickup rule attached to every item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Variantly)]
pub enum TakeRule {
    /// Can always be picked up.
    #[default]
    #[serde(rename = "true")]
    Takeable,
    /// Can never be picked up.
    #[serde(rename = "false")]
    Blocked,
    /// Touching it hurts: the player takes the item's damage and it stays put.
    #[serde(rename = "consequence")]
    Consequence,
}

/// Methods common to things that can hold items.
pub trait ItemHolder {
    /// Insert an item into the holder's contents.
    fn add_item(&mut self, item_id: Uuid);
    /// Remove an item from the holder's contents.
    fn remove_item(&mut self, item_id: Uuid);
    /// Return `true` when the holder already contains the given item.
    fn contains_item(&self, item_id: Uuid) -> bool;
}

/// Effective mass of an item: base mass, plus the aggregate mass of every
/// contained item for containers. Terminates because containers never nest.
pub fn aggregate_mass(items: &HashMap<Uuid, Item>, item_id: Uuid) -> u32 {
    let Some(item) = items.get(&item_id) else {
        warn!("aggregate_mass: unknown item id {item_id}");
        return 0;
    };
    let mut total = item.mass;
    if let ItemKind::Container { contents } = &item.kind {
        for id in contents.iter() {
            total += aggregate_mass(items, *id);
        }
    }
    total
}

/// Effective damage of an item: base damage, plus the aggregate damage of
/// every contained item for containers.
pub fn aggregate_damage(items: &HashMap<Uuid, Item>, item_id: Uuid) -> u32 {
    let Some(item) = items.get(&item_id) else {
        warn!("aggregate_damage: unknown item id {item_id}");
        return 0;
    };
    let mut total = item.damage;
    if let ItemKind::Container { contents } = &item.kind {
        for id in contents.iter() {
            total += aggregate_damage(items, *id);
        }
    }
    total
}

/// Mass contributed by a container's contents alone. Floored at zero.
pub fn container_self_mass(items: &HashMap<Uuid, Item>, item_id: Uuid) -> u32 {
    let base = items.get(&item_id).map_or(0, |item| item.mass);
    aggregate_mass(items, item_id).saturating_sub(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(items: &mut HashMap<Uuid, Item>, item: Item) -> Uuid {
        let id = item.id;
        items.insert(id, item);
        id
    }

    fn plain(symbol: &str, mass: u32, damage: u32) -> Item {
        Item::new(symbol, symbol, TakePolicy::takeable(), mass, damage, ItemKind::Plain)
    }

    #[test]
    fn aggregate_mass_sums_container_contents() {
        let mut items = HashMap::new();
        let coin = insert(&mut items, plain("coin", 1, 0));
        let dagger = insert(&mut items, plain("dagger", 3, 5));
        let chest = insert(
            &mut items,
            Item::new(
                "chest",
                "Chest",
                TakePolicy::takeable(),
                10,
                2,
                ItemKind::Container {
                    contents: Inventory::with_items(50, vec![coin, dagger]),
                },
            ),
        );

        assert_eq!(aggregate_mass(&items, chest), 14);
        assert_eq!(aggregate_damage(&items, chest), 7);
        assert!(aggregate_mass(&items, chest) >= items[&chest].mass);
    }

    #[test]
    fn aggregate_of_plain_item_is_base_value() {
        let mut items = HashMap::new();
        let rock = insert(&mut items, plain("rock", 8, 1));
        assert_eq!(aggregate_mass(&items, rock), 8);
        assert_eq!(aggregate_damage(&items, rock), 1);
    }

    #[test]
    fn container_self_mass_floors_at_zero() {
        let mut items = HashMap::new();
        let empty = insert(
            &mut items,
            Item::new(
                "bag",
                "Bag",
                TakePolicy::takeable(),
                2,
                0,
                ItemKind::Container {
                    contents: Inventory::new(10),
                },
            ),
        );
        assert_eq!(container_self_mass(&items, empty), 0);
    }

    #[test]
    fn enemy_mass_excludes_its_inventory() {
        let mut items = HashMap::new();
        let loot = insert(&mut items, plain("loot", 5, 0));
        let goblin = insert(
            &mut items,
            Item::new(
                "goblin",
                "Goblin",
                TakePolicy {
                    rule: TakeRule::Blocked,
                    message: None,
                },
                20,
                4,
                ItemKind::Enemy {
                    health: HealthState::new_at_max(12),
                    inventory: Inventory::with_items(30, vec![loot]),
                },
            ),
        );
        assert_eq!(aggregate_mass(&items, goblin), 20);
    }

    #[test]
    fn only_enemies_can_be_alive() {
        let sword = plain("sword", 3, 7);
        assert!(!sword.is_alive());

        let mut goblin = Item::new(
            "goblin",
            "Goblin",
            TakePolicy::default(),
            20,
            4,
            ItemKind::Enemy {
                health: HealthState::new_at_max(12),
                inventory: Inventory::new(30),
            },
        );
        assert!(goblin.is_alive());
        if let ItemKind::Enemy { health, .. } = &mut goblin.kind {
            health.kill();
        }
        assert!(!goblin.is_alive());
    }

    #[test]
    fn take_rule_keeps_map_data_encoding() {
        let decoded: TakeRule = ron::from_str("consequence").unwrap();
        assert_eq!(decoded, TakeRule::Consequence);
        // "true" and "false" collide with RON bool literals, so map data
        // spells them as raw identifiers
        let decoded: TakeRule = ron::from_str("r#true").unwrap();
        assert_eq!(decoded, TakeRule::Takeable);
        let decoded: TakeRule = ron::from_str("r#false").unwrap();
        assert_eq!(decoded, TakeRule::Blocked);
    }
}
