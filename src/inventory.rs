//! Inventory Module
//!
//! An [`Inventory`] is an ordered, mass-capacity-bounded collection of item
//! ids. The player, containers, and enemies all carry one. Order matters:
//! the fuzzy matcher reports matches in first-seen candidate order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::{Item, ItemHolder, aggregate_mass};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Uuid>,
    max_mass: u32,
}

impl Inventory {
    /// Create an empty inventory with the given mass capacity.
    pub fn new(max_mass: u32) -> Inventory {
        Inventory {
            items: Vec::new(),
            max_mass,
        }
    }

    /// Create an inventory pre-filled with the given item ids.
    pub fn with_items(max_mass: u32, items: Vec<Uuid>) -> Inventory {
        Inventory { items, max_mass }
    }

    pub fn max_mass(&self) -> u32 {
        self.max_mass
    }

    /// Item ids in insertion order.
    pub fn items(&self) -> &[Uuid] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Uuid> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Aggregate mass of everything currently held.
    pub fn total_mass(&self, items: &HashMap<Uuid, Item>) -> u32 {
        self.items.iter().map(|id| aggregate_mass(items, *id)).sum()
    }

    /// Whether an additional `extra_mass` would still fit under the cap.
    pub fn can_fit(&self, items: &HashMap<Uuid, Item>, extra_mass: u32) -> bool {
        self.total_mass(items) + extra_mass <= self.max_mass
    }
}

impl ItemHolder for Inventory {
    fn add_item(&mut self, item_id: Uuid) {
        self.items.push(item_id);
    }

    fn remove_item(&mut self, item_id: Uuid) {
        self.items.retain(|id| *id != item_id);
    }

    fn contains_item(&self, item_id: Uuid) -> bool {
        self.items.contains(&item_id)
    }
}
