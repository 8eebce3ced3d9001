//! Player Module

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::health::HealthState;
use crate::inventory::Inventory;
use crate::item::{Item, ItemKind};
use crate::scene::Scene;
use crate::world::AthoraWorld;

/// The player character: health, a mass-bounded inventory, the scene they
/// occupy, and whether they are currently in combat.
#[derive(Debug, Serialize, Deserialize)]
pub struct Player {
    pub health: HealthState,
    pub inventory: Inventory,
    /// Id of the scene the player is in.
    pub location: Uuid,
    /// True from an attack exchange against a living enemy until that
    /// enemy dies. Only the attack handler flips this.
    pub combat: bool,
}

impl Default for Player {
    fn default() -> Player {
        Player {
            health: HealthState::new_at_max(100),
            inventory: Inventory::new(50),
            location: Uuid::nil(),
            combat: false,
        }
    }
}

impl Player {
    pub fn new(health: i32, carry_capacity: u32, scene_id: Uuid) -> Player {
        Player {
            health: HealthState::new_at_max(health),
            inventory: Inventory::new(carry_capacity),
            location: scene_id,
            combat: false,
        }
    }

    /// Everything in inventory that can be swung at an enemy -- anything
    /// that isn't food counts as a weapon. Inventory order is preserved.
    pub fn weapons(&self, items: &HashMap<Uuid, Item>) -> Vec<Uuid> {
        self.inventory
            .iter()
            .filter(|id| {
                items
                    .get(*id)
                    .is_some_and(|item| !matches!(item.kind, ItemKind::Food { .. }))
            })
            .copied()
            .collect()
    }

    /// Elevation of the player's current scene.
    ///
    /// # Errors
    /// - if the player's scene id is not present in the world
    pub fn z(&self, world: &AthoraWorld) -> Result<i32> {
        world
            .scenes
            .get(&self.location)
            .map(Scene::z)
            .ok_or_else(|| anyhow!("player's scene id ({}) not found in world", self.location))
    }
}
