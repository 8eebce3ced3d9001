//! Data structures representing the game world.
//!
//! This module defines [`AthoraWorld`] and related types used at runtime to
//! track the current state of the adventure.

use crate::ATHORA_VERSION;
use crate::item::Item;
use crate::player::Player;
use crate::scene::Scene;

use anyhow::{Result, anyhow};
use log::info;
use serde::{Deserialize, Serialize};
use variantly::Variantly;

use std::collections::HashMap;
use uuid::Uuid;

/// Kinds of places where an item may be located.
/// Because scenes *are* the locations, they have no location of their own.
#[derive(Copy, Debug, Default, Clone, Serialize, Deserialize, Variantly, PartialEq, Eq)]
pub enum Location {
    /// Loose in a scene.
    Scene(Uuid),
    /// Inside a container or an enemy's inventory.
    Item(Uuid),
    /// In the player's inventory.
    Inventory,
    #[default]
    Nowhere,
}

/// Methods common to any object in the world.
pub trait WorldObject {
    fn id(&self) -> Uuid;
    fn symbol(&self) -> &str;
    fn name(&self) -> &str;
    fn location(&self) -> &Location;
}

/// Complete state of the running game.
///
/// `AthoraWorld` contains every scene and item currently active, as well as
/// the player character. It is created during map loading and then mutated
/// throughout gameplay.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AthoraWorld {
    pub scenes: HashMap<Uuid, Scene>,
    pub items: HashMap<Uuid, Item>,
    pub player: Player,
    pub version: String,
}

impl AthoraWorld {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> AthoraWorld {
        let world = AthoraWorld {
            scenes: HashMap::new(),
            items: HashMap::new(),
            player: Player::default(),
            version: ATHORA_VERSION.to_string(),
        };
        info!("new, empty 'AthoraWorld' created");
        world
    }

    /// Obtain a reference to the scene the player occupies.
    /// # Errors
    /// - if the player's scene id is not found
    pub fn player_scene_ref(&self) -> Result<&Scene> {
        self.scenes
            .get(&self.player.location)
            .ok_or_else(|| anyhow!("player's scene id ({}) not found in world", self.player.location))
    }

    /// Obtain a mutable reference to the scene the player occupies.
    /// # Errors
    /// - if the player's scene id is not found
    pub fn player_scene_mut(&mut self) -> Result<&mut Scene> {
        self.scenes
            .get_mut(&self.player.location)
            .ok_or_else(|| anyhow!("player's scene id ({}) not found in world", self.player.location))
    }

    /// Get a mutable reference to a world item.
    pub fn get_item_mut(&mut self, item_id: Uuid) -> Option<&mut Item> {
        self.items.get_mut(&item_id)
    }

    /// Add an item to the arena and return its id. Does not place it
    /// anywhere; callers wire up the location.
    pub fn insert_item(&mut self, item: Item) -> Uuid {
        let id = item.id;
        self.items.insert(id, item);
        id
    }
}
