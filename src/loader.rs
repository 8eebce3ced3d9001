//! Map loading.
//!
//! Worlds are authored as RON definition files that reference entities by
//! symbol. The loader assigns each symbol a stable v5 UUID, wires up
//! containment, and validates the result before play starts. Definition
//! structs are kept separate from the runtime types so the on-disk format
//! can stay terse (defaults for most fields).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::health::HealthState;
use crate::inventory::Inventory;
use crate::item::{Item, ItemHolder, ItemKind, TakePolicy};
use crate::player::Player;
use crate::scene::{Coordinate, Scene};
use crate::world::{AthoraWorld, Location};

/// A complete world definition as authored in a map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDef {
    pub player: PlayerDef,
    pub scenes: Vec<SceneDef>,
    pub items: Vec<ItemDef>,
}

/// Starting state for the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub health: i32,
    pub carry_capacity: u32,
    /// Symbol of the starting scene.
    pub scene: String,
}

/// One scene of the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDef {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub coordinate: Coordinate,
}

/// One item of the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub take: TakePolicy,
    #[serde(default)]
    pub mass: u32,
    #[serde(default)]
    pub damage: u32,
    pub location: LocationDef,
    #[serde(default)]
    pub kind: ItemKindDef,
}

/// Where an item starts out, by symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LocationDef {
    /// Loose in the named scene.
    Scene(String),
    /// Inside the named container or enemy.
    Inside(String),
    /// In the player's inventory.
    Carried,
}

/// Variant-specific fields for an item definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum ItemKindDef {
    #[default]
    Plain,
    Container {
        max_mass: u32,
    },
    Food {
        saturation: u32,
    },
    Readable {
        text: String,
    },
    Enemy {
        health: i32,
        carry_capacity: u32,
    },
}

/// Problems a map definition can have.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("duplicate symbol '{0}' in map data")]
    DuplicateSymbol(String),
    #[error("unknown symbol '{symbol}' referenced by '{referrer}'")]
    UnknownSymbol { symbol: String, referrer: String },
    #[error("item '{0}' cannot hold other items")]
    NotAVessel(String),
    #[error("container '{child}' cannot start inside container '{parent}'")]
    NestedContainer { child: String, parent: String },
    #[error("contents of '{holder}' exceed its capacity ({mass}/{max_mass})")]
    OverCapacity { holder: String, mass: u32, max_mass: u32 },
}

/// Build a runtime world from a parsed definition.
///
/// # Errors
/// Returns a [`MapError`] describing the first inconsistency found.
pub fn build_world(def: &WorldDef) -> Result<AthoraWorld, MapError> {
    let mut world = AthoraWorld::new_empty();
    let mut scene_ids: HashMap<String, Uuid> = HashMap::new();
    let mut item_ids: HashMap<String, Uuid> = HashMap::new();

    for scene_def in &def.scenes {
        if scene_ids.contains_key(&scene_def.symbol) {
            return Err(MapError::DuplicateSymbol(scene_def.symbol.clone()));
        }
        let scene = Scene::new(
            &scene_def.symbol,
            &scene_def.name,
            &scene_def.description,
            scene_def.coordinate,
        );
        scene_ids.insert(scene_def.symbol.clone(), scene.id);
        world.scenes.insert(scene.id, scene);
    }

    let start_scene = scene_ids
        .get(&def.player.scene)
        .ok_or_else(|| MapError::UnknownSymbol {
            symbol: def.player.scene.clone(),
            referrer: "player".to_string(),
        })?;
    world.player = Player::new(def.player.health, def.player.carry_capacity, *start_scene);

    // first pass: create every item
    for item_def in &def.items {
        if item_ids.contains_key(&item_def.symbol) {
            return Err(MapError::DuplicateSymbol(item_def.symbol.clone()));
        }
        let kind = match &item_def.kind {
            ItemKindDef::Plain => ItemKind::Plain,
            ItemKindDef::Container { max_mass } => ItemKind::Container {
                contents: Inventory::new(*max_mass),
            },
            ItemKindDef::Food { saturation } => ItemKind::Food {
                saturation: *saturation,
            },
            ItemKindDef::Readable { text } => ItemKind::Readable { text: text.clone() },
            ItemKindDef::Enemy {
                health,
                carry_capacity,
            } => ItemKind::Enemy {
                health: HealthState::new_at_max(*health),
                inventory: Inventory::new(*carry_capacity),
            },
        };
        let item = Item::new(
            &item_def.symbol,
            &item_def.name,
            item_def.take.clone(),
            item_def.mass,
            item_def.damage,
            kind,
        );
        item_ids.insert(item_def.symbol.clone(), item.id);
        world.insert_item(item);
    }

    // second pass: wire up locations now that every id exists
    for item_def in &def.items {
        let item_id = item_ids[&item_def.symbol];
        match &item_def.location {
            LocationDef::Scene(symbol) => {
                let scene_id = scene_ids.get(symbol).ok_or_else(|| MapError::UnknownSymbol {
                    symbol: symbol.clone(),
                    referrer: item_def.symbol.clone(),
                })?;
                if let Some(scene) = world.scenes.get_mut(scene_id) {
                    scene.add_item(item_id);
                }
                if let Some(item) = world.items.get_mut(&item_id) {
                    item.location = Location::Scene(*scene_id);
                }
            },
            LocationDef::Inside(symbol) => {
                let parent_id = item_ids.get(symbol).ok_or_else(|| MapError::UnknownSymbol {
                    symbol: symbol.clone(),
                    referrer: item_def.symbol.clone(),
                })?;
                let parent_is_container = world
                    .items
                    .get(parent_id)
                    .is_some_and(|parent| parent.kind.is_container());
                let parent_is_vessel = world
                    .items
                    .get(parent_id)
                    .and_then(Item::contents)
                    .is_some();
                if !parent_is_vessel {
                    return Err(MapError::NotAVessel(symbol.clone()));
                }
                let child_is_container = world
                    .items
                    .get(&item_id)
                    .is_some_and(|child| child.kind.is_container());
                if parent_is_container && child_is_container {
                    return Err(MapError::NestedContainer {
                        child: item_def.symbol.clone(),
                        parent: symbol.clone(),
                    });
                }
                if let Some(contents) = world.items.get_mut(parent_id).and_then(Item::contents_mut) {
                    contents.add_item(item_id);
                }
                if let Some(item) = world.items.get_mut(&item_id) {
                    item.location = Location::Item(*parent_id);
                }
            },
            LocationDef::Carried => {
                world.player.inventory.add_item(item_id);
                if let Some(item) = world.items.get_mut(&item_id) {
                    item.location = Location::Inventory;
                }
            },
        }
    }

    // third pass: nothing may start out over capacity
    for item_def in &def.items {
        let item_id = item_ids[&item_def.symbol];
        if let Some(contents) = world.items.get(&item_id).and_then(Item::contents) {
            let mass = contents.total_mass(&world.items);
            if mass > contents.max_mass() {
                return Err(MapError::OverCapacity {
                    holder: item_def.symbol.clone(),
                    mass,
                    max_mass: contents.max_mass(),
                });
            }
        }
    }
    let carried_mass = world.player.inventory.total_mass(&world.items);
    if carried_mass > world.player.inventory.max_mass() {
        return Err(MapError::OverCapacity {
            holder: "player".to_string(),
            mass: carried_mass,
            max_mass: world.player.inventory.max_mass(),
        });
    }

    Ok(world)
}

/// Load a world from a RON map file.
///
/// # Errors
/// - if the file cannot be read or parsed
/// - if the definition fails validation ([`MapError`])
pub fn load_world(path: &Path) -> Result<AthoraWorld> {
    let text = fs::read_to_string(path).with_context(|| format!("reading map file {}", path.display()))?;
    let def: WorldDef = ron::from_str(&text).with_context(|| format!("parsing map file {}", path.display()))?;
    let world = build_world(&def).with_context(|| format!("building world from {}", path.display()))?;
    info!(
        "loaded map '{}': {} scene(s), {} item(s)",
        path.display(),
        world.scenes.len(),
        world.items.len()
    );
    Ok(world)
}
