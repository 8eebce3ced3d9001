//! Scene Module
//!
//! A [`Scene`] is one location the player can occupy. It holds an ordered
//! list of the items present and a map coordinate; only the Z axis of the
//! coordinate is consumed by the engine, for elevation queries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::idgen;
use crate::item::ItemHolder;
use crate::world::{Location, WorldObject};

/// Position of a scene on the map grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// One room of the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub coordinate: Coordinate,
    /// Ids of items present, in placement order.
    pub contents: Vec<Uuid>,
}

impl Scene {
    /// Construct a scene with a stable id derived from its map symbol.
    pub fn new(symbol: &str, name: &str, description: &str, coordinate: Coordinate) -> Scene {
        Scene {
            id: idgen::uuid_from_token(&idgen::NAMESPACE_SCENE, symbol),
            symbol: symbol.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            coordinate,
            contents: Vec::new(),
        }
    }

    /// Elevation of this scene.
    pub fn z(&self) -> i32 {
        self.coordinate.z
    }
}

impl WorldObject for Scene {
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
        &Location::Nowhere
    }
}

impl ItemHolder for Scene {
    fn add_item(&mut self, item_id: Uuid) {
        self.contents.push(item_id);
    }

    fn remove_item(&mut self, item_id: Uuid) {
        self.contents.retain(|id| *id != item_id);
    }

    fn contains_item(&self, item_id: Uuid) -> bool {
        self.contents.contains(&item_id)
    }
}
