//! Player action handlers.
//!
//! Each handler resolves the player's free-text query against one or more
//! ordered candidate pools via [`crate::entity_search`], applies the first
//! non-empty pool's full match set, mutates world state, and queues
//! narration on the supplied [`View`]. A query that matches nothing in any
//! pool produces a "not found" message and no mutation.

pub mod combat;
pub mod container;
pub mod inventory;
pub mod item;

pub use combat::*;
pub use container::*;
pub use inventory::*;
pub use item::*;

use uuid::Uuid;

use crate::item::{Item, ItemHolder};
use crate::view::{View, ViewItem};
use crate::world::AthoraWorld;

/// Where a batch of matches was found, so successful moves can remove the
/// item from the right pool.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Source {
    Scene(Uuid),
    Container(Uuid),
    PlayerInventory,
}

/// Remove an item id from the pool it was matched in.
pub(crate) fn remove_from_source(world: &mut AthoraWorld, source: Source, item_id: Uuid) {
    match source {
        Source::Scene(scene_id) => {
            if let Some(scene) = world.scenes.get_mut(&scene_id) {
                scene.remove_item(item_id);
            }
        },
        Source::Container(container_id) => {
            if let Some(contents) = world.items.get_mut(&container_id).and_then(Item::contents_mut) {
                contents.remove_item(item_id);
            }
        },
        Source::PlayerInventory => world.player.inventory.remove_item(item_id),
    }
}

/// Feedback when a query matches nothing nearby.
pub(crate) fn nothing_here(view: &mut View, query: &str) {
    view.push(ViewItem::ActionFailure(format!("There's no \"{query}\" here.")));
}

/// Queue a usage hint for an under-specified command.
pub(crate) fn usage(view: &mut View, hint: &str, syntax: &str) {
    view.push(ViewItem::UsageHint {
        hint: hint.to_string(),
        syntax: syntax.to_string(),
    });
}
