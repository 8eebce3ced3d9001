//! `actions::item` module
//!
//! Handlers for consuming and reading items.

use anyhow::Result;
use log::info;

use crate::actions::usage;
use crate::entity_search::match_in_pool;
use crate::item::{ItemHolder, ItemKind, TakeRule};
use crate::view::{View, ViewItem};
use crate::world::AthoraWorld;

/// Eats matching food from the player's inventory. Saturation heals up to
/// max health; the food is gone afterwards.
pub fn eat_handler(world: &mut AthoraWorld, view: &mut View, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        usage(view, "Specify what you want to eat.", "eat [item]");
        return Ok(());
    }

    let inv_items = world.player.inventory.items().to_vec();
    let matches = match_in_pool(&world.items, &inv_items, query);
    if matches.is_empty() {
        view.push(ViewItem::ActionFailure("You don't have that in your inventory.".to_string()));
        return Ok(());
    }

    for match_id in matches {
        let Some(item) = world.items.get(&match_id) else {
            continue;
        };
        let name = item.name.clone();
        let message = item.take.message.clone();
        let saturation = match (&item.take.rule, &item.kind) {
            (TakeRule::Takeable, ItemKind::Food { saturation }) => Some(*saturation),
            _ => None,
        };

        if let Some(saturation) = saturation {
            world.player.health.change(saturation as i32);
            world.player.inventory.remove_item(match_id);
            // consumables leave the world entirely
            world.items.remove(&match_id);
            if let Some(msg) = message {
                view.push(ViewItem::ActionSuccess(msg));
            }
            view.push(ViewItem::ActionSuccess(format!(
                "You ate {name}, and gained {saturation} HP.\nYou are now on {} HP.",
                world.player.health.current()
            )));
            info!("player ate {name} ({match_id}) for {saturation} HP");
        } else {
            view.push(ViewItem::ActionFailure(format!("You cannot eat a {name}!")));
        }
    }
    Ok(())
}

/// Reads matching readables from inventory and the current scene.
///
/// # Errors
/// - if the player's current scene cannot be resolved
pub fn read_handler(world: &AthoraWorld, view: &mut View, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        usage(view, "Specify what you want to read.", "read [item]");
        return Ok(());
    }

    let scene = world.player_scene_ref()?;
    let mut matches = match_in_pool(&world.items, world.player.inventory.items(), query);
    matches.extend(match_in_pool(&world.items, &scene.contents, query));
    if matches.is_empty() {
        view.push(ViewItem::ActionFailure("Item not found.".to_string()));
        return Ok(());
    }

    for match_id in matches {
        let Some(item) = world.items.get(&match_id) else {
            continue;
        };
        match (&item.take.rule, &item.kind) {
            (TakeRule::Takeable, ItemKind::Readable { text }) => {
                view.push(ViewItem::ItemText {
                    name: item.name.clone(),
                    text: text.clone(),
                });
                info!("player read {} ({match_id})", item.name);
            },
            _ => view.push(ViewItem::ActionFailure(format!("You cannot read that {}!", item.name))),
        }
    }
    Ok(())
}
