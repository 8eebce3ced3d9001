//! `actions::inventory` module
//!
//! Handlers for commands that move items between the world and the
//! player's inventory.

use anyhow::Result;
use log::info;
use uuid::Uuid;

use crate::actions::{Source, nothing_here, remove_from_source, usage};
use crate::entity_search::{containers_in, match_in_pool};
use crate::item::{Item, ItemHolder, TakeRule, aggregate_damage, aggregate_mass};
use crate::view::{View, ViewItem};
use crate::world::{AthoraWorld, Location};

/// Picks up items matching the query from the current scene.
///
/// Direct scene matches win exclusively; only when there are none are the
/// contents of containers sitting in the scene searched.
///
/// # Errors
/// - if the player's current scene cannot be resolved
pub fn take_handler(world: &mut AthoraWorld, view: &mut View, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        usage(view, "What do you want to pick up?", "take [item]");
        return Ok(());
    }

    let scene = world.player_scene_ref()?;
    let scene_id = scene.id;
    let scene_contents = scene.contents.clone();

    let direct = match_in_pool(&world.items, &scene_contents, query);
    if !direct.is_empty() {
        take_matches(world, view, &direct, Source::Scene(scene_id));
        return Ok(());
    }

    // fall back to items sitting inside containers in the scene
    let mut container_hits: Vec<(Uuid, Vec<Uuid>)> = Vec::new();
    for container_id in containers_in(&world.items, &scene_contents) {
        if let Some(contents) = world.items.get(&container_id).and_then(Item::contents) {
            let found = match_in_pool(&world.items, contents.items(), query);
            if !found.is_empty() {
                container_hits.push((container_id, found));
            }
        }
    }
    if container_hits.is_empty() {
        nothing_here(view, query);
        return Ok(());
    }
    for (container_id, matches) in container_hits {
        take_matches(world, view, &matches, Source::Container(container_id));
    }
    Ok(())
}

/// Apply the takeable policy to each match, moving what's allowed into the
/// player's inventory.
fn take_matches(world: &mut AthoraWorld, view: &mut View, matches: &[Uuid], source: Source) {
    for &match_id in matches {
        let Some(item) = world.items.get(&match_id) else {
            continue;
        };
        let name = item.name.clone();
        let rule = item.take.rule;
        let message = item.take.message.clone();
        let is_enemy = item.kind.is_enemy();

        match rule {
            TakeRule::Takeable if !is_enemy => {
                let mass = aggregate_mass(&world.items, match_id);
                if world.player.inventory.can_fit(&world.items, mass) {
                    remove_from_source(world, source, match_id);
                    world.player.inventory.add_item(match_id);
                    if let Some(moved) = world.items.get_mut(&match_id) {
                        moved.location = Location::Inventory;
                    }
                    if let Some(msg) = message {
                        view.push(ViewItem::ActionSuccess(msg));
                    }
                    view.push(ViewItem::ActionSuccess(format!("You picked up {name}.")));
                    info!("player picked up {name} ({match_id})");
                } else {
                    view.push(ViewItem::ActionFailure(
                        "Your inventory is too full to pick that up!".to_string(),
                    ));
                }
            },
            TakeRule::Consequence => {
                // booby trap: the item hurts and stays where it is
                let damage = aggregate_damage(&world.items, match_id);
                world.player.health.change(-(damage as i32));
                view.push(ViewItem::PlayerHarmed {
                    cause: message,
                    amount: damage,
                });
                info!("player triggered {name} ({match_id}) for {damage} damage");
            },
            _ => match message {
                Some(msg) => view.push(ViewItem::ActionFailure(msg)),
                None => view.push(ViewItem::ActionFailure(format!("You can't pick up a {name}!"))),
            },
        }
    }
}

/// Drops items matching the query from inventory into the current scene.
/// Also reaches into containers the player is carrying.
///
/// # Errors
/// - if the player's current scene cannot be resolved
pub fn drop_handler(world: &mut AthoraWorld, view: &mut View, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        usage(view, "What do you want to drop?", "drop [item]");
        return Ok(());
    }

    let scene_id = world.player_scene_ref()?.id;
    let inv_items = world.player.inventory.items().to_vec();

    let direct = match_in_pool(&world.items, &inv_items, query);
    if !direct.is_empty() {
        for match_id in direct {
            let Some(name) = world.items.get(&match_id).map(|i| i.name.clone()) else {
                continue;
            };
            world.player.inventory.remove_item(match_id);
            if let Some(scene) = world.scenes.get_mut(&scene_id) {
                scene.add_item(match_id);
            }
            if let Some(dropped) = world.items.get_mut(&match_id) {
                dropped.location = Location::Scene(scene_id);
            }
            view.push(ViewItem::ActionSuccess(format!("Dropped {name}.")));
            info!("player dropped {name} ({match_id})");
        }
        return Ok(());
    }

    // items nested inside carried containers can be dropped too
    let mut container_hits: Vec<(Uuid, Vec<Uuid>)> = Vec::new();
    for container_id in containers_in(&world.items, &inv_items) {
        if let Some(contents) = world.items.get(&container_id).and_then(Item::contents) {
            let found = match_in_pool(&world.items, contents.items(), query);
            if !found.is_empty() {
                container_hits.push((container_id, found));
            }
        }
    }
    if container_hits.is_empty() {
        nothing_here(view, query);
        return Ok(());
    }
    for (container_id, matches) in container_hits {
        let container_name = world
            .items
            .get(&container_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        for match_id in matches {
            let Some(name) = world.items.get(&match_id).map(|i| i.name.clone()) else {
                continue;
            };
            remove_from_source(world, Source::Container(container_id), match_id);
            if let Some(scene) = world.scenes.get_mut(&scene_id) {
                scene.add_item(match_id);
            }
            if let Some(dropped) = world.items.get_mut(&match_id) {
                dropped.location = Location::Scene(scene_id);
            }
            view.push(ViewItem::ActionSuccess(format!("Dropped {name} from {container_name}.")));
            info!("player dropped {name} ({match_id}) out of {container_name}");
        }
    }
    Ok(())
}
