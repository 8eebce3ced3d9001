//! `actions::container` module
//!
//! Handlers for moving items into and out of containers.

use anyhow::{Context, Result};
use log::info;
use uuid::Uuid;

use crate::actions::{Source, remove_from_source, usage};
use crate::entity_search::match_in_pool;
use crate::item::{Item, ItemHolder, aggregate_damage, aggregate_mass};
use crate::view::{View, ViewItem};
use crate::world::{AthoraWorld, Location};

const PUT_IN_SYNTAX: &str = "put [item] in [container]";
const TAKE_OUT_SYNTAX: &str = "take [item] out of [container]";

/// Puts items matching the query into a resolved container.
///
/// The container's own name is stripped from the query first so "put coin
/// in satchel" doesn't match the satchel itself. Inventory matches win over
/// scene matches. Containers never go into containers.
///
/// # Errors
/// - if the player's current scene or the resolved container cannot be found
pub fn put_in_handler(world: &mut AthoraWorld, view: &mut View, query: &str, container: Option<Uuid>) -> Result<()> {
    let Some(container_id) = container else {
        usage(view, "You must have the container in your inventory.", PUT_IN_SYNTAX);
        return Ok(());
    };
    if query.trim().is_empty() {
        usage(view, "Specify what you want to add to that container.", PUT_IN_SYNTAX);
        return Ok(());
    }

    let container_name = world
        .items
        .get(&container_id)
        .context("resolved container not found in world")?
        .name
        .clone();
    let stripped = query.replace(&container_name.to_lowercase(), "");

    let inv_items = world.player.inventory.items().to_vec();
    let inv_matches = match_in_pool(&world.items, &inv_items, &stripped);

    let scene = world.player_scene_ref()?;
    let scene_id = scene.id;
    let scene_matches = match_in_pool(&world.items, &scene.contents, &stripped);

    if !inv_matches.is_empty() {
        insert_matches(world, view, &inv_matches, Source::PlayerInventory, container_id);
    } else if !scene_matches.is_empty() {
        insert_matches(world, view, &scene_matches, Source::Scene(scene_id), container_id);
    } else {
        view.push(ViewItem::ActionFailure("You do not have that.".to_string()));
    }
    Ok(())
}

/// Move each match into the container if it fits and isn't a container
/// itself.
fn insert_matches(world: &mut AthoraWorld, view: &mut View, matches: &[Uuid], source: Source, container_id: Uuid) {
    for &match_id in matches {
        let Some(item) = world.items.get(&match_id) else {
            continue;
        };
        let name = item.name.clone();
        let Some(container_name) = world.items.get(&container_id).map(|c| c.name.clone()) else {
            continue;
        };
        if item.kind.is_container() {
            view.push(ViewItem::ActionFailure(
                "You cannot put a container inside a container.".to_string(),
            ));
            continue;
        }

        let mass = aggregate_mass(&world.items, match_id);
        let fits = world
            .items
            .get(&container_id)
            .and_then(Item::contents)
            .is_some_and(|contents| contents.can_fit(&world.items, mass));
        if fits {
            remove_from_source(world, source, match_id);
            if let Some(contents) = world.items.get_mut(&container_id).and_then(Item::contents_mut) {
                contents.add_item(match_id);
            }
            if let Some(moved) = world.items.get_mut(&match_id) {
                moved.location = Location::Item(container_id);
            }
            let damage = aggregate_damage(&world.items, container_id);
            view.push(ViewItem::ActionSuccess(format!(
                "You put {name} into {container_name}. Now it deals {damage} damage."
            )));
            info!("player put {name} ({match_id}) into {container_name} ({container_id})");
        } else {
            view.push(ViewItem::ActionFailure(format!(
                "The {container_name} is too full to fit {name}."
            )));
        }
    }
}

/// Takes items matching the query out of a resolved container and into the
/// player's inventory, capacity permitting.
///
/// # Errors
/// - if the resolved container cannot be found
pub fn take_from_handler(world: &mut AthoraWorld, view: &mut View, query: &str, container: Option<Uuid>) -> Result<()> {
    let Some(container_id) = container else {
        usage(view, "You must have the container in your inventory.", TAKE_OUT_SYNTAX);
        return Ok(());
    };
    if query.trim().is_empty() {
        usage(view, "Specify what you want to take out of that container.", TAKE_OUT_SYNTAX);
        return Ok(());
    }

    let container = world
        .items
        .get(&container_id)
        .context("resolved container not found in world")?;
    let container_name = container.name.clone();
    let contents: Vec<Uuid> = container.contents().map(|inv| inv.items().to_vec()).unwrap_or_default();

    let matches = match_in_pool(&world.items, &contents, query);
    if matches.is_empty() {
        view.push(ViewItem::ActionFailure(format!(
            "That item isn't in the {container_name}."
        )));
        return Ok(());
    }

    for match_id in matches {
        let Some(name) = world.items.get(&match_id).map(|i| i.name.clone()) else {
            continue;
        };
        let mass = aggregate_mass(&world.items, match_id);
        if world.player.inventory.can_fit(&world.items, mass) {
            remove_from_source(world, Source::Container(container_id), match_id);
            world.player.inventory.add_item(match_id);
            if let Some(moved) = world.items.get_mut(&match_id) {
                moved.location = Location::Inventory;
            }
            let damage = aggregate_damage(&world.items, container_id);
            view.push(ViewItem::ActionSuccess(format!(
                "You took {name} out of {container_name}. Now it deals {damage} damage."
            )));
            info!("player took {name} ({match_id}) out of {container_name} ({container_id})");
        } else {
            view.push(ViewItem::ActionFailure(format!(
                "Your inventory is too full to hold the {name}."
            )));
        }
    }
    Ok(())
}
