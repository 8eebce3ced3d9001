//! `actions::combat` module
//!
//! The attack handler and the combat-timer signal it hands back to the
//! command loop.

use anyhow::Result;
use log::info;
use uuid::Uuid;

use crate::actions::usage;
use crate::entity_search::match_in_pool;
use crate::item::{Item, ItemHolder, ItemKind, TakeRule, aggregate_damage};
use crate::view::{View, ViewItem};
use crate::world::{AthoraWorld, Location};

/// Tells the caller whether an attack landed this turn, so it can reset
/// its combat timer. The handler never touches the timer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatTimerSignal {
    Reset,
    Untouched,
}

/// Swings matching weapons (any non-food inventory item) at a resolved
/// enemy.
///
/// A surviving enemy strikes back and pulls the player into combat; a slain
/// enemy drops its takeable inventory into the scene, is renamed
/// "Dead <name>", and ends combat. Attacking a corpse is refused.
///
/// # Errors
/// - if the player's current scene cannot be resolved
pub fn attack_handler(
    world: &mut AthoraWorld,
    view: &mut View,
    query: &str,
    enemy: Option<Uuid>,
) -> Result<CombatTimerSignal> {
    let Some(enemy_id) = enemy else {
        view.push(ViewItem::ActionFailure("No enemy found.".to_string()));
        return Ok(CombatTimerSignal::Untouched);
    };
    if query.trim().is_empty() {
        usage(view, "Specify what you want to attack.", "attack [enemy] with [weapon]");
        return Ok(CombatTimerSignal::Untouched);
    }

    let weapons = world.player.weapons(&world.items);
    let matches = match_in_pool(&world.items, &weapons, query);
    if matches.is_empty() {
        view.push(ViewItem::ActionFailure("You don't have that.".to_string()));
        return Ok(CombatTimerSignal::Untouched);
    }

    let mut signal = CombatTimerSignal::Untouched;
    for weapon_id in matches {
        let Some(enemy_item) = world.items.get(&enemy_id) else {
            continue;
        };
        let enemy_name = enemy_item.name.clone();
        let enemy_damage = enemy_item.damage;
        if !enemy_item.is_alive() {
            view.push(ViewItem::ActionFailure(format!("That {enemy_name} is already dead.")));
            continue;
        }

        let Some(weapon_name) = world.items.get(&weapon_id).map(|w| w.name.clone()) else {
            continue;
        };
        let weapon_damage = aggregate_damage(&world.items, weapon_id);

        if let Some(enemy_item) = world.items.get_mut(&enemy_id)
            && let ItemKind::Enemy { health, .. } = &mut enemy_item.kind
        {
            health.change(-(weapon_damage as i32));
        }
        signal = CombatTimerSignal::Reset;
        view.push(ViewItem::ActionSuccess(format!(
            "You attacked the {enemy_name} with a {weapon_name} for {weapon_damage} damage."
        )));
        info!("player attacked {enemy_name} ({enemy_id}) with {weapon_name} ({weapon_id}) for {weapon_damage}");

        if world.items.get(&enemy_id).is_some_and(Item::is_alive) {
            strike_back(world, view, &enemy_name, enemy_id, enemy_damage);
        } else {
            handle_enemy_death(world, view, &enemy_name, enemy_id)?;
        }
    }
    Ok(signal)
}

/// The surviving enemy hits back; first blood pulls the player into combat.
fn strike_back(world: &mut AthoraWorld, view: &mut View, enemy_name: &str, enemy_id: Uuid, enemy_damage: u32) {
    world.player.health.change(-(enemy_damage as i32));
    let enemy_hp = world
        .items
        .get(&enemy_id)
        .and_then(|e| match &e.kind {
            ItemKind::Enemy { health, .. } => Some(health.current()),
            _ => None,
        })
        .unwrap_or(0);
    view.push(ViewItem::CombatUpdate(format!(
        "It swings back at you, dealing {enemy_damage} damage to you. Your health: {}\nThe {enemy_name} is now on {enemy_hp} HP.",
        world.player.health.current()
    )));
    if !world.player.combat {
        world.player.combat = true;
        view.push(ViewItem::CombatUpdate("You are now in combat.".to_string()));
        info!("player entered combat with {enemy_name} ({enemy_id})");
    }
}

/// Loot the corpse into the scene, rename it, and leave combat.
fn handle_enemy_death(world: &mut AthoraWorld, view: &mut View, enemy_name: &str, enemy_id: Uuid) -> Result<()> {
    let scene_id = world.player_scene_ref()?.id;

    let carried: Vec<Uuid> = world
        .items
        .get(&enemy_id)
        .and_then(Item::contents)
        .map(|inv| inv.items().to_vec())
        .unwrap_or_default();
    let mut dropped = Vec::new();
    for loot_id in carried {
        let takeable = world
            .items
            .get(&loot_id)
            .is_some_and(|loot| loot.take.rule == TakeRule::Takeable);
        if !takeable {
            continue;
        }
        if let Some(contents) = world.items.get_mut(&enemy_id).and_then(Item::contents_mut) {
            contents.remove_item(loot_id);
        }
        if let Some(scene) = world.scenes.get_mut(&scene_id) {
            scene.add_item(loot_id);
        }
        if let Some(loot) = world.items.get_mut(&loot_id) {
            loot.location = Location::Scene(scene_id);
            dropped.push(loot.name.clone());
        }
    }

    view.push(ViewItem::ActionSuccess(format!("The {enemy_name} is now dead.")));
    if !dropped.is_empty() {
        view.push(ViewItem::ActionSuccess(format!("It dropped a {}.", dropped.join(", a "))));
    }
    if let Some(enemy_item) = world.items.get_mut(&enemy_id) {
        enemy_item.name = format!("Dead {enemy_name}");
    }
    info!("{enemy_name} ({enemy_id}) died; dropped {} item(s)", dropped.len());

    if world.player.combat {
        view.push(ViewItem::CombatOver("You are no longer in combat.".to_string()));
        info!("player left combat");
    }
    world.player.combat = false;
    Ok(())
}
