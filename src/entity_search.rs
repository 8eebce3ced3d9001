//! Entity Search Module
//!
//! Purpose: every action handler needs to take a free-text string from the
//! player and match it to nearby items -- making a natural choice for a
//! unified matcher for that job.
//!
//! Players misspell and abbreviate ("sord" for "sword", "pack" for
//! "Backpack"), so exact or substring matching would reject too much input.
//! Instead, names and queries are broken into fragments and scored with a
//! normalized similarity ratio; any query fragment scoring above
//! [`NAME_MATCH_THRESHOLD`] against any name fragment counts as a match.
//!
//! A multi-word name matches on any single fragment. That lets "sword"
//! find the "Rusty Sword", but it also lets a common word match more than
//! one item at once -- a known limitation the action handlers live with,
//! since they apply the full match set.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{error, warn};
use regex::Regex;
use strsim::normalized_levenshtein;
use uuid::Uuid;

use crate::item::Item;
use crate::world::AthoraWorld;

/// Minimum similarity score for a fragment pair to count as a match
/// (exclusive). Empirically tuned: raising it makes items harder to refer
/// to, lowering it makes unrelated words collide.
pub const NAME_MATCH_THRESHOLD: f64 = 0.75;

lazy_static! {
    /// Anything that is not a word character or a space breaks a fragment.
    static ref FRAGMENT_BREAK: Regex = Regex::new(r"[^\w ]").expect("fragment break pattern is valid");
}

/// Break a string into fragments: split on whitespace, then split each
/// token on punctuation, discarding anything empty.
pub fn fragments(text: &str) -> Vec<String> {
    text.split_whitespace()
        .flat_map(|token| FRAGMENT_BREAK.split(token))
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized similarity of two fragments, in `[0, 1]`. Symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Whether any query fragment is similar enough to any fragment of the
/// (lower-cased) display name.
pub fn name_matches(query_fragments: &[String], name: &str) -> bool {
    let name_fragments = fragments(&name.to_lowercase());
    query_fragments
        .iter()
        .any(|q| name_fragments.iter().any(|n| similarity(q, n) > NAME_MATCH_THRESHOLD))
}

/// Filter an ordered pool of item ids down to those whose name matches the
/// query. De-duplicated by id, preserving first-seen pool order. An empty
/// query matches nothing; callers wanting a usage hint must pre-check.
pub fn match_in_pool(items: &HashMap<Uuid, Item>, pool: &[Uuid], query: &str) -> Vec<Uuid> {
    let query_fragments = fragments(query);
    if query_fragments.is_empty() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    for id in pool {
        let Some(item) = items.get(id) else {
            warn!("match_in_pool: pool references unknown item id {id}");
            continue;
        };
        if name_matches(&query_fragments, &item.name) && !matches.contains(id) {
            matches.push(*id);
        }
    }
    matches
}

/// Ids of the containers within a pool, in pool order.
pub fn containers_in(items: &HashMap<Uuid, Item>, pool: &[Uuid]) -> Vec<Uuid> {
    pool.iter()
        .filter(|id| items.get(*id).is_some_and(|item| item.kind.is_container()))
        .copied()
        .collect()
}

/// Resolve a query to a container, searching the player's inventory first
/// and the current scene second.
pub fn find_container(world: &AthoraWorld, query: &str) -> Option<Uuid> {
    let scene = match world.player_scene_ref() {
        Ok(scene) => scene,
        Err(e) => {
            error!("while resolving a container: {e}");
            return None;
        },
    };
    match_in_pool(&world.items, world.player.inventory.items(), query)
        .into_iter()
        .chain(match_in_pool(&world.items, &scene.contents, query))
        .find(|id| world.items.get(id).is_some_and(|item| item.kind.is_container()))
}

/// Resolve a query to an enemy in the current scene. Dead enemies resolve
/// too; the attack handler refuses them itself.
pub fn find_enemy(world: &AthoraWorld, query: &str) -> Option<Uuid> {
    let scene = match world.player_scene_ref() {
        Ok(scene) => scene,
        Err(e) => {
            error!("while resolving an enemy: {e}");
            return None;
        },
    };
    match_in_pool(&world.items, &scene.contents, query)
        .into_iter()
        .find(|id| world.items.get(id).is_some_and(|item| item.kind.is_enemy()))
}
