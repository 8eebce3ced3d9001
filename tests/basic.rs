use std::path::Path;

use athora_engine as ae;

use ae::actions::{
    CombatTimerSignal, attack_handler, drop_handler, eat_handler, put_in_handler, read_handler, take_from_handler,
    take_handler,
};
use ae::entity_search::{find_container, find_enemy};
use ae::health::HealthState;
use ae::item::aggregate_mass;
use ae::scene::{Coordinate, Scene};
use ae::{AthoraWorld, Inventory, Item, ItemHolder, ItemKind, Location, TakePolicy, TakeRule, View, ViewItem};
use uuid::Uuid;

/// World with one scene and the player standing in it.
fn world_with_scene(carry_capacity: u32) -> (AthoraWorld, Uuid) {
    let mut world = AthoraWorld::new_empty();
    let scene = Scene::new("clearing", "Forest Clearing", "Grass and sunlight.", Coordinate::default());
    let scene_id = scene.id;
    world.scenes.insert(scene_id, scene);
    world.player = ae::Player::new(100, carry_capacity, scene_id);
    (world, scene_id)
}

/// Put a new item down in the given scene and return its id.
fn spawn_in_scene(world: &mut AthoraWorld, scene_id: Uuid, item: Item) -> Uuid {
    let id = world.insert_item(item);
    world.scenes.get_mut(&scene_id).unwrap().add_item(id);
    world.items.get_mut(&id).unwrap().location = Location::Scene(scene_id);
    id
}

fn plain(symbol: &str, name: &str, mass: u32, damage: u32) -> Item {
    Item::new(symbol, name, TakePolicy::takeable(), mass, damage, ItemKind::Plain)
}

fn scene_names(world: &AthoraWorld, scene_id: Uuid) -> Vec<String> {
    let mut names: Vec<String> = world.scenes[&scene_id]
        .contents
        .iter()
        .map(|id| world.items[id].name.clone())
        .collect();
    names.sort();
    names
}

#[test]
fn pick_up_then_drop_round_trips_the_scene() {
    let (mut world, scene_id) = world_with_scene(40);
    spawn_in_scene(&mut world, scene_id, plain("sword", "Rusty Sword", 4, 7));
    spawn_in_scene(&mut world, scene_id, plain("rock", "Gray Rock", 2, 1));
    let before = scene_names(&world, scene_id);

    let mut view = View::new();
    take_handler(&mut world, &mut view, "sword").unwrap();
    assert_eq!(world.player.inventory.len(), 1);
    assert_eq!(world.scenes[&scene_id].contents.len(), 1);

    drop_handler(&mut world, &mut view, "sword").unwrap();
    assert!(world.player.inventory.is_empty());
    assert_eq!(scene_names(&world, scene_id), before);
}

#[test]
fn misspelled_query_still_finds_the_item() {
    let (mut world, scene_id) = world_with_scene(40);
    let sword = spawn_in_scene(&mut world, scene_id, plain("sword", "Rusty Sword", 4, 7));

    let mut view = View::new();
    take_handler(&mut world, &mut view, "sord").unwrap();
    assert!(world.player.inventory.contains_item(sword));
}

#[test]
fn oversized_item_is_refused_and_stays_put() {
    let (mut world, scene_id) = world_with_scene(10);
    let anvil = spawn_in_scene(&mut world, scene_id, plain("anvil", "Iron Anvil", 15, 0));

    let mut view = View::new();
    take_handler(&mut world, &mut view, "anvil").unwrap();

    assert!(world.player.inventory.is_empty());
    assert!(world.scenes[&scene_id].contains_item(anvil));
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg.contains("too full")))
    );
}

#[test]
fn blocked_and_consequence_policies_apply() {
    let (mut world, scene_id) = world_with_scene(40);
    let stump = spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "stump",
            "Old Stump",
            TakePolicy {
                rule: TakeRule::Blocked,
                message: Some("The stump is rooted fast.".into()),
            },
            80,
            0,
            ItemKind::Plain,
        ),
    );
    let nettle = spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "nettle",
            "Stinging Nettle",
            TakePolicy {
                rule: TakeRule::Consequence,
                message: Some("The nettle stings your hand!".into()),
            },
            1,
            3,
            ItemKind::Plain,
        ),
    );

    let mut view = View::new();
    take_handler(&mut world, &mut view, "stump").unwrap();
    assert!(world.scenes[&scene_id].contains_item(stump));

    take_handler(&mut world, &mut view, "nettle").unwrap();
    assert!(world.scenes[&scene_id].contains_item(nettle));
    assert_eq!(world.player.health.current(), 97);
    assert!(world.player.inventory.is_empty());
}

#[test]
fn pick_up_reaches_into_scene_containers_when_nothing_matches_directly() {
    let (mut world, scene_id) = world_with_scene(40);
    let coin = world.insert_item(plain("coin", "Copper Coin", 1, 0));
    spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "satchel",
            "Leather Satchel",
            TakePolicy::takeable(),
            2,
            0,
            ItemKind::Container {
                contents: Inventory::with_items(20, vec![coin]),
            },
        ),
    );

    let mut view = View::new();
    take_handler(&mut world, &mut view, "coin").unwrap();
    assert!(world.player.inventory.contains_item(coin));
}

#[test]
fn eating_bread_heals_and_consumes_it() {
    let (mut world, _) = world_with_scene(40);
    let bread = world.insert_item(Item::new(
        "bread",
        "Bread",
        TakePolicy::takeable(),
        1,
        0,
        ItemKind::Food { saturation: 5 },
    ));
    world.player.inventory.add_item(bread);
    world.player.health.change(-50);
    assert_eq!(world.player.health.current(), 50);

    let mut view = View::new();
    eat_handler(&mut world, &mut view, "bread").unwrap();

    assert_eq!(world.player.health.current(), 55);
    assert!(world.player.inventory.is_empty());
    assert!(!world.items.contains_key(&bread));
}

#[test]
fn eating_a_sword_is_refused() {
    let (mut world, _) = world_with_scene(40);
    let sword = world.insert_item(plain("sword", "Rusty Sword", 4, 7));
    world.player.inventory.add_item(sword);

    let mut view = View::new();
    eat_handler(&mut world, &mut view, "sword").unwrap();

    assert!(world.player.inventory.contains_item(sword));
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg.contains("cannot eat")))
    );
}

#[test]
fn reading_shows_the_literal_text() {
    let (mut world, scene_id) = world_with_scene(40);
    spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "note",
            "Old Note",
            TakePolicy::takeable(),
            0,
            0,
            ItemKind::Readable {
                text: "Beware the goblin.".into(),
            },
        ),
    );

    let mut view = View::new();
    read_handler(&world, &mut view, "note").unwrap();
    assert!(view.items.iter().any(|i| matches!(
        i,
        ViewItem::ItemText { text, .. } if text == "Beware the goblin."
    )));
}

#[test]
fn container_round_trip_and_capacity() {
    let (mut world, scene_id) = world_with_scene(40);
    let coin = world.insert_item(plain("coin", "Copper Coin", 1, 1));
    world.player.inventory.add_item(coin);
    let anvil = spawn_in_scene(&mut world, scene_id, plain("anvil", "Iron Anvil", 30, 0));
    let satchel = spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "satchel",
            "Leather Satchel",
            TakePolicy::takeable(),
            2,
            1,
            ItemKind::Container {
                contents: Inventory::new(20),
            },
        ),
    );

    let mut view = View::new();
    let resolved = find_container(&world, "satchel");
    assert_eq!(resolved, Some(satchel));

    // coin fits and the container's damage aggregates
    put_in_handler(&mut world, &mut view, "coin in satchel", resolved).unwrap();
    assert!(world.items[&satchel].contents().unwrap().contains_item(coin));
    assert_eq!(ae::item::aggregate_damage(&world.items, satchel), 2);

    // the anvil does not fit
    put_in_handler(&mut world, &mut view, "anvil", resolved).unwrap();
    assert!(world.scenes[&scene_id].contains_item(anvil));
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg.contains("too full")))
    );

    // and the coin comes back out
    take_from_handler(&mut world, &mut view, "coin", resolved).unwrap();
    assert!(world.player.inventory.contains_item(coin));
    assert!(world.items[&satchel].contents().unwrap().is_empty());
}

#[test]
fn containers_never_nest() {
    let (mut world, scene_id) = world_with_scene(40);
    let pouch = world.insert_item(Item::new(
        "pouch",
        "Small Pouch",
        TakePolicy::takeable(),
        1,
        0,
        ItemKind::Container {
            contents: Inventory::new(5),
        },
    ));
    world.player.inventory.add_item(pouch);
    let chest = spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "chest",
            "Oak Chest",
            TakePolicy::takeable(),
            10,
            0,
            ItemKind::Container {
                contents: Inventory::new(50),
            },
        ),
    );

    let mut view = View::new();
    put_in_handler(&mut world, &mut view, "pouch", Some(chest)).unwrap();

    assert!(world.player.inventory.contains_item(pouch));
    assert!(world.items[&chest].contents().unwrap().is_empty());
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg.contains("container inside a container")))
    );
}

#[test]
fn take_from_respects_inventory_capacity() {
    let (mut world, scene_id) = world_with_scene(5);
    let ingot = world.insert_item(plain("ingot", "Lead Ingot", 9, 0));
    let chest = spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "chest",
            "Oak Chest",
            TakePolicy {
                rule: TakeRule::Blocked,
                message: None,
            },
            10,
            0,
            ItemKind::Container {
                contents: Inventory::with_items(20, vec![ingot]),
            },
        ),
    );

    let mut view = View::new();
    take_from_handler(&mut world, &mut view, "ingot", Some(chest)).unwrap();

    assert!(world.player.inventory.is_empty());
    assert!(world.items[&chest].contents().unwrap().contains_item(ingot));
}

fn goblin_with_loot(world: &mut AthoraWorld, scene_id: Uuid, health: i32) -> (Uuid, Uuid) {
    let coin = world.insert_item(plain("coin", "Copper Coin", 1, 0));
    let goblin = spawn_in_scene(
        world,
        scene_id,
        Item::new(
            "goblin",
            "Goblin",
            TakePolicy {
                rule: TakeRule::Blocked,
                message: None,
            },
            30,
            4,
            ItemKind::Enemy {
                health: HealthState::new_at_max(health),
                inventory: Inventory::with_items(15, vec![coin]),
            },
        ),
    );
    world.items.get_mut(&coin).unwrap().location = Location::Item(goblin);
    (goblin, coin)
}

#[test]
fn killing_an_enemy_drops_loot_and_renames_it() {
    let (mut world, scene_id) = world_with_scene(40);
    let (goblin, coin) = goblin_with_loot(&mut world, scene_id, 10);
    let sword = world.insert_item(plain("sword", "Rusty Sword", 4, 10));
    world.player.inventory.add_item(sword);

    let mut view = View::new();
    let resolved = find_enemy(&world, "goblin");
    assert_eq!(resolved, Some(goblin));
    let signal = attack_handler(&mut world, &mut view, "sword", resolved).unwrap();

    assert_eq!(signal, CombatTimerSignal::Reset);
    assert!(!world.items[&goblin].is_alive());
    assert_eq!(world.items[&goblin].name, "Dead Goblin");
    assert!(world.scenes[&scene_id].contains_item(coin));
    assert!(world.items[&goblin].contents().unwrap().is_empty());
    assert!(!world.player.combat);
    // the one-shot kill never put the player in combat, so no disengage line
    assert!(!view.items.iter().any(|i| matches!(i, ViewItem::CombatOver(_))));
    // the player took no hits
    assert_eq!(world.player.health.current(), 100);
}

#[test]
fn surviving_enemy_strikes_back_and_combat_engages_once() {
    let (mut world, scene_id) = world_with_scene(40);
    let (_goblin, _) = goblin_with_loot(&mut world, scene_id, 50);
    let sword = world.insert_item(plain("sword", "Rusty Sword", 4, 10));
    world.player.inventory.add_item(sword);

    let mut view = View::new();
    let resolved = find_enemy(&world, "goblin");
    attack_handler(&mut world, &mut view, "sword", resolved).unwrap();
    attack_handler(&mut world, &mut view, "sword", resolved).unwrap();

    assert!(world.player.combat);
    assert_eq!(world.player.health.current(), 100 - 2 * 4);
    let engage_lines = view
        .items
        .iter()
        .filter(|i| matches!(i, ViewItem::CombatUpdate(msg) if msg == "You are now in combat."))
        .count();
    assert_eq!(engage_lines, 1);

    // finish it off: 50 - 10 - 10 - 10*3 = dead on the fifth blow
    attack_handler(&mut world, &mut view, "sword", resolved).unwrap();
    attack_handler(&mut world, &mut view, "sword", resolved).unwrap();
    attack_handler(&mut world, &mut view, "sword", resolved).unwrap();
    assert!(!world.player.combat);
    let disengage_lines = view
        .items
        .iter()
        .filter(|i| matches!(i, ViewItem::CombatOver(msg) if msg == "You are no longer in combat."))
        .count();
    assert_eq!(disengage_lines, 1);
}

#[test]
fn attacking_a_corpse_is_refused() {
    let (mut world, scene_id) = world_with_scene(40);
    let (goblin, _) = goblin_with_loot(&mut world, scene_id, 10);
    let sword = world.insert_item(plain("sword", "Rusty Sword", 4, 10));
    world.player.inventory.add_item(sword);

    let mut view = View::new();
    attack_handler(&mut world, &mut view, "sword", Some(goblin)).unwrap();
    assert!(!world.items[&goblin].is_alive());

    let hp_after_kill = world.player.health.current();
    let signal = attack_handler(&mut world, &mut view, "sword", Some(goblin)).unwrap();
    assert_eq!(signal, CombatTimerSignal::Untouched);
    assert_eq!(world.player.health.current(), hp_after_kill);
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg.contains("already dead")))
    );
}

#[test]
fn food_is_not_a_weapon() {
    let (mut world, scene_id) = world_with_scene(40);
    let (goblin, _) = goblin_with_loot(&mut world, scene_id, 10);
    let bread = world.insert_item(Item::new(
        "bread",
        "Bread",
        TakePolicy::takeable(),
        1,
        0,
        ItemKind::Food { saturation: 5 },
    ));
    world.player.inventory.add_item(bread);

    let mut view = View::new();
    attack_handler(&mut world, &mut view, "bread", Some(goblin)).unwrap();
    assert!(world.items[&goblin].is_alive());
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg == "You don't have that."))
    );
}

#[test]
fn aggregate_mass_matches_base_plus_contents_through_actions() {
    let (mut world, scene_id) = world_with_scene(40);
    let coin = world.insert_item(plain("coin", "Copper Coin", 1, 0));
    world.player.inventory.add_item(coin);
    let satchel = spawn_in_scene(
        &mut world,
        scene_id,
        Item::new(
            "satchel",
            "Leather Satchel",
            TakePolicy::takeable(),
            2,
            0,
            ItemKind::Container {
                contents: Inventory::new(20),
            },
        ),
    );

    let mut view = View::new();
    put_in_handler(&mut world, &mut view, "coin", Some(satchel)).unwrap();
    assert_eq!(aggregate_mass(&world.items, satchel), 3);
    assert!(aggregate_mass(&world.items, satchel) >= world.items[&satchel].mass);
}

#[test]
fn bundled_demo_map_loads() {
    let world = ae::load_world(Path::new("data/demo.ron")).unwrap();
    assert!(world.player_scene_ref().is_ok());
    assert!(
        world
            .items
            .values()
            .any(|item| matches!(item.kind, ItemKind::Enemy { .. }))
    );
}
