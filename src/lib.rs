#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const ATHORA_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod actions;
pub mod command;
pub mod entity_search;
pub mod health;
pub mod idgen;
pub mod inventory;
pub mod item;
pub mod loader;
pub mod player;
pub mod repl;
pub mod scene;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use inventory::Inventory;
pub use item::{Item, ItemHolder, ItemKind, TakePolicy, TakeRule};
pub use loader::load_world;
pub use player::Player;
pub use repl::run_repl;
pub use scene::Scene;
pub use view::{View, ViewItem};
pub use world::{AthoraWorld, Location, WorldObject};
