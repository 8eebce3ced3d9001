//! REPL and command handling.
//!
//! The game runs in a read-eval-print loop: read a line, parse it into a
//! [`Command`], dispatch to the matching action handler, flush the view.
//! Input prefers rustyline when a terminal is attached and falls back to
//! plain stdin otherwise.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use log::{info, warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::actions::{
    CombatTimerSignal, attack_handler, drop_handler, eat_handler, put_in_handler, read_handler, take_from_handler,
    take_handler,
};
use crate::command::{Command, parse_command};
use crate::entity_search::{find_container, find_enemy};
use crate::item::aggregate_mass;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};
use crate::world::AthoraWorld;

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the player quits or dies.
///
/// # Errors
/// - Propagates failures from handlers, such as a missing scene for the player.
pub fn run_repl(world: &mut AthoraWorld) -> Result<()> {
    let mut view = View::new();
    let mut input = InputManager::new();
    // turns since the last landed attack; attack_handler signals resets
    let mut combat_timer: u32 = 0;

    loop {
        let prompt = format!(
            "[HP: {}{}]> ",
            world.player.health.current(),
            if world.player.combat { " | in combat" } else { "" }
        )
        .prompt_style()
        .to_string();

        let event = match input.read_line(&prompt) {
            Ok(event) => event,
            Err(err) => {
                view.push(ViewItem::Error(format!("Failed to read input ({err}). Try again.")));
                view.flush();
                continue;
            },
        };
        let line = match event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };

        match parse_command(&line) {
            Command::Look => look_handler(world, &mut view)?,
            Command::Inventory => inventory_handler(world, &mut view),
            Command::Health => health_handler(world, &mut view),
            Command::Help => help_handler(&mut view),
            Command::Quit => {
                if let ReplControl::Quit = quit_handler(world, &mut view) {
                    view.flush();
                    break;
                }
            },
            Command::Take(query) => take_handler(world, &mut view, &query)?,
            Command::Drop(query) => drop_handler(world, &mut view, &query)?,
            Command::Eat(query) => eat_handler(world, &mut view, &query)?,
            Command::Read(query) => read_handler(world, &mut view, &query)?,
            Command::PutIn { item, container } => {
                let resolved = find_container(world, &container);
                put_in_handler(world, &mut view, &item, resolved)?;
            },
            Command::TakeFrom { item, container } => {
                let resolved = find_container(world, &container);
                take_from_handler(world, &mut view, &item, resolved)?;
            },
            Command::Attack { enemy, weapon } => {
                let resolved = find_enemy(world, &enemy);
                match attack_handler(world, &mut view, &weapon, resolved)? {
                    CombatTimerSignal::Reset => {
                        combat_timer = 0;
                        info!("combat timer reset");
                    },
                    CombatTimerSignal::Untouched => {},
                }
            },
            Command::Unknown => {
                view.push(ViewItem::Error("Didn't quite catch that. Try \"help\".".to_string()));
            },
        }
        combat_timer = combat_timer.saturating_add(1);

        view.flush();

        if !world.player.health.is_alive() {
            println!("{}", "You have died. The adventure ends here.".combat_style());
            info!("player died after {combat_timer} turn(s) since last landing a blow");
            break;
        }
    }
    Ok(())
}

/// Shows a description of the player's surroundings.
///
/// # Errors
/// Returns an error if the player's current scene cannot be resolved.
pub fn look_handler(world: &AthoraWorld, view: &mut View) -> Result<()> {
    let scene = world.player_scene_ref()?;
    let item_lines = scene
        .contents
        .iter()
        .filter_map(|id| world.items.get(id))
        .map(|item| item.name.clone())
        .collect();
    view.push(ViewItem::SceneOverview {
        name: scene.name.clone(),
        description: scene.description.clone(),
        item_lines,
    });
    Ok(())
}

/// Lists the player's inventory with each item's effective mass.
pub fn inventory_handler(world: &AthoraWorld, view: &mut View) {
    let lines = world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .map(|item| format!("{} ({} mass)", item.name, aggregate_mass(&world.items, item.id)))
        .collect();
    view.push(ViewItem::InventoryList {
        lines,
        total_mass: world.player.inventory.total_mass(&world.items),
        max_mass: world.player.inventory.max_mass(),
    });
}

/// Reports the player's current health and combat state.
pub fn health_handler(world: &AthoraWorld, view: &mut View) {
    view.push(ViewItem::HealthReport {
        current: world.player.health.current(),
        max: world.player.health.max(),
        combat: world.player.combat,
    });
}

/// Lists the recognized commands.
pub fn help_handler(view: &mut View) {
    view.push(ViewItem::EngineMessage(
        "Commands:\n\
         \tlook | inventory | health\n\
         \ttake [item] | drop [item]\n\
         \ttake [item] out of [container] | put [item] in [container]\n\
         \teat [item] | read [item]\n\
         \tattack [enemy] with [weapon] | swing [weapon] at [enemy]\n\
         \thelp | quit"
            .to_string(),
    ));
}

/// Log the final state and say goodbye.
pub fn quit_handler(world: &AthoraWorld, view: &mut View) -> ReplControl {
    info!("player quit on {} HP; ending inventory:", world.player.health.current());
    world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .for_each(|item| info!("- {} ({})", item.name, item.id));
    view.push(ViewItem::EngineMessage("Thanks for playing.".to_string()));
    ReplControl::Quit
}

/// Outcome of reading a line from the REPL input.
enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Interactive input backend: rustyline when stdin is a terminal, plain
/// stdin otherwise.
struct InputManager {
    editor: Option<DefaultEditor>,
}

impl InputManager {
    fn new() -> InputManager {
        let editor = if io::stdin().is_terminal() {
            match DefaultEditor::new() {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Some(editor)
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    None
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            None
        };
        InputManager { editor }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match &mut self.editor {
            Some(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty()
                        && let Err(err) = editor.add_history_entry(line.as_str())
                    {
                        warn!("failed to append to history: {err}");
                    }
                    Ok(InputEvent::Line(line))
                },
                Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
                Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
                Err(ReadlineError::Io(io_err)) => Err(io_err),
                Err(other) => Err(io::Error::other(other)),
            },
            None => {
                print!("{prompt}");
                io::stdout().flush()?;
                let mut buffer = String::new();
                let bytes = io::stdin().read_line(&mut buffer)?;
                if bytes == 0 {
                    return Ok(InputEvent::Eof);
                }
                Ok(InputEvent::Line(buffer.trim_end().to_string()))
            },
        }
    }
}
