//! View module.
//!
//! Rather than printing from each handler, narration is aggregated here and
//! displayed at the end of the turn. Handlers push typed [`ViewItem`]s with
//! plain narration parameters; `flush` owns word-wrapping, coloring, and
//! printing.

use colored::Colorize;
use textwrap::{fill, termwidth};

use crate::style::GameStyle;

/// Aggregates narration produced during one pass through the REPL, then
/// wraps, styles, and prints it.
#[derive(Debug, Default)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewItem>,
}

/// One unit of narration for the current turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewItem {
    /// Name, description, and item names for the current scene.
    SceneOverview {
        name: String,
        description: String,
        item_lines: Vec<String>,
    },
    /// Inventory listing with the current mass load.
    InventoryList {
        lines: Vec<String>,
        total_mass: u32,
        max_mass: u32,
    },
    /// Current player health.
    HealthReport { current: i32, max: i32, combat: bool },
    /// An action went through.
    ActionSuccess(String),
    /// An action was refused; nothing changed.
    ActionFailure(String),
    /// The player needs to supply more of a command.
    UsageHint { hint: String, syntax: String },
    /// Literal text read off an item.
    ItemText { name: String, text: String },
    /// The player took damage.
    PlayerHarmed { cause: Option<String>, amount: u32 },
    /// Combat narration (exchanges, engagement).
    CombatUpdate(String),
    /// Combat has ended.
    CombatOver(String),
    /// Non-diegetic engine output (help, farewell).
    EngineMessage(String),
    /// Something the parser or a handler couldn't make sense of.
    Error(String),
}

impl View {
    /// Create a new empty view sized to the terminal.
    pub fn new() -> View {
        View {
            width: termwidth().min(100),
            items: Vec::new(),
        }
    }

    /// Queue a `ViewItem` for the end of the turn.
    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Wrap, style, and print everything queued this turn, in push order.
    pub fn flush(&mut self) {
        // re-check terminal width in case it's been resized
        self.width = termwidth().min(100);

        for item in &self.items {
            match item {
                ViewItem::SceneOverview {
                    name,
                    description,
                    item_lines,
                } => {
                    println!("{}", name.scene_style());
                    println!("{}", fill(description, self.width).description_style());
                    if item_lines.is_empty() {
                        println!("{}", "There is nothing of note here.".dimmed());
                    } else {
                        println!("You can see:");
                        for line in item_lines {
                            println!("\t{}", line.item_style());
                        }
                    }
                },
                ViewItem::InventoryList {
                    lines,
                    total_mass,
                    max_mass,
                } => {
                    println!("{}", "Inventory".item_style().underline().bold());
                    if lines.is_empty() {
                        println!("{}", "You aren't carrying anything.".italic().dimmed());
                    } else {
                        for line in lines {
                            println!("\t{}", line.item_style());
                        }
                    }
                    println!("Carrying {total_mass}/{max_mass} mass.");
                },
                ViewItem::HealthReport { current, max, combat } => {
                    println!("Health: {current}/{max} HP");
                    if *combat {
                        println!("{}", "You are in combat.".combat_style());
                    }
                },
                ViewItem::ActionSuccess(msg) => println!("{}", fill(msg, self.width).narration_style()),
                ViewItem::ActionFailure(msg) => println!("{}", fill(msg, self.width).narration_style()),
                ViewItem::UsageHint { hint, syntax } => {
                    println!("{hint}");
                    println!("{}", format!("Syntax: {syntax}").usage_style());
                },
                ViewItem::ItemText { name, text } => {
                    println!("The {} reads:", name.item_style());
                    println!("{}", fill(text, self.width).description_style());
                },
                ViewItem::PlayerHarmed { cause, amount } => {
                    let line = match cause {
                        Some(cause) => format!("{cause} -{amount} HP"),
                        None => format!("-{amount} HP"),
                    };
                    println!("{}", line.harm_style());
                },
                ViewItem::CombatUpdate(msg) => println!("{}", fill(msg, self.width).combat_style()),
                ViewItem::CombatOver(msg) => println!("{}", fill(msg, self.width).calm_style()),
                ViewItem::EngineMessage(msg) => println!("{msg}"),
                ViewItem::Error(msg) => println!("{}", msg.error_style()),
            }
        }

        // clear the buffer for the next turn
        self.items.clear();
        println!();
    }
}
