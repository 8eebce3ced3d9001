#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Athora **
//! Turn-based text adventure engine

use std::path::PathBuf;

use athora_engine::style::GameStyle;
use athora_engine::{ATHORA_VERSION, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

const DEFAULT_MAP: &str = "data/demo.ron";

const TITLE: &str = r"
       d8888 888    888
      d88888 888    888
     d88P888 888    888
    d88P 888 888888 88888b.   .d88b.  888d888 8888b.
   d88P  888 888    888 '88b d88''88b 888P'      '88b
  d88P   888 888    888  888 888  888 888    .d888888
 d8888888888 Y88b.  888  888 Y88..88P 888    888  888
d88P     888  'Y888 888  888  'Y88P'  888    'Y888888";

fn main() -> Result<()> {
    env_logger::init();

    let map_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_MAP), PathBuf::from);

    info!("Start: loading map from {}", map_path.display());
    let mut world = load_world(&map_path).context("while loading the world map")?;
    info!("world loaded successfully");

    println!("Hello. Welcome to");
    println!("{}  {}\n", TITLE, format!("v{ATHORA_VERSION}").yellow());
    println!(
        "{}",
        "Type \"help\" for the list of commands.".to_string().usage_style()
    );

    run_repl(&mut world)
}
