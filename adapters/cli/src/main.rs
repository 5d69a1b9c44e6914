#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Quiz experience.

mod catalog;

use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use maze_quiz_core::{Command, Direction, Event, ObjectKind};
use maze_quiz_system_bootstrap::{Bootstrap, Session};
use maze_quiz_system_decoder::{DecodeConfig, ValidationMode};
use maze_quiz_world::{self as world, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use self::catalog::MazeCatalog;

/// Plays a Maze Quiz maze from the terminal.
#[derive(Debug, Parser)]
#[command(name = "maze-quiz", version, about)]
struct CliArgs {
    /// Path to the JSON maze catalog.
    #[arg(long, default_value = "assets/mazes.json")]
    catalog: PathBuf,
    /// Name of the maze to play.
    #[arg(long, default_value = "maze-1")]
    maze: String,
    /// Seed for object placement; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Refuse to start when the maze fails validation.
    #[arg(long)]
    strict: bool,
    /// Comma or whitespace separated moves; stdin is read line by line when omitted.
    #[arg(long)]
    moves: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Finished,
}

/// Entry point for the Maze Quiz command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let catalog = MazeCatalog::from_path(&args.catalog)?;
    let definition = catalog.maze(&args.maze)?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let validation = if args.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };
    let bootstrap = Bootstrap::new(DecodeConfig::default().with_validation(validation));
    println!("{}", bootstrap.welcome_banner());

    tracing::info!(maze = %args.maze, seed, "starting session");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let Session {
        mut world,
        diagnostics,
    } = bootstrap
        .start(definition, &mut rng)
        .with_context(|| format!("failed to start maze `{}`", args.maze))?;
    if !diagnostics.is_empty() {
        tracing::warn!(
            problems = diagnostics.len(),
            "maze loaded despite validation problems"
        );
    }

    match args.moves {
        Some(script) => {
            let moves = script
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty());
            for input in moves {
                if step(&mut world, input) == Flow::Finished {
                    break;
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read move from stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                if step(&mut world, &line) == Flow::Finished {
                    break;
                }
            }
        }
    }

    println!(
        "Finished at {} with {} object(s) left.",
        query::player(&world),
        query::remaining_objects(&world)
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn step(world: &mut World, input: &str) -> Flow {
    let direction = match input.parse::<Direction>() {
        Ok(direction) => direction,
        Err(error) => {
            tracing::error!(%error, "ignoring move");
            return Flow::Continue;
        }
    };

    let mut events = Vec::new();
    world::apply(world, Command::MovePlayer { direction }, &mut events);

    let mut flow = Flow::Continue;
    for event in events {
        match event {
            Event::PlayerMoved { to, .. } => println!("moved {direction} to {to}"),
            Event::MoveBlocked { at, .. } => println!("blocked: wall {direction} of {at}"),
            Event::ObjectTriggered { cell, kind } => {
                println!("found {kind} at {cell}");
                if kind == ObjectKind::Flag {
                    flow = Flow::Finished;
                }
            }
        }
    }
    flow
}
