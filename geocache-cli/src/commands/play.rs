//! Gameplay commands.
//!
//! Each invocation loads the saved session, performs one action, prints what
//! the player sees and saves the session again.

use std::io::{self, Write};

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use geocache::cache::GeoCache;
use geocache::coord::{Direction, LatLng};
use geocache::world::{TransactionOutcome, WorldState};

use super::common::{parse_cache_id, DirectionArg};
use crate::error::CliError;
use crate::runner::{CliRunner, RunOptions};

/// Gameplay subcommands.
#[derive(Debug, Subcommand)]
pub enum PlayCommands {
    /// Show your position and the caches in view
    Look,

    /// Walk one or more cells in a direction
    Move {
        /// Direction to walk
        #[arg(value_enum)]
        direction: DirectionArg,

        /// Number of cells to walk
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        steps: u32,
    },

    /// Jump to a coordinate, as reported by a GPS fix
    Goto {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// Take the top coin from a cache
    Collect {
        /// Cache id (e.g., cache_369893_-1220630)
        cache: String,
    },

    /// Drop your most recently collected coin into a cache
    Deposit {
        /// Cache id (e.g., cache_369893_-1220630)
        cache: String,
    },

    /// Walk straight to a known cache
    Center {
        /// Cache id (e.g., cache_369893_-1220630)
        cache: String,
    },

    /// List the coins you are holding
    Inventory,

    /// Show where you have been
    History {
        /// Only show the most recent positions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Forget all progress and start over at the origin
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl PlayCommands {
    /// Command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            PlayCommands::Look => "look",
            PlayCommands::Move { .. } => "move",
            PlayCommands::Goto { .. } => "goto",
            PlayCommands::Collect { .. } => "collect",
            PlayCommands::Deposit { .. } => "deposit",
            PlayCommands::Center { .. } => "center",
            PlayCommands::Inventory => "inventory",
            PlayCommands::History { .. } => "history",
            PlayCommands::Reset { .. } => "reset",
        }
    }
}

/// Run a gameplay subcommand.
pub fn run(command: PlayCommands, options: &RunOptions) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup(command.name());

    if let PlayCommands::Reset { yes: false } = command {
        let confirmed = Confirm::new()
            .with_prompt("Forget all caches and coins and start over?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    let mut world = runner.load_world()?;
    let stdout = io::stdout();
    execute(&mut world, command, &mut stdout.lock())?;
    runner.save_world(&world)
}

/// Apply `command` to `world` and render the result to `out`.
pub fn execute<W: Write>(
    world: &mut WorldState,
    command: PlayCommands,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        PlayCommands::Look => {
            let visible = world.visible_caches();
            render_view(out, world, &visible)?;
        }
        PlayCommands::Move { direction, steps } => {
            let direction = Direction::from(direction);
            let mut visible = Vec::new();
            for _ in 0..steps {
                visible = world.step(direction);
            }
            writeln!(out, "Walked {} {} cell(s).", direction, steps)?;
            render_view(out, world, &visible)?;
        }
        PlayCommands::Goto { lat, lng } => {
            let visible = world.relocate(LatLng::new(lat, lng))?;
            render_view(out, world, &visible)?;
        }
        PlayCommands::Collect { cache } => {
            let id = parse_cache_id(&cache)?;
            let outcome = world.collect(&id);
            render_outcome(out, &outcome)?;
        }
        PlayCommands::Deposit { cache } => {
            let id = parse_cache_id(&cache)?;
            let outcome = world.deposit(&id);
            render_outcome(out, &outcome)?;
        }
        PlayCommands::Center { cache } => {
            let id = parse_cache_id(&cache)?;
            match world.center_on(&id) {
                Some(visible) => render_view(out, world, &visible)?,
                None => render_outcome(out, &TransactionOutcome::UnknownCache(id))?,
            }
        }
        PlayCommands::Inventory => render_inventory(out, world)?,
        PlayCommands::History { limit } => render_history(out, world, limit)?,
        PlayCommands::Reset { .. } => {
            world.reset();
            writeln!(out, "World reset. You are back at {}.", world.player().position())?;
        }
    }
    Ok(())
}

fn render_outcome<W: Write>(out: &mut W, outcome: &TransactionOutcome) -> io::Result<()> {
    if outcome.is_success() {
        writeln!(out, "{}", style(outcome).green())
    } else {
        writeln!(out, "{}", style(outcome).yellow())
    }
}

/// Position header followed by the visible caches, nearest first.
fn render_view<W: Write>(out: &mut W, world: &WorldState, visible: &[GeoCache]) -> io::Result<()> {
    let here = world.current_cell();
    writeln!(
        out,
        "{} {} cell {}",
        style("Position").bold(),
        world.player().position(),
        here
    )?;
    writeln!(out, "Holding {} coin(s)", world.player().coin_count())?;
    writeln!(out)?;

    if visible.is_empty() {
        return writeln!(out, "No caches in view.");
    }

    let mut caches: Vec<&GeoCache> = visible.iter().collect();
    caches.sort_by_key(|c| (c.cell().chebyshev_distance(&here), c.id()));

    writeln!(out, "{} ({})", style("Caches in view").bold(), caches.len())?;
    let visited = world.player().visited();
    for cache in caches {
        let marker = if visited.contains(&cache.id()) { "*" } else { " " };
        let coins = if cache.is_empty() {
            style(format!("{:>2} coins", 0)).dim()
        } else {
            style(format!("{:>2} coins", cache.coin_count())).cyan()
        };
        writeln!(
            out,
            " {} {:<28} {}  {} away",
            marker,
            cache.id().to_string(),
            coins,
            cache.cell().chebyshev_distance(&here)
        )?;
    }
    Ok(())
}

fn render_inventory<W: Write>(out: &mut W, world: &WorldState) -> io::Result<()> {
    let coins = world.player().inventory();
    if coins.is_empty() {
        return writeln!(out, "You are not holding any coins.");
    }

    writeln!(out, "Holding {} coin(s):", coins.len())?;
    for (n, coin) in coins.iter().enumerate().rev() {
        if n + 1 == coins.len() {
            writeln!(out, "  {}  {}", coin, style("(next to deposit)").dim())?;
        } else {
            writeln!(out, "  {}", coin)?;
        }
    }
    Ok(())
}

fn render_history<W: Write>(out: &mut W, world: &WorldState, limit: Option<usize>) -> io::Result<()> {
    let history = world.player().history();
    if history.is_empty() {
        return writeln!(out, "You have not moved yet.");
    }

    let skip = limit.map_or(0, |n| history.len().saturating_sub(n));
    for (n, position) in history.iter().enumerate().skip(skip) {
        writeln!(out, "{:>4}  {}", n + 1, position)?;
    }
    Ok(())
}
