//! Binary entrypoint for the trailsense CLI.
//!
//! Commands:
//! - `init` - write a starter `trailsense.toml`
//! - `check` - load the configured world and summarise it
//! - `route <from> <to>` - first step from one room vnum towards another
//! - `distance <from> <to>` - rooms on the shortest route, if any
//! - `walk <from> <to>` - follow first steps until arrival and print the route
//!
//! See the library crate docs for module-level details: `trailsense::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use trailsense::config::Config;
use trailsense::pathfind::{PathResult, Pathfinder};
use trailsense::world::{load_world_from_json, RoomId, Vnum, World};

#[derive(Parser)]
#[command(name = "trailsense")]
#[command(about = "Room pathfinding and tracking for MUD worlds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "trailsense.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Load the world file and report rooms and zones
    Check,
    /// Print the first step from one room towards another
    Route { from: Vnum, to: Vnum },
    /// Count the rooms between two rooms
    Distance { from: Vnum, to: Vnum },
    /// Follow first steps from one room to another
    Walk { from: Vnum, to: Vnum },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        Config::create_default(&cli.config).await?;
        println!("Wrote default configuration to {}", cli.config);
        return Ok(());
    }

    let config = Config::load(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);
    config.validate()?;

    let world = load_world_from_json(&config.world.path)?;
    let mut pathfinder = Pathfinder::with_capacity(world.room_count());
    let policy = config.pathfinding;

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Check => {
            let zones = world.zones();
            println!(
                "{}: {} rooms in {} zones",
                config.world.path,
                world.room_count(),
                zones.len()
            );
            let dangling = world
                .rooms()
                .flat_map(|(_, room)| room.exits.iter().flatten())
                .filter(|exit| exit.to_room.is_none())
                .count();
            if dangling > 0 {
                warn!("{} exits lead nowhere", dangling);
            }
        }
        Commands::Route { from, to } => {
            let (src, target) = (lookup(&world, from)?, lookup(&world, to)?);
            match pathfinder.find_first_step(&world, src, target, &policy) {
                PathResult::Step(dir) => println!("{} -> {}: go {}", from, to, dir),
                PathResult::AlreadyThere => println!("{} -> {}: already there", from, to),
                PathResult::NoPath => println!("{} -> {}: no path", from, to),
                PathResult::Error => println!("{} -> {}: invalid rooms", from, to),
            }
        }
        Commands::Distance { from, to } => {
            let (src, target) = (lookup(&world, from)?, lookup(&world, to)?);
            match pathfinder.count_rooms_between(&world, src, target, &policy) {
                Some(n) => println!("{} -> {}: {} rooms", from, to, n),
                None => println!("{} -> {}: unreachable", from, to),
            }
        }
        Commands::Walk { from, to } => {
            let (mut here, target) = (lookup(&world, from)?, lookup(&world, to)?);
            let mut route = Vec::new();
            for _ in 0..world.room_count() {
                let dir = match pathfinder.find_first_step(&world, here, target, &policy) {
                    PathResult::Step(dir) => dir,
                    PathResult::AlreadyThere => break,
                    other => return Err(anyhow!("walk from {} to {} stopped: {}", from, to, other)),
                };
                here = world
                    .exit_target(here, dir)
                    .ok_or_else(|| anyhow!("exit {} vanished mid-walk", dir))?;
                route.push(dir.name());
            }
            info!("walked {} steps from {} to {}", route.len(), from, to);
            if route.is_empty() {
                println!("{} -> {}: already there", from, to);
            } else {
                println!("{} -> {}: {}", from, to, route.join(" "));
            }
        }
    }

    Ok(())
}

fn lookup(world: &World, vnum: Vnum) -> Result<RoomId> {
    world
        .real_room(vnum)
        .ok_or_else(|| anyhow!("no room with vnum {}", vnum))
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let configured = config
        .as_ref()
        .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    // CLI verbosity overrides config
    let level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Mutex::new(f);
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
