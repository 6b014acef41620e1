//! # Trailsense - room pathfinding and tracking for MUD worlds
//!
//! Trailsense answers one question for a DikuMUD-style room graph: standing in
//! room A, which exit is the first step of a shortest route to room B? On top
//! of that answer it builds the behaviours that need it.
//!
//! ## Features
//!
//! - **First-step search**: breadth-first search with deterministic tie-breaking,
//!   zone scoping, door and no-track handling, and a reusable search buffer.
//! - **Track command**: survival check, fog and untrackable handling, misleading
//!   guesses on failure, wilderness headings by coordinates.
//! - **NPC pursuit**: hunting a victim or a remembered enemy, walking back to a
//!   load room, following patrol waypoints.
//! - **World files**: JSON room seeds with named exits, doors and flags.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trailsense::mobile::{do_track, Character, Feat, Location, Realm, StandardHost};
//! use trailsense::world::load_world_from_json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let world = load_world_from_json("data/seeds/world.json")?;
//!     let market = world.real_room(3001).expect("market square");
//!     let temple = world.real_room(3005).expect("temple");
//!
//!     let mut realm = Realm::new(world);
//!     let ranger = realm.roster.add(
//!         Character::player("Ranger", 1, Location::Room(market))
//!             .with_level(34)
//!             .with_feat(Feat::Track),
//!     );
//!     realm
//!         .roster
//!         .add(Character::player("Thief", 2, Location::Room(temple)));
//!
//!     let mut host = StandardHost::seeded(7);
//!     do_track(&mut realm, &mut host, ranger, "thief")?;
//!     for line in host.texts_to(ranger) {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`world`] - rooms, exits, zones and world-file loading
//! - [`pathfind`] - the breadth-first first-step search
//! - [`mobile`] - characters, `track`, hunting, patrols and the host hooks
//! - [`config`] - TOML configuration for the binary
//! - [`errors`] - the crate error type
//! - [`logutil`] - log sanitising helpers

pub mod config;
pub mod errors;
pub mod logutil;
pub mod mobile;
pub mod pathfind;
pub mod world;

pub use errors::TrailError;
pub use pathfind::{PathResult, Pathfinder, SearchPolicy, ZoneScope};
