//! Room graph model: rooms, exits, zones and world-file loading.

pub mod graph;
pub mod loader;
pub mod types;

pub use graph::World;
pub use loader::{build_world, load_world_from_json, parse_world, world_to_seeds, ExitSeed, RoomSeed};
pub use types::*;
