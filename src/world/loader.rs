//! World file loader.
//!
//! Worlds are plain JSON seed files: a list of rooms, each with its vnum,
//! zone, flags and exits keyed by direction name. Exit destinations are vnums
//! and are resolved to [`RoomId`]s once every room is known.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::TrailError;
use crate::world::graph::World;
use crate::world::types::{Direction, Exit, ExitFlag, Room, RoomFlag, Vnum, ZoneId};

/// Load a world from a JSON seed file.
pub fn load_world_from_json<P: AsRef<Path>>(path: P) -> Result<World, TrailError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let world = parse_world(&contents)?;
    info!(
        "Loaded {} rooms in {} zones from {}",
        world.room_count(),
        world.zones().len(),
        path.display()
    );
    Ok(world)
}

/// Build a world from JSON seed text.
pub fn parse_world(contents: &str) -> Result<World, TrailError> {
    let seeds: Vec<RoomSeed> = serde_json::from_str(contents)?;
    build_world(seeds)
}

pub fn build_world(seeds: Vec<RoomSeed>) -> Result<World, TrailError> {
    let mut world = World::new();

    for seed in &seeds {
        let mut room = Room::new(seed.vnum, seed.zone, &seed.name);
        for flag in &seed.flags {
            room = room.with_flag(flag.parse::<RoomFlag>()?);
        }
        world.add_room(room)?;
    }

    for seed in &seeds {
        let from = world
            .real_room(seed.vnum)
            .ok_or(TrailError::UnknownRoom(seed.vnum))?;
        for (dir_name, exit_seed) in &seed.exits {
            let dir: Direction = dir_name.parse()?;
            let mut exit = match world.real_room(exit_seed.to) {
                Some(to) => Exit::to(to),
                None => {
                    warn!(
                        "Room {} exit {} leads to unknown vnum {}; exit disabled",
                        seed.vnum, dir, exit_seed.to
                    );
                    Exit::nowhere()
                }
            };
            if exit_seed.door {
                exit.set_flag(ExitFlag::IsDoor);
            }
            if exit_seed.closed {
                exit.set_flag(ExitFlag::Closed);
            }
            world.set_exit(from, dir, exit);
        }
    }

    Ok(world)
}

/// Render a world back to seed form.
///
/// Exits that lead nowhere (including those loaded from unknown vnums) have
/// no vnum to write and are left out, so such an exit does not survive a
/// save and reload.
pub fn world_to_seeds(world: &World) -> Vec<RoomSeed> {
    world
        .rooms()
        .map(|(_, room)| {
            let exits = Direction::ALL
                .iter()
                .filter_map(|dir| {
                    let exit = room.exit(*dir)?;
                    let Some(to) = exit.to_room.and_then(|id| world.vnum_of(id)) else {
                        debug!("room {} exit {} leads nowhere; not rendered", room.vnum, dir);
                        return None;
                    };
                    Some((
                        dir.name().to_string(),
                        ExitSeed {
                            to,
                            door: exit.is_door(),
                            closed: exit.is_closed(),
                        },
                    ))
                })
                .collect();
            RoomSeed {
                vnum: room.vnum,
                zone: room.zone,
                name: room.name.clone(),
                flags: room
                    .flags
                    .iter()
                    .filter_map(|f| serde_json::to_value(f).ok())
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                exits,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSeed {
    pub vnum: Vnum,
    pub zone: ZoneId,
    pub name: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub exits: BTreeMap<String, ExitSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitSeed {
    pub to: Vnum,
    #[serde(default)]
    pub door: bool,
    #[serde(default)]
    pub closed: bool,
}
