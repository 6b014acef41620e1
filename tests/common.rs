//! Test utilities & fixtures.
//! Small hand-built worlds plus access to the sample seed file under `data/seeds`.

#![allow(dead_code)] // each test binary uses a different subset

use std::path::{Path, PathBuf};

use trailsense::mobile::{ScriptedDice, StandardHost};
use trailsense::world::{Direction, Room, RoomId, World};

/// Path to the sample world shipped with the crate.
pub fn sample_world_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("seeds")
        .join("world.json")
}

/// Rooms 0..n in one zone, chained west to east: 0 <-> 1 <-> ... <-> n-1.
pub fn linear_zone(n: u32) -> (World, Vec<RoomId>) {
    let mut world = World::new();
    let ids: Vec<RoomId> = (0..n)
        .map(|v| {
            world
                .add_room(Room::new(v, 1, &format!("Room {}", v)))
                .expect("unique vnum")
        })
        .collect();
    for pair in ids.windows(2) {
        world.link_both(pair[0], Direction::East, pair[1]);
    }
    (world, ids)
}

/// A `side` x `side` grid in zone 1, vnums row-major from the north-west
/// corner, linked east/west and north/south.
pub fn grid_zone(side: u32) -> (World, Vec<RoomId>) {
    let mut world = World::new();
    let ids: Vec<RoomId> = (0..side * side)
        .map(|v| world.add_room(Room::new(v, 1, "Field")).expect("unique vnum"))
        .collect();
    let side = side as usize;
    for row in 0..side {
        for col in 0..side {
            let here = ids[row * side + col];
            if col + 1 < side {
                world.link_both(here, Direction::East, ids[row * side + col + 1]);
            }
            if row + 1 < side {
                world.link_both(here, Direction::South, ids[(row + 1) * side + col]);
            }
        }
    }
    (world, ids)
}

/// Host whose dice replay `rolls` in order.
pub fn scripted_host(rolls: &[i32]) -> StandardHost<ScriptedDice> {
    StandardHost::new(ScriptedDice::new(rolls.iter().copied()))
}
