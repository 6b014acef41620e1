//! JSON world files: the shipped sample and hand-written edge cases.

mod common;

use std::io::Write;

use common::sample_world_path;
use trailsense::pathfind::{find_first_step, PathResult};
use trailsense::world::{
    build_world, load_world_from_json, parse_world, world_to_seeds, Direction, RoomFlag,
};
use trailsense::{SearchPolicy, TrailError};

#[test]
fn sample_world_loads() {
    let world = load_world_from_json(sample_world_path()).unwrap();
    assert_eq!(world.room_count(), 9);
    assert_eq!(world.zones().into_iter().collect::<Vec<_>>(), vec![30, 31]);

    let alley = world.real_room(3007).unwrap();
    assert!(world.room_flagged(alley, RoomFlag::NoTrack));

    // grain street's garden door starts closed
    let grain = world.real_room(3003).unwrap();
    assert!(world.exit(grain, Direction::North).unwrap().is_closed());
    assert!(!world.can_go(grain, Direction::North));

    // the sewer tunnel's east exit points at a room that does not exist
    let tunnel = world.real_room(3101).unwrap();
    assert!(world.exit(tunnel, Direction::East).is_some());
    assert_eq!(world.exit_target(tunnel, Direction::East), None);
}

#[test]
fn sample_world_routes_around_the_closed_door() {
    let world = load_world_from_json(sample_world_path()).unwrap();
    let grain = world.real_room(3003).unwrap();
    let garden = world.real_room(3004).unwrap();
    let policy = SearchPolicy::default();

    // back west through the square and up main street
    assert_eq!(
        find_first_step(&world, grain, garden, &policy),
        PathResult::Step(Direction::West)
    );
    assert_eq!(
        find_first_step(&world, grain, garden, &policy.through_doors(true)),
        PathResult::Step(Direction::North)
    );
}

#[test]
fn files_on_disk_round_trip_through_seeds() {
    let world = load_world_from_json(sample_world_path()).unwrap();
    let json = serde_json::to_string_pretty(&world_to_seeds(&world)).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    let again = load_world_from_json(file.path()).unwrap();

    assert_eq!(again.room_count(), world.room_count());
    let square = again.real_room(3001).unwrap();
    let street = again.real_room(3002).unwrap();
    assert_eq!(again.exit_target(square, Direction::North), Some(street));
}

#[test]
fn dead_exits_are_dropped_when_rendered() {
    let world = load_world_from_json(sample_world_path()).unwrap();
    let seeds = world_to_seeds(&world);
    let tunnel = seeds.iter().find(|s| s.vnum == 3101).unwrap();
    assert!(!tunnel.exits.contains_key("east"));
    assert!(!tunnel.exits.is_empty());

    let again = build_world(seeds).unwrap();
    let tunnel = again.real_room(3101).unwrap();
    assert!(again.exit(tunnel, Direction::East).is_none());
}

#[test]
fn duplicate_vnums_are_rejected() {
    let err = parse_world(
        r#"[{"vnum": 1, "zone": 0, "name": "A"}, {"vnum": 1, "zone": 0, "name": "B"}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, TrailError::DuplicateVnum(1)));
}

#[test]
fn bad_keywords_are_rejected() {
    let err = parse_world(
        r#"[{"vnum": 1, "zone": 0, "name": "A", "exits": {"sideways": {"to": 1}}}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, TrailError::UnknownDirection(_)));

    let err = parse_world(r#"[{"vnum": 1, "zone": 0, "name": "A", "flags": ["sparkly"]}]"#)
        .unwrap_err();
    assert!(matches!(err, TrailError::UnknownFlag(_)));

    assert!(matches!(
        parse_world("not json"),
        Err(TrailError::Json(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_world_from_json(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, TrailError::Io(_)));
}

#[test]
fn empty_seed_list_builds_an_empty_world() {
    let world = build_world(Vec::new()).unwrap();
    assert!(world.is_empty());
}
