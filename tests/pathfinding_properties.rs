//! Behavioural properties of the first-step search.

mod common;

use common::{grid_zone, linear_zone};
use trailsense::pathfind::{count_rooms_between, find_first_step, PathResult, Pathfinder};
use trailsense::world::{Direction, Room, RoomFlag, RoomId};
use trailsense::SearchPolicy;

#[test]
fn linear_zone_scenario() {
    let (mut world, r) = linear_zone(5);
    let policy = SearchPolicy::default();
    let mut pf = Pathfinder::new();

    assert_eq!(
        pf.find_first_step(&world, r[0], r[4], &policy),
        PathResult::Step(Direction::East)
    );
    assert_eq!(
        pf.find_first_step(&world, r[4], r[0], &policy),
        PathResult::Step(Direction::West)
    );
    assert_eq!(
        pf.find_first_step(&world, r[2], r[2], &policy),
        PathResult::AlreadyThere
    );

    // closing the door from room 2's side shuts it from room 1's as well
    assert!(world.close_door(r[2], Direction::West));
    assert!(world.exit(r[1], Direction::East).unwrap().is_closed());
    assert_eq!(
        pf.find_first_step(&world, r[0], r[4], &policy),
        PathResult::NoPath
    );
    assert_eq!(
        pf.find_first_step(&world, r[0], r[1], &policy),
        PathResult::Step(Direction::East)
    );
}

#[test]
fn every_room_reaches_itself() {
    let (world, ids) = grid_zone(4);
    let mut pf = Pathfinder::new();
    for id in ids {
        assert_eq!(
            pf.find_first_step(&world, id, id, &SearchPolicy::default()),
            PathResult::AlreadyThere
        );
    }
}

#[test]
fn invalid_handles_are_errors() {
    let (world, ids) = linear_zone(3);
    let policy = SearchPolicy::default();
    for bad in [RoomId::NOWHERE, RoomId(3), RoomId(1_000)] {
        assert_eq!(find_first_step(&world, bad, ids[0], &policy), PathResult::Error);
        assert_eq!(find_first_step(&world, ids[0], bad, &policy), PathResult::Error);
        assert_eq!(find_first_step(&world, bad, ids[0], &policy).code(), -1);
    }
}

#[test]
fn zone_boundary_short_circuits() {
    let (mut world, ids) = linear_zone(2);
    let outside = world.add_room(Room::new(50, 2, "Border post")).unwrap();
    world.link_both(ids[1], Direction::East, outside);

    let mut pf = Pathfinder::new();
    let same_zone = SearchPolicy::default();
    assert_eq!(
        pf.find_first_step(&world, ids[1], outside, &same_zone),
        PathResult::NoPath
    );
    assert_eq!(pf.last_stats().expanded, 0);
    assert_eq!(pf.last_stats().enqueued, 0);

    let anywhere = SearchPolicy::default().any_zone();
    assert_eq!(
        pf.find_first_step(&world, ids[0], outside, &anywhere),
        PathResult::Step(Direction::East)
    );
}

#[test]
fn disconnected_rooms_have_no_path() {
    let (mut world, ids) = linear_zone(3);
    let island = world.add_room(Room::new(77, 1, "Island")).unwrap();
    assert_eq!(
        find_first_step(&world, ids[0], island, &SearchPolicy::default()),
        PathResult::NoPath
    );
    assert_eq!(
        count_rooms_between(&world, ids[0], island, &SearchPolicy::default()),
        None
    );
}

#[test]
fn direct_exit_is_the_answer() {
    let (mut world, ids) = grid_zone(3);
    world.link(ids[4], Direction::Up, ids[0]);
    let policy = SearchPolicy::default();
    let mut pf = Pathfinder::new();
    assert_eq!(
        pf.find_first_step(&world, ids[4], ids[1], &policy),
        PathResult::Step(Direction::North)
    );
    assert_eq!(
        pf.find_first_step(&world, ids[4], ids[0], &policy),
        PathResult::Step(Direction::Up)
    );
}

#[test]
fn ties_resolve_the_same_way_every_time() {
    let (world, ids) = grid_zone(3);
    let policy = SearchPolicy::default();
    let mut pf = Pathfinder::new();
    let first = pf.find_first_step(&world, ids[0], ids[8], &policy);
    assert_eq!(first, PathResult::Step(Direction::East));
    for _ in 0..25 {
        assert_eq!(pf.find_first_step(&world, ids[0], ids[8], &policy), first);
    }
    // a fresh searcher agrees with a well-used one
    assert_eq!(find_first_step(&world, ids[0], ids[8], &policy), first);
}

#[test]
fn earlier_searches_leave_no_trace() {
    let (world, ids) = grid_zone(4);
    let policy = SearchPolicy::default();

    let mut used = Pathfinder::new();
    used.find_first_step(&world, ids[0], ids[15], &policy);
    used.find_first_step(&world, ids[3], ids[3], &policy);
    used.find_first_step(&world, ids[5], RoomId::NOWHERE, &policy);

    for (a, b) in [(15, 0), (12, 3), (6, 9), (1, 14)] {
        let fresh = find_first_step(&world, ids[a], ids[b], &policy);
        assert_eq!(used.find_first_step(&world, ids[a], ids[b], &policy), fresh);
    }
}

#[test]
fn closed_doors_follow_the_policy() {
    let (mut world, ids) = linear_zone(3);
    world.close_door(ids[1], Direction::East);

    let strict = SearchPolicy::default();
    let lenient = SearchPolicy::default().through_doors(true);
    let mut pf = Pathfinder::new();

    assert_eq!(
        pf.find_first_step(&world, ids[0], ids[2], &strict),
        PathResult::NoPath
    );
    assert_eq!(
        pf.find_first_step(&world, ids[0], ids[2], &lenient),
        PathResult::Step(Direction::East)
    );

    world.open_door(ids[1], Direction::East);
    assert_eq!(
        pf.find_first_step(&world, ids[0], ids[2], &strict),
        PathResult::Step(Direction::East)
    );
}

#[test]
fn no_track_rooms_block_the_only_route() {
    let (mut world, ids) = linear_zone(5);
    world.set_room_flag(ids[2], RoomFlag::NoTrack);
    let policy = SearchPolicy::default();
    assert_eq!(
        find_first_step(&world, ids[0], ids[4], &policy),
        PathResult::NoPath
    );
    assert_eq!(
        find_first_step(&world, ids[0], ids[1], &policy),
        PathResult::Step(Direction::East)
    );
}

#[test]
fn no_track_detour_is_taken_when_one_exists() {
    let (mut world, ids) = grid_zone(3);
    // block the middle so 3 -> 5 must go around
    world.set_room_flag(ids[4], RoomFlag::NoTrack);
    let mut pf = Pathfinder::new();
    assert_eq!(
        pf.find_first_step(&world, ids[3], ids[5], &SearchPolicy::default()),
        PathResult::Step(Direction::North)
    );
    assert_eq!(
        pf.count_rooms_between(&world, ids[3], ids[5], &SearchPolicy::default()),
        Some(4)
    );
}

#[test]
fn distances_on_a_line() {
    let (world, ids) = linear_zone(5);
    let policy = SearchPolicy::default();
    let mut pf = Pathfinder::new();
    assert_eq!(pf.count_rooms_between(&world, ids[0], ids[0], &policy), Some(0));
    assert_eq!(pf.count_rooms_between(&world, ids[0], ids[4], &policy), Some(4));
    assert_eq!(pf.count_rooms_between(&world, ids[3], ids[1], &policy), Some(2));
}

#[test]
fn diagonal_exits_can_be_ignored() {
    let (mut world, ids) = linear_zone(2);
    let corner = world.add_room(Room::new(9, 1, "Corner")).unwrap();
    world.link_both(ids[0], Direction::Northeast, corner);
    let mut pf = Pathfinder::new();
    assert_eq!(
        pf.find_first_step(&world, ids[0], corner, &SearchPolicy::default()),
        PathResult::Step(Direction::Northeast)
    );
    let orthogonal = SearchPolicy {
        diagonal_dirs: false,
        ..SearchPolicy::default()
    };
    assert_eq!(
        pf.find_first_step(&world, ids[0], corner, &orthogonal),
        PathResult::NoPath
    );
}
