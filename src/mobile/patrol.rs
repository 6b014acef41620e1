use log::{trace, warn};

use crate::mobile::character::CharId;
use crate::mobile::hooks::Host;
use crate::mobile::Realm;

/// Advance `actor` along its patrol path: wait out the delay, then head for
/// the next waypoint, one step per call.
///
/// Returns true when the patrol consumed this activation (the NPC did its
/// patrol work, whether or not a step was possible).
pub fn move_on_path<H: Host + ?Sized>(realm: &mut Realm, host: &mut H, actor: CharId) -> bool {
    let Some(ch) = realm.roster.get_mut(actor) else {
        return false;
    };
    if ch.fighting.is_some() {
        return false;
    }
    let here = ch.room();
    let Some(patrol) = ch.patrol.as_mut() else {
        return false;
    };
    if patrol.waypoints.is_empty() {
        return false;
    }

    if patrol.delay > 0 {
        patrol.delay -= 1;
        return false;
    }

    patrol.delay = patrol.reset;
    patrol.index += 1;
    if patrol.index >= patrol.waypoints.len() {
        patrol.index = 0;
    }
    let next = patrol.waypoints[patrol.index];

    let Some(target) = realm.world.real_room(next) else {
        warn!("Patrol waypoint vnum {} does not exist", next);
        return true;
    };
    let Some(here) = here else {
        return true;
    };

    if let Some(dir) = realm.find_first_step(here, target).step() {
        trace!("patrol {:?} heads {} for vnum {}", actor, dir, next);
        host.perform_move(&realm.world, &mut realm.roster, actor, dir);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobile::character::{Character, Location, Patrol};
    use crate::mobile::hooks::{ScriptedDice, StandardHost};
    use crate::world::{Direction, Room, World};

    fn loop_realm() -> Realm {
        let mut world = World::new();
        let a = world.add_room(Room::new(100, 1, "Gate")).unwrap();
        let b = world.add_room(Room::new(101, 1, "Wall")).unwrap();
        let c = world.add_room(Room::new(102, 1, "Tower")).unwrap();
        world.link_both(a, Direction::North, b);
        world.link_both(b, Direction::North, c);
        Realm::new(world)
    }

    #[test]
    fn delay_counts_down_before_moving() {
        let mut realm = loop_realm();
        let gate = realm.world.real_room(100).unwrap();
        let guard = realm.roster.add(
            Character::npc("guard", Location::Room(gate)).with_patrol(Patrol {
                waypoints: vec![100, 102],
                index: 0,
                delay: 1,
                reset: 0,
            }),
        );
        let mut host = StandardHost::new(ScriptedDice::default());
        assert!(!move_on_path(&mut realm, &mut host, guard));
        assert_eq!(realm.roster.get(guard).unwrap().location, Location::Room(gate));
        assert!(move_on_path(&mut realm, &mut host, guard));
        let wall = realm.world.real_room(101).unwrap();
        assert_eq!(realm.roster.get(guard).unwrap().location, Location::Room(wall));
        assert_eq!(realm.roster.get(guard).unwrap().patrol.as_ref().unwrap().index, 1);
    }

    #[test]
    fn index_wraps_around() {
        let mut realm = loop_realm();
        let tower = realm.world.real_room(102).unwrap();
        let guard = realm.roster.add(
            Character::npc("guard", Location::Room(tower)).with_patrol(Patrol {
                waypoints: vec![100, 102],
                index: 1,
                delay: 0,
                reset: 3,
            }),
        );
        let mut host = StandardHost::new(ScriptedDice::default());
        assert!(move_on_path(&mut realm, &mut host, guard));
        let patrol = realm.roster.get(guard).unwrap().patrol.clone().unwrap();
        assert_eq!(patrol.index, 0);
        assert_eq!(patrol.delay, 3);
        let wall = realm.world.real_room(101).unwrap();
        assert_eq!(realm.roster.get(guard).unwrap().location, Location::Room(wall));
    }

    #[test]
    fn npcs_without_patrol_are_untouched() {
        let mut realm = loop_realm();
        let gate = realm.world.real_room(100).unwrap();
        let npc = realm.roster.add(Character::npc("cat", Location::Room(gate)));
        let mut host = StandardHost::new(ScriptedDice::default());
        assert!(!move_on_path(&mut realm, &mut host, npc));
    }
}
