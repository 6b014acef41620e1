//! The `track` command.
//!
//! A tracker names a quarry; after the usual disqualifiers a survival check
//! decides between the real heading and a plausible wrong guess. The real
//! heading comes from coordinates when both stand in the wilderness and from
//! the pathfinder when both stand in rooms. Charmed followers also report
//! back to their master.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::TrailError;
use crate::logutil::escape_log;
use crate::mobile::character::{AffectFlag, CharId, Character, Feat, Location};
use crate::mobile::hooks::Host;
use crate::mobile::Realm;
use crate::pathfind::PathResult;
use crate::world::{Direction, RoomFlag};

/// Numbers behind the tracking check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackingRules {
    /// Trackers at or above this level skip the untrackable check and the
    /// skill roll.
    #[serde(default = "default_implementor_level")]
    pub implementor_level: u8,
    /// Trackers at or above this level ignore fog.
    #[serde(default = "default_immortal_level")]
    pub immortal_level: u8,
    /// Movement budget required to track, rolled as `count`d`size`.
    #[serde(default = "default_move_dice_count")]
    pub move_dice_count: u32,
    #[serde(default = "default_move_dice_size")]
    pub move_dice_size: i32,
    /// Random directions tried when faking a trail after a failed check.
    #[serde(default = "default_guess_tries")]
    pub guess_tries: u32,
    #[serde(default = "default_base_dc")]
    pub base_dc: i32,
    /// Difficulty reduction for trackers with keen scent.
    #[serde(default = "default_keen_scent_bonus")]
    pub keen_scent_bonus: i32,
}

fn default_implementor_level() -> u8 {
    crate::mobile::character::LVL_IMPL
}

fn default_immortal_level() -> u8 {
    crate::mobile::character::LVL_IMMORT
}

fn default_move_dice_count() -> u32 {
    5
}

fn default_move_dice_size() -> i32 {
    5
}

fn default_guess_tries() -> u32 {
    10
}

fn default_base_dc() -> i32 {
    10
}

fn default_keen_scent_bonus() -> i32 {
    5
}

impl Default for TrackingRules {
    fn default() -> Self {
        Self {
            implementor_level: default_implementor_level(),
            immortal_level: default_immortal_level(),
            move_dice_count: default_move_dice_count(),
            move_dice_size: default_move_dice_size(),
            guess_tries: default_guess_tries(),
            base_dc: default_base_dc(),
            keen_scent_bonus: default_keen_scent_bonus(),
        }
    }
}

/// What the `track` command concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    NoSkill,
    NoArgument,
    NoTarget,
    /// The quarry leaves no trail.
    Untrackable,
    Fogged,
    Exhausted,
    /// Failed check; a random walkable direction was reported.
    Guessed(Direction),
    /// Passed check; the true heading was reported.
    Sensed(Direction),
    AlreadyThere,
    NoPath,
    /// The pathfinder rejected the rooms involved.
    Error,
    /// One side in the wilderness, the other in a room.
    TrailCold,
}

/// Heading from `(x, y)` to `(tx, ty)` on the wilderness grid, where `y`
/// grows to the north. `None` when both points coincide.
pub fn wilderness_heading(x: i32, y: i32, tx: i32, ty: i32) -> Option<Direction> {
    use std::cmp::Ordering::*;
    match (ty.cmp(&y), tx.cmp(&x)) {
        (Equal, Equal) => None,
        (Greater, Equal) => Some(Direction::North),
        (Less, Equal) => Some(Direction::South),
        (Equal, Greater) => Some(Direction::East),
        (Equal, Less) => Some(Direction::West),
        (Greater, Greater) => Some(Direction::Northeast),
        (Greater, Less) => Some(Direction::Northwest),
        (Less, Greater) => Some(Direction::Southeast),
        (Less, Less) => Some(Direction::Southwest),
    }
}

/// Run `track <argument>` for `actor`.
pub fn do_track<H: Host + ?Sized>(
    realm: &mut Realm,
    host: &mut H,
    actor: CharId,
    argument: &str,
) -> Result<TrackOutcome, TrailError> {
    let ch = realm
        .roster
        .get(actor)
        .cloned()
        .ok_or_else(|| TrailError::UnknownCharacter(format!("{:?}", actor)))?;
    let rules = realm.rules.clone();
    let relay_to = ch.master.filter(|_| ch.is_charmed_follower());

    debug!("{} tracks '{}'", ch.name, escape_log(argument));

    if !ch.can_track() {
        host.send_to_char(actor, "You have no idea how.");
        return Ok(TrackOutcome::NoSkill);
    }

    let arg = argument.split_whitespace().next().unwrap_or("");
    if arg.is_empty() {
        host.send_to_char(actor, "Whom are you trying to track?");
        relay(host, actor, relay_to, "Who do you want me to track?");
        return Ok(TrackOutcome::NoArgument);
    }

    let Some(vict) = find_visible(realm, host, &ch, arg) else {
        host.send_to_char(actor, "No one is around by that name.");
        relay(
            host,
            actor,
            relay_to,
            &format!("I can't find tracks for anyone named {}", arg),
        );
        return Ok(TrackOutcome::NoTarget);
    };

    if vict.affected_by(AffectFlag::NoTrack) && ch.level < rules.implementor_level {
        host.send_to_char(actor, "You sense they left no trail...");
        relay(
            host,
            actor,
            relay_to,
            &format!("I sense no trail to {}.", vict.name),
        );
        return Ok(TrackOutcome::Untrackable);
    }

    let fogged = ch
        .room()
        .is_some_and(|room| realm.world.room_flagged(room, RoomFlag::Fog));
    if fogged && ch.level < rules.immortal_level {
        let text = "The fog makes it impossible to attempt to track anything from here.";
        host.send_to_char(actor, text);
        relay(host, actor, relay_to, text);
        return Ok(TrackOutcome::Fogged);
    }

    let mut moves = host.dice(rules.move_dice_count, rules.move_dice_size);
    if ch.has_feat(Feat::SwiftTracker) {
        moves = 0;
    }
    if ch.moves < moves {
        host.send_to_char(actor, "You are too exhausted!");
        relay(host, actor, relay_to, "I am too exhausted.");
        return Ok(TrackOutcome::Exhausted);
    }

    let mut dc = if vict.is_npc() {
        vict.level as i32 + rules.base_dc
    } else {
        rules.base_dc + vict.survival
    };
    if ch.has_feat(Feat::KeenScent) {
        dc -= rules.keen_scent_bonus;
    }

    if ch.level < rules.implementor_level {
        let roll = host.d20();
        let result = roll + ch.survival;
        debug!(
            "{} survival check: d20 {} + {} = {} vs dc {}",
            ch.name, roll, ch.survival, result, dc
        );
        if result < dc {
            if !ch.has_feat(Feat::SwiftTracker) {
                if let Some(c) = realm.roster.get_mut(actor) {
                    c.cooldowns.use_move_action();
                }
            }
            let dir = guess_direction(realm, host, &ch, rules.guess_tries);
            host.send_to_char(actor, &format!("You sense a trail {} from here!", dir));
            relay(
                host,
                actor,
                relay_to,
                &format!("I sense a trail to {} {} of here.", vict.name, dir),
            );
            return Ok(TrackOutcome::Guessed(dir));
        }
    }

    let outcome = match (ch.location, vict.location) {
        (Location::Wilderness { x, y }, Location::Wilderness { x: vx, y: vy }) => {
            match wilderness_heading(x, y, vx, vy) {
                None => {
                    host.send_to_char(actor, "You are already in the same room!");
                    TrackOutcome::AlreadyThere
                }
                Some(dir) => {
                    host.send_to_char(actor, &format!("You sense a trail {} from here!", dir));
                    relay(
                        host,
                        actor,
                        relay_to,
                        &format!("I sense a trail to {} {} of here.", vict.name, dir),
                    );
                    TrackOutcome::Sensed(dir)
                }
            }
        }
        (Location::Room(from), Location::Room(to)) => match realm.find_first_step(from, to) {
            PathResult::Error => {
                host.send_to_char(actor, "Hmm.. something seems to be wrong.");
                TrackOutcome::Error
            }
            PathResult::AlreadyThere => {
                host.send_to_char(actor, "You're already in the same room!!");
                relay(
                    host,
                    actor,
                    relay_to,
                    &format!("We're already in the same room as {}.", vict.name),
                );
                TrackOutcome::AlreadyThere
            }
            PathResult::NoPath => {
                host.send_to_char(
                    actor,
                    &format!(
                        "You can't sense a trail to {} from here.",
                        vict.sex.objective()
                    ),
                );
                relay(
                    host,
                    actor,
                    relay_to,
                    &format!("I can't sense a trail to {}.", vict.name),
                );
                TrackOutcome::NoPath
            }
            PathResult::Step(dir) => {
                host.send_to_char(actor, &format!("You sense a trail {} from here!", dir));
                relay(
                    host,
                    actor,
                    relay_to,
                    &format!("I sense a trail to {} {} of here.", vict.name, dir),
                );
                TrackOutcome::Sensed(dir)
            }
        },
        _ => {
            host.send_to_char(actor, "The trail has gone cold.");
            relay(
                host,
                actor,
                relay_to,
                &format!("The trail to {} has gone cold.", vict.name),
            );
            TrackOutcome::TrailCold
        }
    };

    Ok(outcome)
}

fn relay<H: Host + ?Sized>(host: &mut H, actor: CharId, master: Option<CharId>, text: &str) {
    if let Some(master) = master {
        host.tell(actor, master, text);
    }
}

/// Resolve `name` to a character `ch` can see: someone sharing its location
/// first, then anyone in the world. `name` may abbreviate any word of the
/// character's name ("wol" finds "the grey wolf").
fn find_visible<H: Host + ?Sized>(
    realm: &Realm,
    host: &H,
    ch: &Character,
    name: &str,
) -> Option<Character> {
    let visible = |c: &&Character| {
        name_matches(&c.name, name) && host.can_see(&realm.roster, ch.id, c.id)
    };
    realm
        .roster
        .iter()
        .filter(|c| c.location == ch.location)
        .find(visible)
        .or_else(|| realm.roster.iter().find(visible))
        .cloned()
}

fn name_matches(full: &str, abbrev: &str) -> bool {
    let abbrev = abbrev.to_ascii_lowercase();
    full.eq_ignore_ascii_case(&abbrev)
        || full
            .split_whitespace()
            .any(|word| word.to_ascii_lowercase().starts_with(&abbrev))
}

/// Pick random directions until one is walkable from where `ch` stands or
/// the tries run out; the last pick is returned either way.
fn guess_direction<H: Host + ?Sized>(
    realm: &Realm,
    host: &mut H,
    ch: &Character,
    tries: u32,
) -> Direction {
    let dirs = Direction::enumerate(realm.policy.diagonal_dirs);
    let mut tries = tries.max(1);
    loop {
        let pick = host.number(0, dirs.len() as i32 - 1);
        let dir = dirs[pick.clamp(0, dirs.len() as i32 - 1) as usize];
        let walkable = match ch.location {
            Location::Room(room) => realm.world.can_go(room, dir),
            Location::Wilderness { .. } => dir.grid_delta().is_some(),
        };
        tries -= 1;
        if walkable || tries == 0 {
            return dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobile::character::{Character, Sex};
    use crate::mobile::hooks::{ScriptedDice, StandardHost};
    use crate::world::{Room, World};

    fn corridor() -> Realm {
        let mut world = World::new();
        let a = world.add_room(Room::new(10, 1, "West end")).unwrap();
        let b = world.add_room(Room::new(11, 1, "Middle")).unwrap();
        let c = world.add_room(Room::new(12, 1, "East end")).unwrap();
        world.link_both(a, Direction::East, b);
        world.link_both(b, Direction::East, c);
        Realm::new(world)
    }

    #[test]
    fn heading_combines_both_axes() {
        assert_eq!(wilderness_heading(0, 0, 0, 0), None);
        assert_eq!(wilderness_heading(0, 0, 0, 5), Some(Direction::North));
        assert_eq!(wilderness_heading(0, 0, -2, 0), Some(Direction::West));
        assert_eq!(wilderness_heading(0, 0, 3, 3), Some(Direction::Northeast));
        assert_eq!(wilderness_heading(4, 4, 1, 0), Some(Direction::Southwest));
    }

    #[test]
    fn tracker_without_skill_is_refused() {
        let mut realm = corridor();
        let a = realm.world.real_room(10).unwrap();
        let me = realm
            .roster
            .add(Character::player("Ayla", 1, Location::Room(a)));
        let mut host = StandardHost::new(ScriptedDice::default());
        let outcome = do_track(&mut realm, &mut host, me, "anyone").unwrap();
        assert_eq!(outcome, TrackOutcome::NoSkill);
        assert_eq!(host.texts_to(me), vec!["You have no idea how."]);
    }

    #[test]
    fn successful_track_reports_first_step() {
        let mut realm = corridor();
        let a = realm.world.real_room(10).unwrap();
        let c = realm.world.real_room(12).unwrap();
        let me = realm.roster.add(
            Character::player("Ayla", 1, Location::Room(a)).with_feat(Feat::Track),
        );
        realm.roster.add(
            Character::player("Bren", 2, Location::Room(c)).with_sex(Sex::Male),
        );
        // move budget 5, then a natural 20
        let mut host = StandardHost::new(ScriptedDice::new([5, 20]));
        let outcome = do_track(&mut realm, &mut host, me, "bren").unwrap();
        assert_eq!(outcome, TrackOutcome::Sensed(Direction::East));
        assert_eq!(host.texts_to(me), vec!["You sense a trail east from here!"]);
    }

    #[test]
    fn names_match_on_word_prefixes() {
        assert!(name_matches("wolf", "wol"));
        assert!(name_matches("the grey wolf", "WOLF"));
        assert!(name_matches("Bren Ashford", "bren ashford"));
        assert!(!name_matches("wolf", "wolves"));
        assert!(!name_matches("werewolf", "wolf"));
    }

    #[test]
    fn abbreviated_names_find_their_target() {
        let mut realm = corridor();
        let a = realm.world.real_room(10).unwrap();
        let c = realm.world.real_room(12).unwrap();
        let me = realm.roster.add(
            Character::player("Ayla", 1, Location::Room(a)).with_feat(Feat::Track),
        );
        realm
            .roster
            .add(Character::player("Bren Ashford", 2, Location::Room(c)));
        let mut host = StandardHost::new(ScriptedDice::new([5, 20]));
        let outcome = do_track(&mut realm, &mut host, me, "ash").unwrap();
        assert_eq!(outcome, TrackOutcome::Sensed(Direction::East));
    }

    #[test]
    fn unknown_actor_is_an_error() {
        let mut realm = corridor();
        let mut host = StandardHost::new(ScriptedDice::default());
        assert!(do_track(&mut realm, &mut host, CharId(99), "x").is_err());
    }
}
