//! NPC pursuit: chasing a hunted character and walking back home.

use log::{debug, trace};

use crate::mobile::character::{AffectFlag, CharId, Location, MobFlag, Position, PrefFlag};
use crate::mobile::hooks::Host;
use crate::mobile::Realm;
use crate::world::Direction;

/// What one [`hunt_victim`] activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntOutcome {
    /// Missing, busy, protected or charmed; nothing happened.
    Skipped,
    /// Not hunting anyone and no remembered enemy was around.
    NoQuarry,
    /// The hunted character no longer exists; the hunt was dropped.
    QuarryLost,
    /// The quarry cannot be damaged by this hunter.
    Refused,
    /// A charmed hunter stopped hunting its own master.
    Released,
    /// Caught up and attacked.
    Attacked,
    /// Took at least one step without catching up.
    Moved,
    /// Could not take any step this tick.
    Stuck,
    /// No route left; the hunt was dropped.
    GaveUp,
    /// One side in the wilderness, the other in a room.
    TrailCold,
}

/// One pursuit tick for `actor`.
pub fn hunt_victim<H: Host + ?Sized>(realm: &mut Realm, host: &mut H, actor: CharId) -> HuntOutcome {
    let Some(ch) = realm.roster.get(actor).cloned() else {
        return HuntOutcome::Skipped;
    };
    if ch.fighting.is_some() {
        return HuntOutcome::Skipped;
    }

    if ch.mob_flagged(MobFlag::NoKill) {
        host.send_to_char(
            actor,
            "You are a protected mob, it doesn't make sense for you to hunt!",
        );
        return HuntOutcome::Skipped;
    }

    if ch.affected_by(AffectFlag::Charm) {
        host.send_to_char(
            actor,
            "You can't hunt anything while you're under someone else's control.",
        );
        return HuntOutcome::Skipped;
    }

    let mut hunting = ch.hunting;
    if hunting.is_none() {
        if !(ch.mob_flagged(MobFlag::Memory) && !ch.memory.is_empty()) {
            return HuntOutcome::NoQuarry;
        }
        let remembered = realm
            .roster
            .iter()
            .filter(|t| !t.is_npc())
            .filter(|t| host.can_see(&realm.roster, actor, t.id))
            .filter(|t| !t.pref_flagged(PrefFlag::NoHassle))
            .find(|t| ch.memory.contains(&t.idnum))
            .map(|t| t.id);
        if let Some(found) = remembered {
            debug!("{} remembers {:?} and starts hunting", ch.name, found);
            set_hunting(realm, actor, Some(found));
            host.act_to_room(actor, "'bwargh!', exclaims $n.");
            hunting = Some(found);
        }
    }

    let Some(vict) = hunting.filter(|v| realm.roster.contains(*v)) else {
        host.say(actor, "???");
        set_hunting(realm, actor, None);
        return HuntOutcome::QuarryLost;
    };

    if !host.ok_damage_shopkeeper(&realm.roster, vict, actor) {
        host.send_to_char(
            actor,
            "You are a shopkeeper (that can't be damaged), it doesn't make sense for you to hunt!",
        );
        return HuntOutcome::Refused;
    }

    if ch.master == Some(vict) && ch.affected_by(AffectFlag::Charm) {
        set_hunting(realm, actor, None);
        return HuntOutcome::Released;
    }

    let Some(vict_location) = realm.roster.get(vict).map(|v| v.location) else {
        return HuntOutcome::QuarryLost;
    };

    match (ch.location, vict_location) {
        (Location::Wilderness { x, y }, Location::Wilderness { x: vx, y: vy }) => {
            if (x, y) == (vx, vy) {
                attack(realm, host, actor, vict);
                return HuntOutcome::Attacked;
            }

            let mut moved = false;
            if vy > y {
                moved |= host.perform_move(&realm.world, &mut realm.roster, actor, Direction::North);
            } else if vy < y {
                moved |= host.perform_move(&realm.world, &mut realm.roster, actor, Direction::South);
            }
            if vx > x {
                moved |= host.perform_move(&realm.world, &mut realm.roster, actor, Direction::East);
            } else if vx < x {
                moved |= host.perform_move(&realm.world, &mut realm.roster, actor, Direction::West);
            }

            if realm.roster.same_location(actor, vict) {
                attack(realm, host, actor, vict);
                HuntOutcome::Attacked
            } else if moved {
                HuntOutcome::Moved
            } else {
                HuntOutcome::Stuck
            }
        }
        (Location::Room(from), Location::Room(to)) => {
            let result = realm.find_first_step(from, to);
            let Some(dir) = result.step() else {
                trace!("{} gives up the hunt: {}", ch.name, result);
                set_hunting(realm, actor, None);
                return HuntOutcome::GaveUp;
            };

            let moved = host.perform_move(&realm.world, &mut realm.roster, actor, dir);
            let (is_pet, fighting) = realm
                .roster
                .get(actor)
                .map(|c| (c.is_pet(), c.fighting.is_some()))
                .unwrap_or((false, false));
            if realm.roster.same_location(actor, vict) && !is_pet && !fighting {
                attack(realm, host, actor, vict);
                HuntOutcome::Attacked
            } else if moved {
                HuntOutcome::Moved
            } else {
                HuntOutcome::Stuck
            }
        }
        _ => {
            host.send_to_char(actor, "The trail has gone cold.");
            HuntOutcome::TrailCold
        }
    }
}

/// One step back towards the load room, when idle and standing. Returns the
/// direction walked.
pub fn hunt_loadroom<H: Host + ?Sized>(
    realm: &mut Realm,
    host: &mut H,
    actor: CharId,
) -> Option<Direction> {
    let ch = realm.roster.get(actor)?;
    if ch.fighting.is_some() || ch.position != Position::Standing {
        return None;
    }
    let home = ch.load_room?;
    let here = ch.room()?;

    if realm.world.vnum_of(here) == realm.world.vnum_of(home) {
        return None;
    }

    let dir = realm.find_first_step(here, home).step()?;
    host.perform_move(&realm.world, &mut realm.roster, actor, dir)
        .then_some(dir)
}

fn set_hunting(realm: &mut Realm, actor: CharId, target: Option<CharId>) {
    if let Some(ch) = realm.roster.get_mut(actor) {
        ch.hunting = target;
    }
}

fn attack<H: Host + ?Sized>(realm: &mut Realm, host: &mut H, actor: CharId, vict: CharId) {
    host.act_to_room(actor, "'!!!!', exclaims $n.");
    host.hit(&mut realm.roster, actor, vict);
}
