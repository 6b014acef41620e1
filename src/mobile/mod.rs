//! Characters and the behaviours built on the pathfinder: the `track`
//! command, NPC hunting, the walk home to a load room and patrol paths.
//!
//! Every entry point takes a [`Realm`] (world, characters and search state)
//! plus a [`Host`] standing in for the rest of the game server.

pub mod activity;
pub mod character;
pub mod hooks;
pub mod hunt;
pub mod patrol;
pub mod track;

pub use activity::mobile_pursuit;
pub use character::{
    ActionCooldowns, AffectFlag, CharId, CharKind, Character, Feat, Location, MobFlag, Patrol,
    Position, PrefFlag, Roster, Sex, LVL_IMMORT, LVL_IMPL,
};
pub use hooks::{
    start_fight, walk, Combat, Dice, Host, Message, Movement, Output, Perception, RngDice,
    ScriptedDice, StandardHost,
};
pub use hunt::{hunt_loadroom, hunt_victim, HuntOutcome};
pub use patrol::move_on_path;
pub use track::{do_track, wilderness_heading, TrackOutcome, TrackingRules};

use crate::pathfind::{PathResult, Pathfinder, SearchPolicy};
use crate::world::{RoomId, World};

/// World, characters and the reusable search state they share.
#[derive(Debug, Default)]
pub struct Realm {
    pub world: World,
    pub roster: Roster,
    pub pathfinder: Pathfinder,
    pub policy: SearchPolicy,
    pub rules: TrackingRules,
}

impl Realm {
    pub fn new(world: World) -> Self {
        let pathfinder = Pathfinder::with_capacity(world.room_count());
        Self {
            world,
            roster: Roster::new(),
            pathfinder,
            policy: SearchPolicy::default(),
            rules: TrackingRules::default(),
        }
    }

    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_rules(mut self, rules: TrackingRules) -> Self {
        self.rules = rules;
        self
    }

    /// First step from `src` towards `target` under the realm's policy.
    pub fn find_first_step(&mut self, src: RoomId, target: RoomId) -> PathResult {
        self.pathfinder
            .find_first_step(&self.world, src, target, &self.policy)
    }

    pub fn count_rooms_between(&mut self, src: RoomId, target: RoomId) -> Option<usize> {
        self.pathfinder
            .count_rooms_between(&self.world, src, target, &self.policy)
    }
}
