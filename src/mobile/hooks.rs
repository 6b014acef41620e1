//! Seams to the rest of the game server.
//!
//! Tracking and hunting only decide *what* to do; moving a character,
//! starting a fight, printing text and rolling dice belong to other
//! subsystems. Each concern is a small trait and [`Host`] bundles them. The
//! free functions here are the stock behaviours, so a custom host can reuse
//! them for the parts it does not override.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::logutil::escape_log;
use crate::mobile::character::{CharId, Location, MobFlag, Position, Roster};
use crate::world::{Direction, World};

/// Text sink towards players.
pub trait Output {
    fn send_to_char(&mut self, to: CharId, text: &str);
    /// Message shown to everyone else in the actor's room; `$n` is the
    /// actor's name.
    fn act_to_room(&mut self, actor: CharId, text: &str);
    fn say(&mut self, actor: CharId, text: &str);
    fn tell(&mut self, from: CharId, to: CharId, text: &str);
}

pub trait Movement {
    /// Move `actor` one step towards `dir`. Returns whether it moved.
    fn perform_move(
        &mut self,
        world: &World,
        roster: &mut Roster,
        actor: CharId,
        dir: Direction,
    ) -> bool;
}

pub trait Combat {
    fn hit(&mut self, roster: &mut Roster, actor: CharId, victim: CharId);

    /// False when `victim` is a shopkeeper that cannot be damaged by `actor`.
    fn ok_damage_shopkeeper(&self, roster: &Roster, victim: CharId, actor: CharId) -> bool {
        let _ = actor;
        roster
            .get(victim)
            .is_some_and(|v| !v.mob_flagged(MobFlag::Shopkeeper))
    }
}

pub trait Perception {
    fn can_see(&self, roster: &Roster, viewer: CharId, target: CharId) -> bool {
        roster.contains(viewer) && roster.contains(target)
    }
}

pub trait Dice {
    /// Uniform integer in `from..=to` (bounds may come in either order).
    fn number(&mut self, from: i32, to: i32) -> i32;

    /// Sum of `count` rolls of a `size`-sided die.
    fn dice(&mut self, count: u32, size: i32) -> i32 {
        if size < 1 {
            return 0;
        }
        (0..count).map(|_| self.number(1, size)).sum()
    }

    fn d20(&mut self) -> i32 {
        self.number(1, 20)
    }
}

/// Everything tracking and hunting need from the surrounding game.
pub trait Host: Output + Movement + Combat + Perception + Dice {}

impl<T: Output + Movement + Combat + Perception + Dice> Host for T {}

/// Stock movement: follow an open exit inside the room graph, or shift one
/// cell on the wilderness grid. Costs one movement point.
pub fn walk(world: &World, roster: &mut Roster, actor: CharId, dir: Direction) -> bool {
    let Some(ch) = roster.get_mut(actor) else {
        return false;
    };
    if ch.moves < 1 {
        return false;
    }
    let next = match ch.location {
        Location::Room(room) => {
            if !world.can_go(room, dir) {
                return false;
            }
            match world.exit_target(room, dir) {
                Some(to) => Location::Room(to),
                None => return false,
            }
        }
        Location::Wilderness { x, y } => match dir.grid_delta() {
            Some((dx, dy)) => Location::Wilderness { x: x + dx, y: y + dy },
            None => return false,
        },
    };
    debug!("{} walks {}", ch.name, dir);
    ch.location = next;
    ch.moves -= 1;
    true
}

/// Stock combat: both sides start fighting each other.
pub fn start_fight(roster: &mut Roster, actor: CharId, victim: CharId) {
    if let Some(ch) = roster.get_mut(actor) {
        ch.fighting = Some(victim);
        ch.position = Position::Fighting;
    }
    if let Some(v) = roster.get_mut(victim) {
        if v.fighting.is_none() {
            v.fighting = Some(actor);
            v.position = Position::Fighting;
        }
    }
}

/// Dice backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn number(&mut self, from: i32, to: i32) -> i32 {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays a fixed sequence of rolls. Every `number`, `dice` or `d20` call
/// consumes one value, clamped into the requested range; once the script is
/// exhausted the lowest possible result is returned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    pub fn new<I: IntoIterator<Item = i32>>(rolls: I) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn push(&mut self, roll: i32) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn number(&mut self, from: i32, to: i32) -> i32 {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        self.rolls.pop_front().map_or(lo, |r| r.clamp(lo, hi))
    }

    fn dice(&mut self, count: u32, size: i32) -> i32 {
        if size < 1 || count == 0 {
            return 0;
        }
        let lo = count as i32;
        let hi = count as i32 * size;
        self.number(lo, hi)
    }
}

/// One line of output produced through [`Output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ToChar { to: CharId, text: String },
    ToRoom { actor: CharId, text: String },
    Say { actor: CharId, text: String },
    Tell { from: CharId, to: CharId, text: String },
}

/// Host with the stock behaviours: output goes to an in-memory transcript,
/// movement and combat use [`walk`] and [`start_fight`], everyone can see
/// everyone.
#[derive(Debug, Clone)]
pub struct StandardHost<D: Dice = RngDice<StdRng>> {
    pub transcript: Vec<Message>,
    pub dice: D,
}

impl StandardHost<RngDice<StdRng>> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngDice::seeded(seed))
    }
}

impl<D: Dice> StandardHost<D> {
    pub fn new(dice: D) -> Self {
        Self {
            transcript: Vec::new(),
            dice,
        }
    }

    /// Text sent directly to `who`, in order.
    pub fn texts_to(&self, who: CharId) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|m| match m {
                Message::ToChar { to, text } if *to == who => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tells received by `who`, in order.
    pub fn tells_to(&self, who: CharId) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|m| match m {
                Message::Tell { to, text, .. } if *to == who => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn take_transcript(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.transcript)
    }
}

impl<D: Dice> Output for StandardHost<D> {
    fn send_to_char(&mut self, to: CharId, text: &str) {
        debug!("to {:?}: {}", to, escape_log(text));
        self.transcript.push(Message::ToChar {
            to,
            text: text.to_string(),
        });
    }

    fn act_to_room(&mut self, actor: CharId, text: &str) {
        debug!("room of {:?}: {}", actor, escape_log(text));
        self.transcript.push(Message::ToRoom {
            actor,
            text: text.to_string(),
        });
    }

    fn say(&mut self, actor: CharId, text: &str) {
        debug!("{:?} says: {}", actor, escape_log(text));
        self.transcript.push(Message::Say {
            actor,
            text: text.to_string(),
        });
    }

    fn tell(&mut self, from: CharId, to: CharId, text: &str) {
        debug!("{:?} tells {:?}: {}", from, to, escape_log(text));
        self.transcript.push(Message::Tell {
            from,
            to,
            text: text.to_string(),
        });
    }
}

impl<D: Dice> Movement for StandardHost<D> {
    fn perform_move(
        &mut self,
        world: &World,
        roster: &mut Roster,
        actor: CharId,
        dir: Direction,
    ) -> bool {
        walk(world, roster, actor, dir)
    }
}

impl<D: Dice> Combat for StandardHost<D> {
    fn hit(&mut self, roster: &mut Roster, actor: CharId, victim: CharId) {
        start_fight(roster, actor, victim);
    }
}

impl<D: Dice> Perception for StandardHost<D> {}

impl<D: Dice> Dice for StandardHost<D> {
    fn number(&mut self, from: i32, to: i32) -> i32 {
        self.dice.number(from, to)
    }

    fn dice(&mut self, count: u32, size: i32) -> i32 {
        self.dice.dice(count, size)
    }

    fn d20(&mut self) -> i32 {
        self.dice.d20()
    }
}
