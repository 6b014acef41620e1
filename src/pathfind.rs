//! Breadth-first room pathfinding.
//!
//! [`Pathfinder::find_first_step`] answers "which way do I go first to reach
//! that room?". Every frontier entry carries the direction of the hop out of
//! the source that led to it, so when the target is dequeued its entry already
//! holds the answer. No full path is ever reconstructed.
//!
//! Search state (visited marks and the FIFO) lives in the [`Pathfinder`], not
//! in the rooms. Marks are stamped with a per-search generation number, so
//! starting a search invalidates every mark of the previous one without a
//! sweep, and two pathfinders can search the same world concurrently.
//!
//! Which of several equally short routes is reported is fixed by the
//! direction enumeration order and FIFO discipline, and players see it
//! ("you sense a trail north"), so both must stay as they are.

use log::{debug, error, trace};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::world::{Direction, RoomId, World};

/// Whether a search may leave the source room's zone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneScope {
    /// Source and target must share a zone, otherwise the result is
    /// [`PathResult::NoPath`] without searching.
    #[default]
    SameZone,
    AnyZone,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchPolicy {
    #[serde(default)]
    pub zone_scope: ZoneScope,
    /// Let searches pass closed doors.
    #[serde(default)]
    pub track_through_doors: bool,
    /// Enumerate the four diagonal directions after the six orthogonal ones.
    #[serde(default = "default_diagonal_dirs")]
    pub diagonal_dirs: bool,
    /// Give up (as [`PathResult::NoPath`]) after expanding this many rooms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_expansions: Option<usize>,
}

fn default_diagonal_dirs() -> bool {
    true
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            zone_scope: ZoneScope::SameZone,
            track_through_doors: false,
            diagonal_dirs: true,
            max_expansions: None,
        }
    }
}

impl SearchPolicy {
    pub fn any_zone(mut self) -> Self {
        self.zone_scope = ZoneScope::AnyZone;
        self
    }

    pub fn through_doors(mut self, allowed: bool) -> Self {
        self.track_through_doors = allowed;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

/// Result of [`Pathfinder::find_first_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathResult {
    /// First hop of a shortest route.
    Step(Direction),
    /// Source and target are the same room.
    AlreadyThere,
    /// No route within the policy's limits.
    NoPath,
    /// NOWHERE or an out-of-range handle was passed in.
    Error,
}

impl PathResult {
    pub const ERROR_CODE: i32 = -1;
    pub const ALREADY_THERE_CODE: i32 = -2;
    pub const NO_PATH_CODE: i32 = -3;

    /// Integer encoding: a direction code on success, negative otherwise.
    pub fn code(self) -> i32 {
        match self {
            PathResult::Step(dir) => dir.code() as i32,
            PathResult::AlreadyThere => Self::ALREADY_THERE_CODE,
            PathResult::NoPath => Self::NO_PATH_CODE,
            PathResult::Error => Self::ERROR_CODE,
        }
    }

    pub fn from_code(code: i32) -> Option<PathResult> {
        match code {
            Self::ERROR_CODE => Some(PathResult::Error),
            Self::ALREADY_THERE_CODE => Some(PathResult::AlreadyThere),
            Self::NO_PATH_CODE => Some(PathResult::NoPath),
            c if c >= 0 => Direction::from_code(c as usize).map(PathResult::Step),
            _ => None,
        }
    }

    pub fn step(self) -> Option<Direction> {
        match self {
            PathResult::Step(dir) => Some(dir),
            _ => None,
        }
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathResult::Step(dir) => write!(f, "{}", dir),
            PathResult::AlreadyThere => write!(f, "already there"),
            PathResult::NoPath => write!(f, "no path"),
            PathResult::Error => write!(f, "error"),
        }
    }
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub enqueued: usize,
}

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    room: RoomId,
    /// Direction of the seed hop out of the source, inherited unchanged.
    dir: Direction,
    depth: usize,
}

enum Outcome {
    Invalid,
    SameRoom,
    Unreachable,
    Found { dir: Direction, depth: usize },
}

/// Reusable breadth-first searcher. Keep one per game loop (or per worker)
/// and call it as often as needed; buffers are reused between calls.
#[derive(Debug, Default)]
pub struct Pathfinder {
    marks: Vec<u32>,
    generation: u32,
    queue: VecDeque<FrontierEntry>,
    stats: SearchStats,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the scratch buffers for a world of `rooms` rooms.
    pub fn with_capacity(rooms: usize) -> Self {
        Self {
            marks: vec![0; rooms],
            generation: 0,
            queue: VecDeque::with_capacity(rooms.min(1024)),
            stats: SearchStats::default(),
        }
    }

    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Direction of the first step on a shortest route from `src` to
    /// `target`.
    pub fn find_first_step(
        &mut self,
        world: &World,
        src: RoomId,
        target: RoomId,
        policy: &SearchPolicy,
    ) -> PathResult {
        match self.search(world, src, target, policy) {
            Outcome::Invalid => {
                error!(
                    "SYSERR: Illegal value {} or {} passed to find_first_step",
                    src, target
                );
                PathResult::Error
            }
            Outcome::SameRoom => PathResult::AlreadyThere,
            Outcome::Unreachable => PathResult::NoPath,
            Outcome::Found { dir, .. } => PathResult::Step(dir),
        }
    }

    /// Number of hops on a shortest route, `Some(0)` when `src == target`,
    /// `None` when there is no route or a handle is invalid.
    pub fn count_rooms_between(
        &mut self,
        world: &World,
        src: RoomId,
        target: RoomId,
        policy: &SearchPolicy,
    ) -> Option<usize> {
        match self.search(world, src, target, policy) {
            Outcome::SameRoom => Some(0),
            Outcome::Found { depth, .. } => Some(depth),
            Outcome::Invalid | Outcome::Unreachable => None,
        }
    }

    fn search(
        &mut self,
        world: &World,
        src: RoomId,
        target: RoomId,
        policy: &SearchPolicy,
    ) -> Outcome {
        self.stats = SearchStats::default();

        if !world.contains(src) || !world.contains(target) {
            return Outcome::Invalid;
        }

        if policy.zone_scope == ZoneScope::SameZone && world.zone_of(src) != world.zone_of(target)
        {
            return Outcome::Unreachable;
        }

        if src == target {
            return Outcome::SameRoom;
        }

        self.begin(world.room_count());
        self.mark(src);

        let dirs = Direction::enumerate(policy.diagonal_dirs);

        for &dir in dirs {
            if let Some(to) = self.valid_edge(world, src, dir, policy) {
                self.mark(to);
                self.enqueue(to, dir, 1);
            }
        }

        while let Some(front) = self.queue.front().copied() {
            if front.room == target {
                self.queue.clear();
                trace!(
                    "find_first_step {} -> {}: {} after {} expansions, {} enqueued",
                    src,
                    target,
                    front.dir,
                    self.stats.expanded,
                    self.stats.enqueued
                );
                return Outcome::Found {
                    dir: front.dir,
                    depth: front.depth,
                };
            }

            if let Some(limit) = policy.max_expansions {
                if self.stats.expanded >= limit {
                    debug!(
                        "find_first_step {} -> {}: gave up after {} expansions",
                        src, target, limit
                    );
                    self.queue.clear();
                    return Outcome::Unreachable;
                }
            }

            for &dir in dirs {
                if let Some(to) = self.valid_edge(world, front.room, dir, policy) {
                    self.mark(to);
                    self.enqueue(to, front.dir, front.depth + 1);
                }
            }
            self.stats.expanded += 1;
            self.queue.pop_front();
        }

        trace!(
            "find_first_step {} -> {}: exhausted after {} expansions",
            src,
            target,
            self.stats.expanded
        );
        Outcome::Unreachable
    }

    fn valid_edge(
        &self,
        world: &World,
        room: RoomId,
        dir: Direction,
        policy: &SearchPolicy,
    ) -> Option<RoomId> {
        if world.is_traversable(room, dir, policy.track_through_doors, |r| self.is_marked(r)) {
            world.exit_target(room, dir)
        } else {
            None
        }
    }

    /// Start a new search generation, invalidating every existing mark.
    fn begin(&mut self, rooms: usize) {
        self.queue.clear();
        if self.marks.len() < rooms {
            self.marks.resize(rooms, 0);
        }
        self.generation = match self.generation.checked_add(1) {
            Some(next) => next,
            None => {
                self.marks.iter_mut().for_each(|m| *m = 0);
                1
            }
        };
    }

    fn mark(&mut self, room: RoomId) {
        self.marks[room.index()] = self.generation;
    }

    fn is_marked(&self, room: RoomId) -> bool {
        self.marks
            .get(room.index())
            .is_some_and(|m| *m == self.generation)
    }

    fn enqueue(&mut self, room: RoomId, dir: Direction, depth: usize) {
        self.stats.enqueued += 1;
        self.queue.push_back(FrontierEntry { room, dir, depth });
    }
}

/// One-shot convenience wrapper around [`Pathfinder::find_first_step`].
pub fn find_first_step(
    world: &World,
    src: RoomId,
    target: RoomId,
    policy: &SearchPolicy,
) -> PathResult {
    Pathfinder::with_capacity(world.room_count()).find_first_step(world, src, target, policy)
}

/// One-shot convenience wrapper around [`Pathfinder::count_rooms_between`].
pub fn count_rooms_between(
    world: &World,
    src: RoomId,
    target: RoomId,
    policy: &SearchPolicy,
) -> Option<usize> {
    Pathfinder::with_capacity(world.room_count()).count_rooms_between(world, src, target, policy)
}
