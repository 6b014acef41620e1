use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TrailError;

/// Persistent external room identifier, as written in world files.
pub type Vnum = u32;

/// Zone (authored area) a room belongs to.
pub type ZoneId = u32;

/// Number of traversal directions, diagonals included.
pub const NUM_OF_DIRS: usize = 10;

/// Number of directions enumerated when diagonal movement is disabled.
pub const NUM_CARDINAL_DIRS: usize = 6;

/// Handle of a loaded room (its index into the world). Distinct from the
/// room's [`Vnum`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Sentinel for "no room at all".
    pub const NOWHERE: RoomId = RoomId(u32::MAX);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_nowhere(self) -> bool {
        self == Self::NOWHERE
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nowhere() {
            write!(f, "NOWHERE")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Traversal direction. Declaration order is the search enumeration order and
/// must not change: it decides which of several equally short routes wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
    Northwest,
    Northeast,
    Southeast,
    Southwest,
}

impl Direction {
    pub const ALL: [Direction; NUM_OF_DIRS] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::Northwest,
        Direction::Northeast,
        Direction::Southeast,
        Direction::Southwest,
    ];

    /// Directions a search walks, in order. Diagonals trail the six
    /// orthogonal directions and are only included when enabled.
    pub fn enumerate(diagonals: bool) -> &'static [Direction] {
        if diagonals {
            &Self::ALL
        } else {
            &Self::ALL[..NUM_CARDINAL_DIRS]
        }
    }

    /// Numeric direction code (0..=9).
    pub fn code(self) -> usize {
        self as usize
    }

    pub fn from_code(code: usize) -> Option<Direction> {
        Self::ALL.get(code).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Northwest => "northwest",
            Direction::Northeast => "northeast",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Northwest => Direction::Southeast,
            Direction::Northeast => Direction::Southwest,
            Direction::Southeast => Direction::Northwest,
            Direction::Southwest => Direction::Northeast,
        }
    }

    /// Coordinate delta on the wilderness grid; `y` grows to the north.
    /// Vertical directions have no planar delta.
    pub fn grid_delta(self) -> Option<(i32, i32)> {
        match self {
            Direction::North => Some((0, 1)),
            Direction::East => Some((1, 0)),
            Direction::South => Some((0, -1)),
            Direction::West => Some((-1, 0)),
            Direction::Northwest => Some((-1, 1)),
            Direction::Northeast => Some((1, 1)),
            Direction::Southeast => Some((1, -1)),
            Direction::Southwest => Some((-1, -1)),
            Direction::Up | Direction::Down => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dir = match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Direction::North,
            "e" | "east" => Direction::East,
            "s" | "south" => Direction::South,
            "w" | "west" => Direction::West,
            "u" | "up" => Direction::Up,
            "d" | "down" => Direction::Down,
            "nw" | "northwest" => Direction::Northwest,
            "ne" | "northeast" => Direction::Northeast,
            "se" | "southeast" => Direction::Southeast,
            "sw" | "southwest" => Direction::Southwest,
            _ => return Err(TrailError::UnknownDirection(s.to_string())),
        };
        Ok(dir)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomFlag {
    /// Tracking searches never pass through this room.
    NoTrack,
    /// Tracking is impossible from inside this room.
    Fog,
    Dark,
    Indoors,
    Peaceful,
}

impl FromStr for RoomFlag {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_ascii_lowercase()))
            .map_err(|_| TrailError::UnknownFlag(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExitFlag {
    IsDoor,
    Closed,
}

/// Directed edge out of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    /// `None` is the "no exit" sentinel: never traversable.
    pub to_room: Option<RoomId>,
    pub flags: Vec<ExitFlag>,
}

impl Exit {
    pub fn to(room: RoomId) -> Self {
        Self {
            to_room: Some(room),
            flags: Vec::new(),
        }
    }

    /// An exit whose destination did not resolve.
    pub fn nowhere() -> Self {
        Self {
            to_room: None,
            flags: Vec::new(),
        }
    }

    pub fn with_flag(mut self, flag: ExitFlag) -> Self {
        self.set_flag(flag);
        self
    }

    pub fn has_flag(&self, flag: ExitFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn set_flag(&mut self, flag: ExitFlag) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    pub fn remove_flag(&mut self, flag: ExitFlag) {
        self.flags.retain(|f| *f != flag);
    }

    pub fn is_closed(&self) -> bool {
        self.has_flag(ExitFlag::Closed)
    }

    pub fn is_door(&self) -> bool {
        self.has_flag(ExitFlag::IsDoor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub vnum: Vnum,
    pub zone: ZoneId,
    pub name: String,
    pub flags: Vec<RoomFlag>,
    pub exits: [Option<Exit>; NUM_OF_DIRS],
}

impl Room {
    pub fn new(vnum: Vnum, zone: ZoneId, name: &str) -> Self {
        Self {
            vnum,
            zone,
            name: name.to_string(),
            flags: Vec::new(),
            exits: Default::default(),
        }
    }

    pub fn with_flag(mut self, flag: RoomFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn has_flag(&self, flag: RoomFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn exit(&self, dir: Direction) -> Option<&Exit> {
        self.exits[dir.code()].as_ref()
    }

    pub fn exit_mut(&mut self, dir: Direction) -> Option<&mut Exit> {
        self.exits[dir.code()].as_mut()
    }
}
