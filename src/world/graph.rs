//! The static room graph: rooms, their directed exits and the read-only
//! traversal primitives the pathfinder is built on.
//!
//! Rooms are appended once at boot (or by a fixture) and never removed, so a
//! [`RoomId`] stays valid for the lifetime of its [`World`]. Door and flag
//! state can change at runtime; every query reads the current state.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::errors::TrailError;
use crate::world::types::{Direction, Exit, ExitFlag, Room, RoomFlag, RoomId, Vnum, ZoneId};

#[derive(Debug, Clone, Default)]
pub struct World {
    rooms: Vec<Room>,
    by_vnum: HashMap<Vnum, RoomId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a room and return its handle.
    pub fn add_room(&mut self, room: Room) -> Result<RoomId, TrailError> {
        if self.by_vnum.contains_key(&room.vnum) {
            return Err(TrailError::DuplicateVnum(room.vnum));
        }
        let id = RoomId(self.rooms.len() as u32);
        self.by_vnum.insert(room.vnum, id);
        self.rooms.push(room);
        Ok(id)
    }

    /// Install (or replace) the exit leaving `from` towards `dir`.
    /// Returns false when `from` is not a loaded room.
    pub fn set_exit(&mut self, from: RoomId, dir: Direction, exit: Exit) -> bool {
        match self.room_mut(from) {
            Some(room) => {
                room.exits[dir.code()] = Some(exit);
                true
            }
            None => false,
        }
    }

    /// One-way plain exit.
    pub fn link(&mut self, from: RoomId, dir: Direction, to: RoomId) -> bool {
        self.set_exit(from, dir, Exit::to(to))
    }

    /// Plain exits in both directions.
    pub fn link_both(&mut self, a: RoomId, dir: Direction, b: RoomId) -> bool {
        self.link(a, dir, b) && self.link(b, dir.reverse(), a)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// True for a loaded room; false for NOWHERE and out-of-range handles.
    pub fn contains(&self, id: RoomId) -> bool {
        !id.is_nowhere() && id.index() < self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        if id.is_nowhere() {
            return None;
        }
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        if id.is_nowhere() {
            return None;
        }
        self.rooms.get_mut(id.index())
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, room)| (RoomId(i as u32), room))
    }

    /// Map a persistent vnum to its loaded handle.
    pub fn real_room(&self, vnum: Vnum) -> Option<RoomId> {
        self.by_vnum.get(&vnum).copied()
    }

    pub fn vnum_of(&self, id: RoomId) -> Option<Vnum> {
        self.room(id).map(|r| r.vnum)
    }

    pub fn zone_of(&self, id: RoomId) -> Option<ZoneId> {
        self.room(id).map(|r| r.zone)
    }

    pub fn zones(&self) -> BTreeSet<ZoneId> {
        self.rooms.iter().map(|r| r.zone).collect()
    }

    pub fn room_flagged(&self, id: RoomId, flag: RoomFlag) -> bool {
        self.room(id).is_some_and(|r| r.has_flag(flag))
    }

    pub fn exit(&self, id: RoomId, dir: Direction) -> Option<&Exit> {
        self.room(id).and_then(|r| r.exit(dir))
    }

    /// Where the exit in `dir` leads, or `None` when there is no exit or it
    /// points at the "no exit" sentinel.
    pub fn exit_target(&self, id: RoomId, dir: Direction) -> Option<RoomId> {
        self.exit(id, dir)
            .and_then(|e| e.to_room)
            .filter(|to| !to.is_nowhere())
    }

    /// Whether a search may cross the edge `(id, dir)`.
    ///
    /// `is_marked` reports rooms already visited by the calling search; the
    /// graph itself holds no search state.
    pub fn is_traversable<F>(
        &self,
        id: RoomId,
        dir: Direction,
        track_through_doors: bool,
        is_marked: F,
    ) -> bool
    where
        F: Fn(RoomId) -> bool,
    {
        let Some(exit) = self.exit(id, dir) else {
            return false;
        };
        let Some(to) = exit.to_room.filter(|to| self.contains(*to)) else {
            return false;
        };
        if !track_through_doors && exit.is_closed() {
            return false;
        }
        if self.room_flagged(to, RoomFlag::NoTrack) || is_marked(to) {
            return false;
        }
        true
    }

    /// Whether a character standing in `id` could walk `dir` right now.
    pub fn can_go(&self, id: RoomId, dir: Direction) -> bool {
        match self.exit(id, dir) {
            Some(exit) => {
                exit.to_room.is_some_and(|to| self.contains(to)) && !exit.is_closed()
            }
            None => false,
        }
    }

    pub fn set_exit_flag(&mut self, id: RoomId, dir: Direction, flag: ExitFlag) -> bool {
        match self.room_mut(id).and_then(|r| r.exit_mut(dir)) {
            Some(exit) => {
                exit.set_flag(flag);
                true
            }
            None => false,
        }
    }

    pub fn remove_exit_flag(&mut self, id: RoomId, dir: Direction, flag: ExitFlag) -> bool {
        match self.room_mut(id).and_then(|r| r.exit_mut(dir)) {
            Some(exit) => {
                exit.remove_flag(flag);
                true
            }
            None => false,
        }
    }

    /// Close the door in `dir`, and its other side when the room beyond has
    /// an exit leading straight back. Use [`World::set_exit_flag`] for a
    /// one-sided change.
    pub fn close_door(&mut self, id: RoomId, dir: Direction) -> bool {
        let closed = self.set_exit_flag(id, dir, ExitFlag::Closed);
        if closed {
            if let Some(back) = self.back_side(id, dir) {
                self.set_exit_flag(back, dir.reverse(), ExitFlag::Closed);
            }
            debug!("door {} of room {} closed", dir, id);
        }
        closed
    }

    /// Open the door in `dir` and its other side, mirroring [`World::close_door`].
    pub fn open_door(&mut self, id: RoomId, dir: Direction) -> bool {
        let opened = self.remove_exit_flag(id, dir, ExitFlag::Closed);
        if opened {
            if let Some(back) = self.back_side(id, dir) {
                self.remove_exit_flag(back, dir.reverse(), ExitFlag::Closed);
            }
            debug!("door {} of room {} opened", dir, id);
        }
        opened
    }

    /// The room beyond `dir`, if its reverse exit leads back into `id`.
    fn back_side(&self, id: RoomId, dir: Direction) -> Option<RoomId> {
        let other = self.exit_target(id, dir)?;
        (self.exit_target(other, dir.reverse()) == Some(id)).then_some(other)
    }

    pub fn set_room_flag(&mut self, id: RoomId, flag: RoomFlag) -> bool {
        match self.room_mut(id) {
            Some(room) => {
                if !room.flags.contains(&flag) {
                    room.flags.push(flag);
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_room_flag(&mut self, id: RoomId, flag: RoomFlag) -> bool {
        match self.room_mut(id) {
            Some(room) => {
                room.flags.retain(|f| *f != flag);
                true
            }
            None => false,
        }
    }
}
