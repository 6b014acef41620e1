use serde::{Deserialize, Serialize};

use crate::world::{RoomId, Vnum};

/// Level at and above which a character is an implementor.
pub const LVL_IMPL: u8 = 34;
/// Level at and above which a character is an immortal.
pub const LVL_IMMORT: u8 = 31;

/// Length of an action cooldown, in seconds.
pub const ACTION_COOLDOWN_SECS: u32 = 6;

/// Roster handle of a character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharId(pub u32);

/// Where a character stands: a node of the room graph, or a coordinate of
/// the open-world wilderness grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Room(RoomId),
    Wilderness { x: i32, y: i32 },
}

impl Location {
    pub fn room(self) -> Option<RoomId> {
        match self {
            Location::Room(id) => Some(id),
            Location::Wilderness { .. } => None,
        }
    }

    pub fn is_wilderness(self) -> bool {
        matches!(self, Location::Wilderness { .. })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CharKind {
    Player,
    Npc,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Dead,
    Sleeping,
    Resting,
    Sitting,
    Fighting,
    #[default]
    Standing,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Neutral,
    Male,
    Female,
}

impl Sex {
    /// Objective pronoun ("him", "her", "it").
    pub fn objective(self) -> &'static str {
        match self {
            Sex::Male => "him",
            Sex::Female => "her",
            Sex::Neutral => "it",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AffectFlag {
    /// Under someone else's control.
    Charm,
    /// Leaves no trail for the `track` command.
    NoTrack,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MobFlag {
    /// Protected mob; never hunts.
    NoKill,
    /// Remembers attackers and hunts them down.
    Memory,
    /// Stays at (and walks back to) its load room.
    Sentinel,
    Shopkeeper,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PrefFlag {
    /// Mobs leave this player alone.
    NoHassle,
}

/// Capabilities relevant to tracking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Feat {
    Track,
    NaturalTracker,
    /// Tracking costs no movement and no action.
    SwiftTracker,
    /// Creature scent; counts as tracking ability.
    Scent,
    /// Lowers the tracking difficulty.
    KeenScent,
}

/// Seconds left before a move or standard action is available again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActionCooldowns {
    pub movement: u32,
    pub standard: u32,
}

impl ActionCooldowns {
    /// Spend a move action; falls back to the standard action when the move
    /// action is already cooling down.
    pub fn use_move_action(&mut self) {
        if self.movement == 0 {
            self.movement = ACTION_COOLDOWN_SECS;
        } else {
            self.standard = ACTION_COOLDOWN_SECS;
        }
    }

    pub fn tick(&mut self, secs: u32) {
        self.movement = self.movement.saturating_sub(secs);
        self.standard = self.standard.saturating_sub(secs);
    }
}

/// Fixed route an NPC walks, one step per activation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Patrol {
    /// Waypoint room vnums, visited in order and wrapping around.
    pub waypoints: Vec<Vnum>,
    /// Index of the waypoint currently headed for.
    pub index: usize,
    /// Activations to wait before the next advance.
    pub delay: u32,
    /// Value `delay` is reset to after each advance.
    pub reset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: CharId,
    /// Persistent player id; what NPC memories refer to.
    pub idnum: u32,
    pub name: String,
    pub kind: CharKind,
    pub sex: Sex,
    pub level: u8,
    pub location: Location,
    #[serde(default)]
    pub position: Position,
    /// Movement points.
    pub moves: i32,
    #[serde(default)]
    pub fighting: Option<CharId>,
    #[serde(default)]
    pub master: Option<CharId>,
    #[serde(default)]
    pub hunting: Option<CharId>,
    /// Idnums this NPC remembers as threats.
    #[serde(default)]
    pub memory: Vec<u32>,
    #[serde(default)]
    pub load_room: Option<RoomId>,
    #[serde(default)]
    pub affects: Vec<AffectFlag>,
    #[serde(default)]
    pub mob_flags: Vec<MobFlag>,
    #[serde(default)]
    pub prefs: Vec<PrefFlag>,
    #[serde(default)]
    pub feats: Vec<Feat>,
    /// Survival ability modifier.
    #[serde(default)]
    pub survival: i32,
    #[serde(default)]
    pub cooldowns: ActionCooldowns,
    #[serde(default)]
    pub patrol: Option<Patrol>,
}

impl Character {
    pub fn player(name: &str, idnum: u32, location: Location) -> Self {
        Self::new(name, idnum, CharKind::Player, location)
    }

    pub fn npc(name: &str, location: Location) -> Self {
        Self::new(name, 0, CharKind::Npc, location)
    }

    fn new(name: &str, idnum: u32, kind: CharKind, location: Location) -> Self {
        Self {
            id: CharId(0),
            idnum,
            name: name.to_string(),
            kind,
            sex: Sex::Neutral,
            level: 1,
            location,
            position: Position::Standing,
            moves: 100,
            fighting: None,
            master: None,
            hunting: None,
            memory: Vec::new(),
            load_room: None,
            affects: Vec::new(),
            mob_flags: Vec::new(),
            prefs: Vec::new(),
            feats: Vec::new(),
            survival: 0,
            cooldowns: ActionCooldowns::default(),
            patrol: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_moves(mut self, moves: i32) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_survival(mut self, survival: i32) -> Self {
        self.survival = survival;
        self
    }

    pub fn with_feat(mut self, feat: Feat) -> Self {
        if !self.feats.contains(&feat) {
            self.feats.push(feat);
        }
        self
    }

    pub fn with_affect(mut self, affect: AffectFlag) -> Self {
        if !self.affects.contains(&affect) {
            self.affects.push(affect);
        }
        self
    }

    pub fn with_mob_flag(mut self, flag: MobFlag) -> Self {
        if !self.mob_flags.contains(&flag) {
            self.mob_flags.push(flag);
        }
        self
    }

    pub fn with_pref(mut self, pref: PrefFlag) -> Self {
        if !self.prefs.contains(&pref) {
            self.prefs.push(pref);
        }
        self
    }

    pub fn with_load_room(mut self, room: RoomId) -> Self {
        self.load_room = Some(room);
        self
    }

    pub fn with_memory(mut self, idnum: u32) -> Self {
        if !self.memory.contains(&idnum) {
            self.memory.push(idnum);
        }
        self
    }

    pub fn with_master(mut self, master: CharId) -> Self {
        self.master = Some(master);
        self
    }

    pub fn with_patrol(mut self, patrol: Patrol) -> Self {
        self.patrol = Some(patrol);
        self
    }

    pub fn is_npc(&self) -> bool {
        self.kind == CharKind::Npc
    }

    /// Anything above sleeping.
    pub fn is_awake(&self) -> bool {
        !matches!(self.position, Position::Dead | Position::Sleeping)
    }

    pub fn has_feat(&self, feat: Feat) -> bool {
        self.feats.contains(&feat)
    }

    pub fn affected_by(&self, affect: AffectFlag) -> bool {
        self.affects.contains(&affect)
    }

    pub fn mob_flagged(&self, flag: MobFlag) -> bool {
        self.is_npc() && self.mob_flags.contains(&flag)
    }

    pub fn pref_flagged(&self, pref: PrefFlag) -> bool {
        !self.is_npc() && self.prefs.contains(&pref)
    }

    pub fn can_track(&self) -> bool {
        self.has_feat(Feat::Track) || self.has_feat(Feat::NaturalTracker) || self.has_feat(Feat::Scent)
    }

    /// A charmed NPC with a master: reports what it does back to the master.
    pub fn is_charmed_follower(&self) -> bool {
        self.is_npc() && self.master.is_some() && self.affected_by(AffectFlag::Charm)
    }

    pub fn is_pet(&self) -> bool {
        self.is_charmed_follower()
    }

    pub fn room(&self) -> Option<RoomId> {
        self.location.room()
    }

    pub fn in_wilderness(&self) -> bool {
        self.location.is_wilderness()
    }
}

/// The ordered list of every character in the game.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    chars: Vec<Character>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character, assigning it a fresh handle.
    pub fn add(&mut self, mut ch: Character) -> CharId {
        let id = CharId(self.next_id);
        self.next_id += 1;
        ch.id = id;
        self.chars.push(ch);
        id
    }

    /// Remove a character (death, logout, purge). Anything still pointing at
    /// the handle goes stale and must be revalidated with [`Roster::contains`].
    pub fn remove(&mut self, id: CharId) -> Option<Character> {
        let pos = self.chars.iter().position(|c| c.id == id)?;
        Some(self.chars.remove(pos))
    }

    pub fn contains(&self, id: CharId) -> bool {
        self.chars.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: CharId) -> Option<&Character> {
        self.chars.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharId) -> Option<&mut Character> {
        self.chars.iter_mut().find(|c| c.id == id)
    }

    /// Case-insensitive name lookup; the first match in roster order wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.chars
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.chars.iter()
    }

    pub fn ids(&self) -> Vec<CharId> {
        self.chars.iter().map(|c| c.id).collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether two characters occupy the same spot.
    pub fn same_location(&self, a: CharId, b: CharId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.location == b.location,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_assigns_ids_in_order() {
        let mut roster = Roster::new();
        let a = roster.add(Character::player("Ayla", 7, Location::Room(RoomId(0))));
        let b = roster.add(Character::npc("wolf", Location::Room(RoomId(1))));
        assert_eq!(roster.ids(), vec![a, b]);
        assert_eq!(roster.get(b).unwrap().name, "wolf");
        assert_eq!(roster.find_by_name("AYLA").unwrap().id, a);
    }

    #[test]
    fn removed_handles_go_stale() {
        let mut roster = Roster::new();
        let a = roster.add(Character::player("Ayla", 7, Location::Room(RoomId(0))));
        let b = roster.add(Character::player("Bren", 8, Location::Room(RoomId(0))));
        assert!(roster.remove(a).is_some());
        assert!(!roster.contains(a));
        assert!(roster.contains(b));
        let c = roster.add(Character::player("Cato", 9, Location::Room(RoomId(0))));
        assert_ne!(a, c);
    }

    #[test]
    fn pet_requires_charm_and_master() {
        let npc = Character::npc("hound", Location::Room(RoomId(0)));
        assert!(!npc.is_pet());
        let npc = npc.with_master(CharId(3));
        assert!(!npc.is_pet());
        let npc = npc.with_affect(AffectFlag::Charm);
        assert!(npc.is_pet());
        let player = Character::player("Ayla", 1, Location::Room(RoomId(0)))
            .with_master(CharId(3))
            .with_affect(AffectFlag::Charm);
        assert!(!player.is_pet());
    }

    #[test]
    fn mob_flags_only_apply_to_npcs() {
        let player =
            Character::player("Ayla", 1, Location::Room(RoomId(0))).with_mob_flag(MobFlag::Memory);
        assert!(!player.mob_flagged(MobFlag::Memory));
    }

    #[test]
    fn move_action_falls_back_to_standard() {
        let mut cd = ActionCooldowns::default();
        cd.use_move_action();
        assert_eq!(cd, ActionCooldowns { movement: 6, standard: 0 });
        cd.use_move_action();
        assert_eq!(cd, ActionCooldowns { movement: 6, standard: 6 });
        cd.tick(10);
        assert_eq!(cd, ActionCooldowns::default());
    }
}
