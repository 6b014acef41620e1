use thiserror::Error;

use crate::world::Vnum;

/// Errors that can arise while loading worlds, reading configuration or
/// resolving characters. Pathfinding itself never fails with an error; it
/// reports through [`crate::pathfind::PathResult`].
#[derive(Debug, Error)]
pub enum TrailError {
    /// Wrapper around IO errors (world files, config files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON world-file parse errors.
    #[error("world file parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around TOML config parse errors.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two rooms in the same world claim one vnum.
    #[error("duplicate room vnum {0}")]
    DuplicateVnum(Vnum),

    /// A vnum that does not name any loaded room.
    #[error("no room with vnum {0}")]
    UnknownRoom(Vnum),

    /// Direction keyword that does not parse.
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    /// Room or exit flag keyword that does not parse.
    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    /// Character handle that is not in the roster.
    #[error("character not found: {0}")]
    UnknownCharacter(String),

    /// Configuration value outside its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
