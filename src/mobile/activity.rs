use crate::mobile::character::{CharId, MobFlag};
use crate::mobile::hooks::Host;
use crate::mobile::hunt::{hunt_loadroom, hunt_victim};
use crate::mobile::patrol::move_on_path;
use crate::mobile::Realm;

/// Movement part of one NPC AI activation: patrol first, then the hunt, then
/// the sentinel's walk home. Players, sleeping NPCs and fighting NPCs are
/// left alone.
pub fn mobile_pursuit<H: Host + ?Sized>(realm: &mut Realm, host: &mut H, actor: CharId) {
    let Some(ch) = realm.roster.get(actor) else {
        return;
    };
    if !ch.is_npc() || !ch.is_awake() {
        return;
    }

    if move_on_path(realm, host, actor) {
        return;
    }

    match realm.roster.get(actor) {
        Some(ch) if ch.fighting.is_none() => {}
        _ => return,
    }

    hunt_victim(realm, host, actor);

    let Some(ch) = realm.roster.get(actor) else {
        return;
    };
    let away_from_home = ch.load_room.is_some() && ch.room() != ch.load_room;
    if ch.hunting.is_none()
        && ch.memory.is_empty()
        && ch.master.is_none()
        && ch.mob_flagged(MobFlag::Sentinel)
        && !ch.is_pet()
        && away_from_home
    {
        hunt_loadroom(realm, host, actor);
    }
}
