//! Installation of a generated floor into the live world.

use super::*;
use crate::content::floor_name;
use crate::mapgen::GeneratedFloor;

pub(in crate::game) fn install_generated_floor(game: &mut Game, generated: GeneratedFloor) {
    let GeneratedFloor { floor, map, spawn, stairs, enemies, items, npcs, .. } = generated;

    game.state.enemies.clear();
    for enemy in enemies {
        game.state.enemies.insert(enemy);
    }
    game.state.items.clear();
    for item in items {
        game.state.items.insert(item);
    }
    game.state.npcs.clear();
    for npc in npcs {
        game.state.npcs.insert(npc);
    }

    game.state.map = map;
    game.state.floor = floor;
    game.state.spawn = spawn;
    game.state.stairs = stairs;
    game.state.player.pos = spawn;
    game.state.meta.high_floor = game.state.meta.high_floor.max(floor);
    game.reveal_fog();

    let name = floor_name(floor);
    game.say(format!("Floor {floor}: {name}. Gas fees rising."), Tone::System);
    if game.state.stairs_locked() {
        game.say("A guardian holds the stairs on this floor.", Tone::Danger);
    }
    game.emit(GameEvent::FloorChanged { floor });
    log::info!("entered floor {floor} ({name}) with {} enemies", game.state.enemies.len());
}
