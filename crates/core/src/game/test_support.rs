//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating map and entity setup across many tests.
//! It does not own production gameplay logic.

use slotmap::SlotMap;

use super::*;
use crate::content::{BOSSES, ENEMIES, MINI_BOSSES, NPCS, PlayerClass, item_archetype};
use crate::mapgen::progression::spawn_enemy;
use crate::state::{ItemStack, Npc};

pub(crate) fn corridor_map(rows: &[&str]) -> Map {
    let rows: Vec<String> = rows.iter().map(|row| row.to_string()).collect();
    let explored: Vec<Vec<bool>> = rows.iter().map(|row| vec![false; row.chars().count()]).collect();
    Map::from_rows(&rows, &explored).expect("fixture rows are rectangular")
}

/// A walled rectangle of floor with the stairs in the bottom-right corner and
/// the player at (5, 4). No enemies, items or NPCs.
pub(crate) fn open_room_game(width: usize, height: usize) -> Game {
    let mut map = Map::filled(width, height, Tile::Wall);
    for y in 1..height as i32 - 1 {
        for x in 1..width as i32 - 1 {
            map.set_tile(Pos { y, x }, Tile::Floor);
        }
    }
    let stairs = Pos { y: height as i32 - 2, x: width as i32 - 2 };
    map.set_tile(stairs, Tile::Stairs);
    let spawn = Pos::new(5, 4);
    game_on_map(map, spawn, stairs)
}

pub(crate) fn game_on_map(map: Map, spawn: Pos, stairs: Pos) -> Game {
    let rules = Rules::default();
    let player = Game::starting_player(&rules, PlayerClass::SolidityDev, spawn);
    Game {
        seed: 7,
        turn: 0,
        dice: Dice::from_seed(7),
        state: GameState {
            map,
            floor: 1,
            stairs,
            spawn,
            player,
            enemies: SlotMap::with_key(),
            items: SlotMap::with_key(),
            npcs: SlotMap::with_key(),
            status: RunStatus::Playing,
            messages: MessageLog::new(rules.message_cap),
            meta: Meta::default(),
            inventory_open: false,
        },
        rules,
        events: Vec::new(),
    }
}

pub(crate) fn place_enemy(game: &mut Game, pos: Pos, kind: EnemyKind) -> EnemyId {
    let archetype = match kind {
        EnemyKind::Normal => &ENEMIES[1],
        EnemyKind::MiniBoss => &MINI_BOSSES[0],
        EnemyKind::Boss => &BOSSES[0],
    };
    let enemy = spawn_enemy(&game.rules, archetype, kind, game.state.floor, pos);
    game.state.enemies.insert(enemy)
}

pub(crate) fn stack(kind: ItemKind, quantity: u32) -> ItemStack {
    let archetype = item_archetype(kind);
    ItemStack {
        name: archetype.name.to_string(),
        glyph: archetype.glyph,
        kind,
        amount: archetype.amount,
        quantity,
    }
}

pub(crate) fn place_item(game: &mut Game, pos: Pos, kind: ItemKind) -> ItemId {
    game.state.items.insert(FloorItem { pos, stack: stack(kind, 1) })
}

pub(crate) fn place_npc(game: &mut Game, pos: Pos, role: NpcRole) -> NpcId {
    let archetype = NPCS.iter().find(|archetype| archetype.role == role).expect("every role has an archetype");
    game.state.npcs.insert(Npc {
        pos,
        name: archetype.name.to_string(),
        glyph: archetype.glyph,
        role,
        used: false,
    })
}
