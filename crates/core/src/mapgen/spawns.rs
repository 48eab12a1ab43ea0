//! Enemy, boss, item and NPC placement on a finished layout.

use std::collections::BTreeSet;

use crate::content::{BOSSES, ENEMIES, EnemyArchetype, ITEMS, MINI_BOSSES, NPCS};
use crate::rng::Dice;
use crate::rules::Rules;
use crate::state::{Enemy, FloorItem, ItemStack, Map, Npc, footprint_distance, footprint_tiles};
use crate::types::{EnemyKind, Pos, Tile};

use super::progression;

pub(super) struct SpawnContext<'a> {
    pub(super) rules: &'a Rules,
    pub(super) floor: u32,
    pub(super) map: &'a Map,
    pub(super) spawn: Pos,
}

/// Tiles claimed by anything placed so far on this floor.
#[derive(Default)]
pub(super) struct Occupancy {
    taken: BTreeSet<Pos>,
}

impl Occupancy {
    fn is_free(&self, pos: Pos) -> bool {
        !self.taken.contains(&pos)
    }

    fn claim(&mut self, origin: Pos, size: i32) {
        self.taken.extend(footprint_tiles(origin, size));
    }
}

fn is_open_floor(context: &SpawnContext<'_>, occupancy: &Occupancy, pos: Pos) -> bool {
    context.map.tile_at(pos) == Tile::Floor && pos != context.spawn && occupancy.is_free(pos)
}

pub(super) fn random_floor_tile(
    context: &SpawnContext<'_>,
    occupancy: &Occupancy,
    dice: &mut Dice,
) -> Option<Pos> {
    let max_x = context.map.width() as i32 - 2;
    let max_y = context.map.height() as i32 - 2;
    for _ in 0..context.rules.spawns.placement_attempts {
        let pos = Pos { y: dice.range(1, max_y), x: dice.range(1, max_x) };
        if is_open_floor(context, occupancy, pos) {
            return Some(pos);
        }
    }
    None
}

fn footprint_clear(context: &SpawnContext<'_>, occupancy: &Occupancy, origin: Pos, size: i32) -> bool {
    footprint_tiles(origin, size).all(|pos| is_open_floor(context, occupancy, pos))
        && footprint_distance(origin, size, context.spawn) >= context.rules.spawns.boss_min_distance
}

fn place_footprint(
    context: &SpawnContext<'_>,
    occupancy: &Occupancy,
    dice: &mut Dice,
    size: i32,
) -> Option<Pos> {
    let max_x = context.map.width() as i32 - 1 - size;
    let max_y = context.map.height() as i32 - 1 - size;
    if max_x < 1 || max_y < 1 {
        return None;
    }
    for _ in 0..context.rules.spawns.placement_attempts {
        let origin = Pos { y: dice.range(1, max_y), x: dice.range(1, max_x) };
        if footprint_clear(context, occupancy, origin, size) {
            return Some(origin);
        }
    }
    // Deterministic scan so a boss floor is never left without its boss.
    context
        .map
        .positions()
        .find(|&origin| footprint_clear(context, occupancy, origin, size))
}

fn pick_normal_archetype(rules: &Rules, floor: u32, dice: &mut Dice) -> &'static EnemyArchetype {
    let max_tier = rules.max_tier(floor);
    let weights: Vec<u32> = ENEMIES
        .iter()
        .map(|archetype| if archetype.tier <= max_tier { progression::tier_weight(archetype.tier) } else { 0 })
        .collect();
    dice.pick_weighted(&weights).and_then(|idx| ENEMIES.get(idx)).unwrap_or(&ENEMIES[0])
}

pub(super) fn generate_enemies(
    context: &SpawnContext<'_>,
    occupancy: &mut Occupancy,
    dice: &mut Dice,
) -> Vec<Enemy> {
    let rules = context.rules;
    let mut enemies = Vec::new();

    let special = if rules.is_boss_floor(context.floor) {
        Some((EnemyKind::Boss, BOSSES))
    } else if rules.is_miniboss_floor(context.floor) {
        Some((EnemyKind::MiniBoss, MINI_BOSSES))
    } else {
        None
    };
    if let Some((kind, roster)) = special
        && let Some(archetype) = dice.pick(roster)
    {
        match place_footprint(context, occupancy, dice, kind.footprint()) {
            Some(origin) => {
                occupancy.claim(origin, kind.footprint());
                enemies.push(progression::spawn_enemy(rules, archetype, kind, context.floor, origin));
            }
            None => log::warn!("floor {}: no room for {}", context.floor, archetype.name),
        }
    }

    for _ in 0..progression::enemy_count(rules, context.floor) {
        let Some(pos) = random_floor_tile(context, occupancy, dice) else {
            break;
        };
        let archetype = pick_normal_archetype(rules, context.floor, dice);
        occupancy.claim(pos, 1);
        enemies.push(progression::spawn_enemy(rules, archetype, EnemyKind::Normal, context.floor, pos));
    }
    enemies
}

/// Rolls one floor-weighted item archetype as a fresh single-unit stack.
pub(crate) fn roll_item(rules: &Rules, floor: u32, dice: &mut Dice) -> ItemStack {
    let weights = progression::item_weights(rules, floor);
    let archetype = dice.pick_weighted(&weights).and_then(|idx| ITEMS.get(idx)).unwrap_or(&ITEMS[0]);
    ItemStack {
        name: archetype.name.to_string(),
        glyph: archetype.glyph,
        kind: archetype.kind,
        amount: archetype.amount,
        quantity: 1,
    }
}

pub(super) fn generate_items(
    context: &SpawnContext<'_>,
    occupancy: &mut Occupancy,
    dice: &mut Dice,
) -> Vec<FloorItem> {
    let mut items = Vec::new();
    for _ in 0..progression::item_count(context.rules, context.floor) {
        let Some(pos) = random_floor_tile(context, occupancy, dice) else {
            break;
        };
        occupancy.claim(pos, 1);
        items.push(FloorItem { pos, stack: roll_item(context.rules, context.floor, dice) });
    }
    items
}

pub(super) fn generate_npcs(
    context: &SpawnContext<'_>,
    occupancy: &mut Occupancy,
    dice: &mut Dice,
) -> Vec<Npc> {
    let mut npcs = Vec::new();
    for _ in 0..progression::npc_count(context.rules, context.floor) {
        let Some(pos) = random_floor_tile(context, occupancy, dice) else {
            break;
        };
        let Some(archetype) = dice.pick(NPCS) else {
            break;
        };
        occupancy.claim(pos, 1);
        npcs.push(Npc {
            pos,
            name: archetype.name.to_string(),
            glyph: archetype.glyph,
            role: archetype.role,
            used: false,
        });
    }
    npcs
}
