//! Floor progression rules: population counts, tier gating and stat curves.

use crate::content::{EnemyArchetype, ITEMS};
use crate::rules::Rules;
use crate::state::Enemy;
use crate::types::{EnemyKind, ItemKind, Pos};

pub fn enemy_count(rules: &Rules, floor: u32) -> usize {
    let spawns = &rules.spawns;
    let raw = spawns.enemy_base + spawns.enemy_per_floor * floor;
    raw.clamp(spawns.enemy_min, spawns.enemy_max.max(spawns.enemy_min)) as usize
}

pub fn item_count(rules: &Rules, floor: u32) -> usize {
    let spawns = &rules.spawns;
    let raw = spawns.item_base + 2 * floor.isqrt();
    raw.clamp(spawns.item_min, spawns.item_max.max(spawns.item_min)) as usize
}

pub fn npc_count(rules: &Rules, floor: u32) -> usize {
    let every = rules.spawns.npc_every;
    usize::from(every > 0 && floor > 0 && floor.is_multiple_of(every))
}

/// Spawn weight for an eligible archetype. Newer tiers weigh more.
pub fn tier_weight(tier: u32) -> u32 {
    tier + 1
}

/// Percent multiplier applied to base stats at the given depth.
pub fn scale_pct(rules: &Rules, kind: EnemyKind, floor: u32) -> u32 {
    let depth = floor.saturating_sub(1);
    let spawns = &rules.spawns;
    match kind {
        EnemyKind::Normal => 100 + spawns.normal_growth_pct * depth,
        EnemyKind::MiniBoss | EnemyKind::Boss => {
            100 + spawns.boss_growth_pct * depth + depth * depth / spawns.boss_quadratic_divisor.max(1)
        }
    }
}

fn scale(stat: i32, pct: u32) -> i32 {
    (i64::from(stat) * i64::from(pct) / 100) as i32
}

pub fn spawn_enemy(
    rules: &Rules,
    archetype: &EnemyArchetype,
    kind: EnemyKind,
    floor: u32,
    pos: Pos,
) -> Enemy {
    let pct = scale_pct(rules, kind, floor);
    let hp = scale(archetype.hp, pct).max(6);
    Enemy {
        pos,
        name: archetype.name.to_string(),
        glyph: archetype.glyph,
        color: archetype.color,
        kind,
        tier: archetype.tier,
        hp,
        maxhp: hp,
        atk: scale(archetype.atk, pct).max(1),
        def: scale(archetype.def, pct).max(0),
        xp: (u64::from(archetype.xp) * u64::from(pct) / 100).max(6) as u32,
        aggro: false,
    }
}

/// Re-applies the curve of `floor` to a boss or mini-boss, keeping its hp fraction.
pub fn rescale_enemy(rules: &Rules, enemy: &mut Enemy, archetype: &EnemyArchetype, floor: u32) {
    let fresh = spawn_enemy(rules, archetype, enemy.kind, floor, enemy.pos);
    if enemy.is_alive() && enemy.maxhp > 0 {
        let hp = i64::from(enemy.hp) * i64::from(fresh.maxhp) / i64::from(enemy.maxhp);
        enemy.hp = (hp as i32).clamp(1, fresh.maxhp);
    }
    enemy.maxhp = fresh.maxhp;
    enemy.atk = fresh.atk;
    enemy.def = fresh.def;
    enemy.xp = fresh.xp;
}

fn base_item_weight(kind: ItemKind) -> u32 {
    match kind {
        ItemKind::Heal => 3,
        ItemKind::Gas => 2,
        ItemKind::Atk | ItemKind::Def => 1,
        ItemKind::Xp => 2,
    }
}

/// Per-item weights in `ITEMS` order. Gas canisters are boosted on early floors and
/// taper linearly to their base weight.
pub fn item_weights(rules: &Rules, floor: u32) -> Vec<u32> {
    let spawns = &rules.spawns;
    let boost = spawns.gas_boost.max(1);
    let until = spawns.gas_boost_until_floor.max(2);
    let gas_pct = if floor >= until {
        100
    } else {
        let depth = floor.saturating_sub(1);
        (boost * 100).saturating_sub((boost - 1) * 100 * depth / (until - 1)).max(100)
    };
    ITEMS
        .iter()
        .map(|archetype| {
            let pct = if archetype.kind == ItemKind::Gas { gas_pct } else { 100 };
            base_item_weight(archetype.kind) * pct
        })
        .collect()
}
