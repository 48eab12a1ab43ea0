//! Connectivity repair and stairs placement over a carved map.

use std::collections::VecDeque;

use crate::state::Map;
use crate::types::{Pos, Tile, manhattan, neighbors};

/// Tiles reachable from `start` through 4-directional walkable steps, indexed row-major.
pub fn flood_reachable(map: &Map, start: Pos) -> Vec<bool> {
    let width = map.width();
    let mut seen = vec![false; width * map.height()];
    if !map.is_walkable(start) {
        return seen;
    }
    let index = |pos: Pos| (pos.y as usize) * width + (pos.x as usize);

    seen[index(start)] = true;
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        for next in neighbors(pos) {
            if !map.is_walkable(next) || seen[index(next)] {
                continue;
            }
            seen[index(next)] = true;
            open.push_back(next);
        }
    }
    seen
}

/// Converts every floor tile not reached from `start` back to wall.
/// Returns the number of pruned tiles.
pub(super) fn prune_unreachable(map: &mut Map, reach: &[bool]) -> usize {
    let width = map.width();
    let unreached: Vec<Pos> = map
        .positions()
        .filter(|&pos| map.tile_at(pos) == Tile::Floor && !reach[(pos.y as usize) * width + (pos.x as usize)])
        .collect();
    for &pos in &unreached {
        map.set_tile(pos, Tile::Wall);
    }
    unreached.len()
}

/// The reachable floor tile farthest from `from` by Manhattan distance.
/// Ties keep the first tile in row-major order.
pub(super) fn farthest_reachable(map: &Map, reach: &[bool], from: Pos) -> Option<Pos> {
    let width = map.width();
    let mut best: Option<(Pos, u32)> = None;
    for pos in map.positions() {
        if map.tile_at(pos) != Tile::Floor || !reach[(pos.y as usize) * width + (pos.x as usize)] {
            continue;
        }
        let distance = manhattan(pos, from);
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Marks the stairs tile. A candidate on the spawn tile is nudged right, then down.
pub(super) fn place_stairs(map: &mut Map, candidate: Pos, spawn: Pos) -> Pos {
    let mut stairs = candidate;
    if stairs == spawn {
        let right = spawn.offset(1, 0);
        let down = spawn.offset(0, 1);
        if map.tile_at(right) == Tile::Floor {
            stairs = right;
        } else if map.tile_at(down) == Tile::Floor {
            stairs = down;
        }
    }
    map.set_tile(stairs, Tile::Stairs);
    stairs
}

/// Deterministic spawn and stairs for a layout that produced no rooms: carves
/// an L-shaped passage between two fixed interior points.
pub(super) fn fallback_layout(map: &mut Map) -> (Pos, Pos) {
    let width = map.width() as i32;
    let height = map.height() as i32;
    let spawn = Pos { y: 2.min(height - 2).max(1), x: 2.min(width - 2).max(1) };
    let stairs = Pos { y: (height - 3).max(spawn.y), x: (width - 3).max(spawn.x) };

    for x in spawn.x..=stairs.x {
        carve_if_interior(map, Pos { y: spawn.y, x });
    }
    for y in spawn.y..=stairs.y {
        carve_if_interior(map, Pos { y, x: stairs.x });
    }
    (spawn, stairs)
}

fn carve_if_interior(map: &mut Map, pos: Pos) {
    if map.is_interior(pos) {
        map.set_tile(pos, Tile::Floor);
    }
}
