//! High-level floor generation: layout, connectivity repair, stairs, population.

use crate::rng::{Dice, derive_floor_seed, mix_seed_stream};
use crate::rules::Rules;
use crate::state::Map;
use crate::types::Tile;

use super::grid::{fallback_layout, farthest_reachable, flood_reachable, place_stairs, prune_unreachable};
use super::layout::carve_bsp;
use super::model::GeneratedFloor;
use super::spawns::{Occupancy, SpawnContext, generate_enemies, generate_items, generate_npcs};

const CONTENT_STREAM: u64 = 1;

pub struct MapGenerator<'a> {
    run_seed: u64,
    rules: &'a Rules,
}

impl<'a> MapGenerator<'a> {
    pub fn new(run_seed: u64, rules: &'a Rules) -> Self {
        Self { run_seed, rules }
    }

    pub fn generate(&self, floor: u32) -> GeneratedFloor {
        let floor_seed = derive_floor_seed(self.run_seed, floor);
        let mut layout_dice = Dice::from_seed(floor_seed);
        let mut map = Map::filled(self.rules.map_width, self.rules.map_height, Tile::Wall);

        let rooms = carve_bsp(&mut map, &mut layout_dice);
        let (spawn, stairs, pruned_tiles) = match rooms.first() {
            Some(first) => {
                let spawn = first.center();
                let reach = flood_reachable(&map, spawn);
                let pruned = prune_unreachable(&mut map, &reach);
                let candidate = farthest_reachable(&map, &reach, spawn).unwrap_or(spawn);
                (spawn, place_stairs(&mut map, candidate, spawn), pruned)
            }
            None => {
                log::warn!("floor {floor}: layout produced no rooms, using fallback passage");
                let (spawn, stairs) = fallback_layout(&mut map);
                (spawn, place_stairs(&mut map, stairs, spawn), 0)
            }
        };

        let mut content_dice = Dice::from_seed(mix_seed_stream(floor_seed, CONTENT_STREAM));
        let context = SpawnContext { rules: self.rules, floor, map: &map, spawn };
        let mut occupancy = Occupancy::default();
        let enemies = generate_enemies(&context, &mut occupancy, &mut content_dice);
        let items = generate_items(&context, &mut occupancy, &mut content_dice);
        let npcs = generate_npcs(&context, &mut occupancy, &mut content_dice);

        log::debug!(
            "floor {floor}: {} rooms, {pruned_tiles} pruned, {} enemies, {} items, {} npcs",
            rooms.len(),
            enemies.len(),
            items.len(),
            npcs.len()
        );

        GeneratedFloor {
            floor,
            map,
            spawn,
            stairs,
            room_count: rooms.len(),
            pruned_tiles,
            enemies,
            items,
            npcs,
        }
    }
}
