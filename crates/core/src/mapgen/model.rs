//! Output of floor generation: the carved map plus its initial population.

use crate::state::{Enemy, FloorItem, Map, Npc};
use crate::types::{Pos, Tile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFloor {
    pub floor: u32,
    pub map: Map,
    pub spawn: Pos,
    pub stairs: Pos,
    pub room_count: usize,
    pub pruned_tiles: usize,
    pub enemies: Vec<Enemy>,
    pub items: Vec<FloorItem>,
    pub npcs: Vec<Npc>,
}

impl GeneratedFloor {
    pub fn tile_at(&self, pos: Pos) -> Tile {
        self.map.tile_at(pos)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.floor.to_le_bytes());
        bytes.extend((self.map.width() as u32).to_le_bytes());
        bytes.extend((self.map.height() as u32).to_le_bytes());
        for row in self.map.to_rows() {
            bytes.extend(row.as_bytes());
        }
        for pos in [self.spawn, self.stairs] {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }

        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for enemy in &self.enemies {
            bytes.extend(enemy.name.as_bytes());
            bytes.extend(enemy.pos.y.to_le_bytes());
            bytes.extend(enemy.pos.x.to_le_bytes());
            bytes.extend(enemy.hp.to_le_bytes());
        }

        bytes.extend((self.items.len() as u32).to_le_bytes());
        for item in &self.items {
            bytes.extend(item.stack.name.as_bytes());
            bytes.extend(item.pos.y.to_le_bytes());
            bytes.extend(item.pos.x.to_le_bytes());
        }

        bytes.extend((self.npcs.len() as u32).to_le_bytes());
        for npc in &self.npcs {
            bytes.extend(npc.name.as_bytes());
            bytes.extend(npc.pos.y.to_le_bytes());
            bytes.extend(npc.pos.x.to_le_bytes());
        }
        bytes
    }

    /// ASCII rendering with the population overlaid, one string per row.
    pub fn render_ascii(&self) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = self.map.to_rows().iter().map(|row| row.chars().collect()).collect();
        let mut stamp = |pos: Pos, glyph: char| {
            if let Some(cell) = rows.get_mut(pos.y as usize).and_then(|row| row.get_mut(pos.x as usize)) {
                *cell = glyph;
            }
        };
        for item in &self.items {
            stamp(item.pos, item.stack.glyph);
        }
        for npc in &self.npcs {
            stamp(npc.pos, npc.glyph);
        }
        for enemy in &self.enemies {
            for pos in enemy.footprint() {
                stamp(pos, enemy.glyph);
            }
        }
        stamp(self.spawn, '@');
        rows.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}
