use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::content::{PlayerClass, Rgb};
use crate::rules::HOTBAR_SLOTS;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    explored: Vec<bool>,
}

impl Map {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self { width, height, tiles: vec![tile; width * height], explored: vec![false; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// True for positions that are inside the map and not on its outer ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0 && pos.y > 0 && (pos.x as usize) + 1 < self.width && (pos.y as usize) + 1 < self.height
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Marks a tile explored. Returns true only when it was not explored before.
    pub fn explore(&mut self, pos: Pos) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = self.index(pos);
        let newly = !self.explored[idx];
        self.explored[idx] = true;
        newly
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.explored[self.index(pos)]
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|&&seen| seen).count()
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Pos { y, x }))
    }

    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.tiles.chunks(self.width.max(1)).map(|row| row.iter().map(|tile| tile.glyph()).collect()).collect()
    }

    pub fn explored_rows(&self) -> Vec<Vec<bool>> {
        self.explored.chunks(self.width.max(1)).map(<[bool]>::to_vec).collect()
    }

    /// Rebuilds a map from glyph rows and an explored grid. Rows must be
    /// rectangular and non-empty and the explored grid must match them.
    pub fn from_rows(rows: &[String], explored: &[Vec<bool>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if width == 0 || explored.len() != height {
            return None;
        }
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            let before = tiles.len();
            for glyph in row.chars() {
                tiles.push(Tile::from_glyph(glyph)?);
            }
            if tiles.len() - before != width {
                return None;
            }
        }
        let mut flags = Vec::with_capacity(width * height);
        for row in explored {
            if row.len() != width {
                return None;
            }
            flags.extend_from_slice(row);
        }
        Some(Self { width, height, tiles, explored: flags })
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub name: String,
    pub glyph: char,
    pub kind: ItemKind,
    pub amount: i32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ItemStack {
    pub fn matches(&self, other: &ItemStack) -> bool {
        self.kind == other.kind && self.name == other.name && self.amount == other.amount
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorItem {
    pub pos: Pos,
    pub stack: ItemStack,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left tile of the footprint.
    pub pos: Pos,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    #[serde(default)]
    pub kind: EnemyKind,
    #[serde(default)]
    pub tier: u32,
    pub hp: i32,
    pub maxhp: i32,
    pub atk: i32,
    pub def: i32,
    pub xp: u32,
    #[serde(default)]
    pub aggro: bool,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn size(&self) -> i32 {
        self.kind.footprint()
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        footprint_contains(self.pos, self.size(), pos)
    }

    pub fn footprint(&self) -> impl Iterator<Item = Pos> + use<> {
        footprint_tiles(self.pos, self.size())
    }
}

pub fn footprint_contains(origin: Pos, size: i32, pos: Pos) -> bool {
    pos.x >= origin.x && pos.x < origin.x + size && pos.y >= origin.y && pos.y < origin.y + size
}

pub fn footprint_tiles(origin: Pos, size: i32) -> impl Iterator<Item = Pos> {
    (0..size).flat_map(move |dy| (0..size).map(move |dx| origin.offset(dx, dy)))
}

/// Manhattan distance from `pos` to the nearest tile of a square footprint.
pub fn footprint_distance(origin: Pos, size: i32, pos: Pos) -> u32 {
    let clamped = Pos {
        y: pos.y.clamp(origin.y, origin.y + size - 1),
        x: pos.x.clamp(origin.x, origin.x + size - 1),
    };
    manhattan(clamped, pos)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub pos: Pos,
    pub name: String,
    pub glyph: char,
    pub role: NpcRole,
    #[serde(default)]
    pub used: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Pos,
    #[serde(default)]
    pub facing: Direction,
    pub hp: i32,
    pub maxhp: i32,
    pub atk: i32,
    pub def: i32,
    pub vision: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
    #[serde(default)]
    pub class: PlayerClass,
    pub gas: i32,
    #[serde(default)]
    pub rep: i32,
    #[serde(default)]
    pub hotbar: [Option<ItemStack>; HOTBAR_SLOTS],
    #[serde(default)]
    pub bag: Vec<ItemStack>,
}

impl Player {
    pub fn item_units(&self) -> u32 {
        self.hotbar.iter().flatten().chain(self.bag.iter()).map(|stack| stack.quantity).sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub high_floor: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLog {
    cap: usize,
    entries: VecDeque<Message>,
}

impl MessageLog {
    pub fn new(cap: usize) -> Self {
        Self { cap: cap.max(1), entries: VecDeque::new() }
    }

    pub fn push(&mut self, text: impl Into<String>, tone: Tone) {
        self.entries.push_back(Message { text: text.into(), tone });
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|message| message.text.contains(needle))
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.entries.iter().cloned().collect()
    }

    pub fn replace(&mut self, messages: Vec<Message>) {
        self.entries.clear();
        for message in messages {
            self.push(message.text, message.tone);
        }
    }
}

pub struct GameState {
    pub map: Map,
    pub floor: u32,
    pub stairs: Pos,
    pub spawn: Pos,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub items: SlotMap<ItemId, FloorItem>,
    pub npcs: SlotMap<NpcId, Npc>,
    pub status: RunStatus,
    pub messages: MessageLog,
    pub meta: Meta,
    pub inventory_open: bool,
}

impl GameState {
    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies.iter().find(|(_, enemy)| enemy.is_alive() && enemy.occupies(pos)).map(|(id, _)| id)
    }

    pub fn npc_at(&self, pos: Pos) -> Option<NpcId> {
        self.npcs.iter().find(|(_, npc)| npc.pos == pos).map(|(id, _)| id)
    }

    pub fn item_at(&self, pos: Pos) -> Option<ItemId> {
        self.items.iter().find(|(_, item)| item.pos == pos).map(|(id, _)| id)
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.enemies.iter().filter(|(_, enemy)| enemy.is_alive())
    }

    pub fn stairs_locked(&self) -> bool {
        self.live_enemies().any(|(_, enemy)| enemy.kind.locks_stairs())
    }
}
