//! Recursive binary-space-partition layout: room carving and corridor joins.

use crate::rng::Dice;
use crate::state::Map;
use crate::types::{Pos, Tile};

const MIN_SPLIT_WIDTH: i32 = 10;
const MIN_SPLIT_HEIGHT: i32 = 8;
const MIN_HALF: i32 = 5;
const EARLY_STOP_DEPTH: u32 = 7;
const EARLY_STOP_CHANCE: f64 = 0.65;
const ROOM_MIN_SIDE: i32 = 4;
const ROOM_MAX_WIDTH: i32 = 16;
const ROOM_MAX_HEIGHT: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Rect {
    pub(super) x: i32,
    pub(super) y: i32,
    pub(super) width: i32,
    pub(super) height: i32,
}

impl Rect {
    pub(super) fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub(super) fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x < self.x + self.width && pos.y >= self.y && pos.y < self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Cut across rows: top and bottom halves.
    Rows,
    /// Cut across columns: left and right halves.
    Columns,
}

struct BspContext<'a> {
    map: &'a mut Map,
    dice: &'a mut Dice,
    rooms: Vec<Rect>,
}

/// Partitions the map interior, carves one room per leaf and joins sibling
/// subtrees. Returns rooms in carve order; the first is the spawn room.
pub(super) fn carve_bsp(map: &mut Map, dice: &mut Dice) -> Vec<Rect> {
    let root = Rect { x: 1, y: 1, width: map.width() as i32 - 2, height: map.height() as i32 - 2 };
    let mut context = BspContext { map, dice, rooms: Vec::new() };
    if root.width >= MIN_HALF && root.height >= MIN_HALF {
        partition(&mut context, root, 0);
    }
    context.rooms
}

fn partition(context: &mut BspContext<'_>, area: Rect, depth: u32) {
    let too_small = area.width < MIN_SPLIT_WIDTH || area.height < MIN_SPLIT_HEIGHT;
    if too_small || (depth > EARLY_STOP_DEPTH && context.dice.chance(EARLY_STOP_CHANCE)) {
        carve_leaf_room(context, area);
        return;
    }

    let can_cut_rows = area.height >= 2 * MIN_HALF;
    let axis = if can_cut_rows && context.dice.chance(0.5) { Axis::Rows } else { Axis::Columns };
    let first_room = context.rooms.len();

    match axis {
        Axis::Rows => {
            let split = context.dice.range(MIN_HALF, area.height - MIN_HALF);
            partition(context, Rect { height: split, ..area }, depth + 1);
            let second_room = context.rooms.len();
            partition(
                context,
                Rect { y: area.y + split, height: area.height - split, ..area },
                depth + 1,
            );
            join_subtrees(context, first_room, second_room, axis, area.y + split - 1);
        }
        Axis::Columns => {
            let split = context.dice.range(MIN_HALF, area.width - MIN_HALF);
            partition(context, Rect { width: split, ..area }, depth + 1);
            let second_room = context.rooms.len();
            partition(
                context,
                Rect { x: area.x + split, width: area.width - split, ..area },
                depth + 1,
            );
            join_subtrees(context, first_room, second_room, axis, area.x + split - 1);
        }
    }
}

fn carve_leaf_room(context: &mut BspContext<'_>, area: Rect) {
    let max_width = (area.width - 2).min(ROOM_MAX_WIDTH).max(1);
    let max_height = (area.height - 2).min(ROOM_MAX_HEIGHT).max(1);
    let width = context.dice.range(ROOM_MIN_SIDE.min(max_width), max_width);
    let height = context.dice.range(ROOM_MIN_SIDE.min(max_height), max_height);
    let x = area.x + context.dice.range(1, area.width - width - 1);
    let y = area.y + context.dice.range(1, area.height - height - 1);
    let room = Rect { x, y, width, height };

    for row in room.y..room.y + room.height {
        for col in room.x..room.x + room.width {
            carve(context.map, Pos { y: row, x: col });
        }
    }
    context.rooms.push(room);
}

/// Joins the first room of the left/top subtree with the last room of the
/// right/bottom subtree through the split boundary line.
fn join_subtrees(context: &mut BspContext<'_>, first: usize, second: usize, axis: Axis, boundary: i32) {
    if first >= second || second >= context.rooms.len() {
        return;
    }
    let from = context.rooms[first].center();
    let to = context.rooms[context.rooms.len() - 1].center();

    match axis {
        Axis::Rows => {
            carve_vertical(context.map, from.y, boundary, from.x);
            carve_horizontal(context.map, from.x, to.x, boundary);
            carve_vertical(context.map, boundary, to.y, to.x);
        }
        Axis::Columns => {
            carve_horizontal(context.map, from.x, boundary, from.y);
            carve_vertical(context.map, from.y, to.y, boundary);
            carve_horizontal(context.map, boundary, to.x, to.y);
        }
    }
}

fn carve_horizontal(map: &mut Map, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        carve(map, Pos { y, x });
    }
}

fn carve_vertical(map: &mut Map, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        carve(map, Pos { y, x });
    }
}

fn carve(map: &mut Map, pos: Pos) {
    if map.is_interior(pos) {
        map.set_tile(pos, Tile::Floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooms_stay_inside_the_border() {
        for seed in 0..40 {
            let mut map = Map::filled(72, 48, Tile::Wall);
            let mut dice = Dice::from_seed(seed);
            let rooms = carve_bsp(&mut map, &mut dice);
            assert!(rooms.len() >= 2, "seed {seed} produced {} rooms", rooms.len());
            for room in &rooms {
                assert!(room.x >= 1 && room.y >= 1);
                assert!(room.x + room.width <= 71 && room.y + room.height <= 47);
            }
            for x in 0..72 {
                assert_eq!(map.tile_at(Pos::new(x, 0)), Tile::Wall);
                assert_eq!(map.tile_at(Pos::new(x, 47)), Tile::Wall);
            }
        }
    }

    #[test]
    fn tiny_map_produces_no_rooms() {
        let mut map = Map::filled(5, 5, Tile::Wall);
        let mut dice = Dice::from_seed(3);
        assert!(carve_bsp(&mut map, &mut dice).is_empty());
        assert_eq!(map.count_tiles(Tile::Floor), 0);
    }

    #[test]
    fn room_centers_are_carved() {
        let mut map = Map::filled(72, 48, Tile::Wall);
        let mut dice = Dice::from_seed(99);
        for room in carve_bsp(&mut map, &mut dice) {
            assert!(room.contains(room.center()));
            assert_eq!(map.tile_at(room.center()), Tile::Floor);
        }
    }
}
