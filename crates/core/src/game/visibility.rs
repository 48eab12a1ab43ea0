//! Line-of-sight and fog-of-war rules.
//! This module exists to keep sight rules deterministic and shared by the player and enemies.
//! It does not own movement or aggro decisions.

use super::*;

/// Integer Bresenham walk from `from` to `to`. Any wall strictly between the
/// two endpoints blocks sight; the endpoints themselves never do.
pub(crate) fn line_of_sight(map: &Map, from: Pos, to: Pos) -> bool {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;
    let mut cursor = from;

    loop {
        if cursor == to {
            return true;
        }
        if cursor != from && !map.tile_at(cursor).is_walkable() {
            return false;
        }
        let doubled = 2 * err;
        if doubled > -dy {
            err -= dy;
            cursor.x += sx;
        }
        if doubled < dx {
            err += dx;
            cursor.y += sy;
        }
    }
}

pub(crate) fn is_visible_from(map: &Map, origin: Pos, radius: f64, target: Pos) -> bool {
    euclidean(origin, target) <= radius && line_of_sight(map, origin, target)
}

impl Game {
    fn sight_radius(&self) -> f64 {
        f64::from(self.state.player.vision) + self.rules.combat.vision_slack
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.state.map.in_bounds(pos)
            && is_visible_from(&self.state.map, self.state.player.pos, self.sight_radius(), pos)
    }

    /// Marks every currently visible tile as explored. Returns how many tiles
    /// were newly explored; tiles already explored are left untouched.
    pub(super) fn reveal_fog(&mut self) -> usize {
        let origin = self.state.player.pos;
        let reach = self.state.player.vision.max(0) + 1;
        let radius = self.sight_radius();
        let mut newly = 0;
        for y in (origin.y - reach)..=(origin.y + reach) {
            for x in (origin.x - reach)..=(origin.x + reach) {
                let pos = Pos { y, x };
                if !self.state.map.in_bounds(pos) || self.state.map.is_explored(pos) {
                    continue;
                }
                if is_visible_from(&self.state.map, origin, radius, pos) && self.state.map.explore(pos) {
                    newly += 1;
                }
            }
        }
        newly
    }
}
