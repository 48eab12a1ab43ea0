//! The enemy phase that follows every resolved player turn.
//! This module exists to keep aggro, chase and idle wandering in one place.
//! It does not own attack math or the player's own movement.

use super::*;
use crate::state::{footprint_distance, footprint_tiles};

impl Game {
    pub(super) fn enemy_turn(&mut self) {
        let ids: Vec<EnemyId> = self.state.live_enemies().map(|(id, _)| id).collect();
        for id in ids {
            if self.state.status.is_over() {
                break;
            }
            self.act_enemy(id);
        }
    }

    fn act_enemy(&mut self, id: EnemyId) {
        let Some(enemy) = self.state.enemies.get(id).filter(|enemy| enemy.is_alive()) else {
            return;
        };
        let (origin, size, mut aggro) = (enemy.pos, enemy.size(), enemy.aggro);
        let player = self.state.player.pos;
        let eye = nearest_footprint_tile(origin, size, player);

        if !aggro
            && euclidean(eye, player) <= self.rules.combat.aggro_radius
            && line_of_sight(&self.state.map, eye, player)
        {
            aggro = true;
            self.state.enemies[id].aggro = true;
        }

        if aggro {
            if footprint_distance(origin, size, player) == 1 {
                self.enemy_attacks(id);
                return;
            }
            self.chase(id, origin, size, eye, player);
        } else if self.dice.chance(self.rules.combat.idle_step_chance) {
            let direction = Direction::ALL[self.dice.index(Direction::ALL.len())];
            let target = origin.step(direction);
            if self.can_occupy(id, target, size) {
                self.state.enemies[id].pos = target;
            }
        }
    }

    /// One step toward the player: the axis with the larger gap first, then
    /// the other axis, otherwise stay put.
    fn chase(&mut self, id: EnemyId, origin: Pos, size: i32, eye: Pos, player: Pos) {
        let (dx, dy) = (player.x - eye.x, player.y - eye.y);
        let horizontal = origin.offset(dx.signum(), 0);
        let vertical = origin.offset(0, dy.signum());
        let (primary, secondary) =
            if dx.abs() > dy.abs() { (horizontal, vertical) } else { (vertical, horizontal) };

        let step = [primary, secondary]
            .into_iter()
            .filter(|&candidate| candidate != origin)
            .find(|&candidate| self.can_occupy(id, candidate, size));
        if let Some(step) = step {
            self.state.enemies[id].pos = step;
        }
    }

    /// Whether enemy `id` could stand with its top-left corner on `origin`.
    /// Every footprint tile must be plain floor, clear of the player, NPCs and
    /// other live enemies.
    fn can_occupy(&self, id: EnemyId, origin: Pos, size: i32) -> bool {
        let player = self.state.player.pos;
        footprint_tiles(origin, size).all(|pos| {
            self.state.map.tile_at(pos) == Tile::Floor
                && pos != player
                && self.state.npc_at(pos).is_none()
                && self
                    .state
                    .live_enemies()
                    .all(|(other, enemy)| other == id || !enemy.occupies(pos))
        })
    }
}

fn nearest_footprint_tile(origin: Pos, size: i32, target: Pos) -> Pos {
    Pos {
        y: target.y.clamp(origin.y, origin.y + size - 1),
        x: target.x.clamp(origin.x, origin.x + size - 1),
    }
}
