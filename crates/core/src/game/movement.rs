//! Player movement: blocking, NPC make-way, bump attacks, pickup and stairs.

use super::*;

impl Game {
    pub(super) fn try_move(&mut self, direction: Direction) -> TurnOutcome {
        let from = self.state.player.pos;
        let to = from.step(direction);
        if !self.state.map.is_walkable(to) {
            return self.reject(Rejection::Blocked);
        }
        if let Some(npc) = self.state.npc_at(to) {
            if !self.make_way(npc, from, to) {
                return self.reject(Rejection::NpcBlocks);
            }
        }
        self.state.player.facing = direction;

        if let Some(enemy) = self.state.enemy_at(to) {
            self.spend_gas(self.rules.gas.attack_cost);
            self.player_attacks(enemy);
            return self.finish_turn();
        }

        self.state.player.pos = to;
        self.spend_gas(self.rules.gas.move_cost);
        self.pickup_at(to);
        if self.state.map.tile_at(to) == Tile::Stairs {
            self.take_stairs();
        }
        self.finish_turn()
    }

    /// Clears `to` of an NPC: first by nudging it to a free neighbor, then by
    /// swapping it onto the player's tile when that tile is plain floor.
    fn make_way(&mut self, npc: NpcId, from: Pos, to: Pos) -> bool {
        let name = self.state.npcs[npc].name.clone();
        let free = neighbors(to).into_iter().find(|&pos| pos != from && self.is_free_for_npc(pos));
        if let Some(pos) = free {
            self.state.npcs[npc].pos = pos;
            self.say(format!("{name} shuffles aside."), Tone::Info);
            return true;
        }
        if self.state.map.tile_at(from) == Tile::Floor {
            self.state.npcs[npc].pos = from;
            self.say(format!("You squeeze past {name}."), Tone::Info);
            return true;
        }
        false
    }

    fn is_free_for_npc(&self, pos: Pos) -> bool {
        self.state.map.tile_at(pos) == Tile::Floor
            && self.state.enemy_at(pos).is_none()
            && self.state.npc_at(pos).is_none()
            && self.state.item_at(pos).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn walls_reject_without_consuming_a_turn() {
        let map = corridor_map(&["#####", "#..>#", "#####"]);
        let mut game = game_on_map(map, Pos::new(1, 1), Pos::new(3, 1));
        let gas = game.player().gas;
        assert_eq!(game.resolve(Intent::Move(Direction::North)), TurnOutcome::Rejected(Rejection::Blocked));
        assert_eq!(game.turn(), 0);
        assert_eq!(game.player().gas, gas);
        assert_eq!(game.player().facing, Direction::South);
    }

    #[test]
    fn moving_costs_gas_and_sets_facing() {
        let mut game = open_room_game(12, 10);
        assert_eq!(game.resolve(Intent::Move(Direction::West)), TurnOutcome::Resolved);
        assert_eq!(game.player().pos, Pos::new(4, 4));
        assert_eq!(game.player().facing, Direction::West);
        assert_eq!(game.player().gas, 99);
    }

    #[test]
    fn bumping_an_enemy_attacks_instead_of_moving() {
        let mut game = open_room_game(12, 10);
        let id = place_enemy(&mut game, Pos::new(6, 4), EnemyKind::Normal);
        game.state.enemies[id].hp = 500;
        game.state.enemies[id].maxhp = 500;
        game.resolve(Intent::Move(Direction::East));
        assert_eq!(game.player().pos, Pos::new(5, 4));
        assert!(game.state.enemies[id].hp < 500);
        assert_eq!(game.player().gas, 98);
    }

    #[test]
    fn any_boss_footprint_tile_can_be_bumped() {
        let mut game = open_room_game(16, 12);
        let boss = place_enemy(&mut game, Pos::new(6, 2), EnemyKind::Boss);
        let hp = game.state.enemies[boss].hp;
        game.resolve(Intent::Move(Direction::East));
        assert!(game.state.enemies[boss].hp < hp);
        assert_eq!(game.player().pos, Pos::new(5, 4));
    }

    #[test]
    fn npcs_are_nudged_out_of_the_way() {
        let mut game = open_room_game(12, 10);
        let id = place_npc(&mut game, Pos::new(6, 4), NpcRole::Lore);
        assert_eq!(game.resolve(Intent::Move(Direction::East)), TurnOutcome::Resolved);
        assert_eq!(game.player().pos, Pos::new(6, 4));
        let npc = game.state.npcs[id].pos;
        assert_ne!(npc, Pos::new(6, 4));
        assert_ne!(npc, Pos::new(5, 4));
        assert_eq!(manhattan(npc, Pos::new(6, 4)), 1);
    }

    #[test]
    fn npcs_swap_places_in_dead_end_corridors() {
        let map = corridor_map(&["######", "#..#>#", "######"]);
        let mut game = game_on_map(map, Pos::new(1, 1), Pos::new(4, 1));
        let id = place_npc(&mut game, Pos::new(2, 1), NpcRole::Trader);
        assert_eq!(game.resolve(Intent::Move(Direction::East)), TurnOutcome::Resolved);
        assert_eq!(game.player().pos, Pos::new(2, 1));
        assert_eq!(game.state.npcs[id].pos, Pos::new(1, 1));
    }

    #[test]
    fn npcs_cannot_swap_onto_the_stairs() {
        let map = corridor_map(&["#####", "#>.##", "#####"]);
        let mut game = game_on_map(map, Pos::new(1, 1), Pos::new(1, 1));
        let id = place_npc(&mut game, Pos::new(2, 1), NpcRole::Buffer);
        assert_eq!(game.resolve(Intent::Move(Direction::East)), TurnOutcome::Rejected(Rejection::NpcBlocks));
        assert_eq!(game.player().pos, Pos::new(1, 1));
        assert_eq!(game.state.npcs[id].pos, Pos::new(2, 1));
        assert!(game.messages().contains("An NPC blocks the path."));
    }

    #[test]
    fn finished_runs_ignore_movement() {
        let mut game = open_room_game(12, 10);
        game.state.status = RunStatus::GameOver;
        assert_eq!(game.resolve(Intent::Move(Direction::East)), TurnOutcome::Rejected(Rejection::RunOver));
        assert_eq!(game.player().pos, Pos::new(5, 4));
    }
}
