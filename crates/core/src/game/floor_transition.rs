//! Descent, victory and generated floor installation.
//! This module exists to isolate stairs outcomes from the movement controller.
//! It does not own generation itself or stairs-lock bookkeeping on kills.

mod install;

use super::*;
use crate::mapgen::MapGenerator;

use install::install_generated_floor;

impl Game {
    /// Resolves the player standing on the stairs: locked, won, or descend.
    pub(super) fn take_stairs(&mut self) {
        if self.state.stairs_locked() {
            self.say("The stairs are locked. Defeat the guardian first.", Tone::Warn);
            self.emit(GameEvent::StairsLocked);
            return;
        }
        if self.state.floor >= self.rules.final_floor {
            self.state.status = RunStatus::Won;
            self.state.meta.wins += 1;
            self.say("GENESIS BLOCK FOUND. You escaped with an immutable Lambo.", Tone::System);
            self.emit(GameEvent::Victory);
            log::info!("run won on floor {} after {} turns", self.state.floor, self.turn);
            return;
        }
        let next = self.state.floor + 1;
        self.say(format!("Descending... Floor {next}"), Tone::System);
        self.descend_to_floor(next);
    }

    pub(super) fn descend_to_floor(&mut self, floor: u32) {
        let generated = MapGenerator::new(self.seed, &self.rules).generate(floor);
        install_generated_floor(self, generated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn step_onto_stairs(game: &mut Game) -> TurnOutcome {
        let stairs = game.state.stairs;
        game.state.player.pos = stairs.offset(-1, 0);
        game.resolve(Intent::Move(Direction::East))
    }

    #[test]
    fn live_guardian_locks_the_stairs_until_it_dies() {
        let mut game = open_room_game(30, 14);
        let boss = place_enemy(&mut game, Pos::new(2, 1), EnemyKind::MiniBoss);
        game.state.enemies[boss].aggro = false;
        game.rules.combat.aggro_radius = 0.0;
        game.rules.combat.idle_step_chance = 0.0;

        assert_eq!(step_onto_stairs(&mut game), TurnOutcome::Resolved);
        assert_eq!(game.floor(), 1);
        assert_eq!(game.player().pos, game.state.stairs);
        assert!(game.messages().contains("The stairs are locked"));
        assert!(game.drain_events().contains(&GameEvent::StairsLocked));

        game.state.enemies[boss].hp = 0;
        step_onto_stairs(&mut game);
        assert_eq!(game.floor(), 2);
        assert!(game.drain_events().contains(&GameEvent::FloorChanged { floor: 2 }));
    }

    #[test]
    fn descending_replaces_the_floor_and_records_the_high_floor() {
        let mut game = open_room_game(30, 14);
        place_item(&mut game, Pos::new(3, 3), ItemKind::Heal);
        place_npc(&mut game, Pos::new(8, 8), NpcRole::Lore);
        step_onto_stairs(&mut game);

        assert_eq!(game.floor(), 2);
        assert_eq!(game.meta().high_floor, 2);
        assert_eq!(game.player().pos, game.state.spawn);
        assert_eq!(game.map().width(), game.rules.map_width);
        assert!(game.state.items.values().all(|item| game.map().tile_at(item.pos) == Tile::Floor));
        assert!(game.map().is_explored(game.player().pos));
        assert!(game.messages().contains("Floor 2: Pump Chasm"));
    }

    #[test]
    fn stairs_on_the_final_floor_win_the_run() {
        let mut game = open_room_game(30, 14);
        game.state.floor = game.rules.final_floor;
        step_onto_stairs(&mut game);
        assert_eq!(game.status(), RunStatus::Won);
        assert_eq!(game.meta().wins, 1);
        assert_eq!(game.resolve(Intent::Wait), TurnOutcome::Rejected(Rejection::RunOver));
    }
}
