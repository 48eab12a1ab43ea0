//! Attack resolution, death, loot and experience.

use super::*;
use crate::mapgen::roll_item;
use crate::state::footprint_tiles;

/// Diminishing-returns armor: never below one point of damage.
pub fn mitigated_damage(raw: i32, defense: i32, armor_factor: i32) -> i32 {
    let factor = i64::from(armor_factor.max(1));
    let defense = i64::from(defense.max(0));
    let scaled = i64::from(raw) * factor / (factor + defense);
    scaled.max(1) as i32
}

impl Game {
    fn attack_roll(&mut self) -> i32 {
        let combat = &self.rules.combat;
        let (lo, hi) = (combat.roll_min, combat.roll_max);
        self.dice.range(lo, hi)
    }

    pub(super) fn player_attacks(&mut self, id: EnemyId) {
        let roll = self.attack_roll();
        let armor = self.rules.combat.armor_factor;
        let atk = self.state.player.atk;
        let Some(enemy) = self.state.enemies.get_mut(id) else {
            return;
        };
        let damage = mitigated_damage(atk + roll, enemy.def, armor);
        enemy.hp -= damage;
        let name = enemy.name.clone();
        let slain = enemy.hp <= 0;

        self.say(format!("You hit {name} for {damage}."), Tone::Info);
        self.emit(GameEvent::AttackResolved {
            attacker: Combatant::Player,
            target: Combatant::Enemy(id),
            damage,
            critical: false,
        });
        if slain {
            self.kill_enemy(id);
        }
    }

    pub(super) fn enemy_attacks(&mut self, id: EnemyId) {
        let Some(enemy) = self.state.enemies.get(id) else {
            return;
        };
        let (name, atk) = (enemy.name.clone(), enemy.atk);

        if self.state.player.class.dodges() && self.dice.chance(self.rules.combat.dodge_chance) {
            self.say("Dodge! You avoided the hit.", Tone::Good);
            self.emit(GameEvent::Dodged { attacker: id });
            return;
        }

        let roll = self.attack_roll();
        let tier = self.rules.gas_tier(self.state.player.gas);
        let defense = self.state.player.def - self.rules.defense_penalty(tier);
        let mut damage = mitigated_damage(atk + roll, defense, self.rules.combat.armor_factor);
        let critical = self.dice.chance(self.rules.crit_chance(self.state.player.gas));
        if critical {
            damage = damage * self.rules.combat.crit_multiplier_pct / 100;
        }

        self.state.player.hp -= damage;
        if critical {
            self.say(format!("CRIT! {name} hits you for {damage}."), Tone::Danger);
        } else {
            self.say(format!("{name} hits you for {damage}."), Tone::Warn);
        }
        self.emit(GameEvent::AttackResolved {
            attacker: Combatant::Enemy(id),
            target: Combatant::Player,
            damage,
            critical,
        });
        if self.state.player.hp <= 0 {
            self.player_defeated();
        }
    }

    fn kill_enemy(&mut self, id: EnemyId) {
        let Some(enemy) = self.state.enemies.get_mut(id) else {
            return;
        };
        enemy.hp = 0;
        enemy.aggro = false;
        let (name, xp, kind, origin, size) = (enemy.name.clone(), enemy.xp, enemy.kind, enemy.pos, enemy.size());

        self.say(format!("{name} rekt."), Tone::Good);
        self.emit(GameEvent::EnemyKilled { enemy: id, xp });
        self.gain_xp(xp);
        let gas = self.dice.range(self.rules.combat.kill_gas_min, self.rules.combat.kill_gas_max);
        self.state.player.gas += gas;

        let drops = match kind {
            EnemyKind::Boss => 2,
            EnemyKind::MiniBoss => 1,
            EnemyKind::Normal => usize::from(self.dice.chance(self.rules.combat.loot_drop_chance)),
        };
        for _ in 0..drops {
            let Some(pos) = self.free_drop_tile(origin, size) else {
                break;
            };
            let stack = roll_item(&self.rules, self.state.floor, &mut self.dice);
            self.say(format!("{name} dropped {}.", stack.name), Tone::Loot);
            self.emit(GameEvent::ItemDropped { pos, kind: stack.kind });
            self.state.items.insert(FloorItem { pos, stack });
        }
        if kind.locks_stairs() && !self.state.stairs_locked() {
            self.say("The stairs hum open.", Tone::System);
        }
    }

    /// First tile of the dead enemy's footprint (then its ring) that can hold a drop.
    fn free_drop_tile(&self, origin: Pos, size: i32) -> Option<Pos> {
        footprint_tiles(origin, size)
            .chain(footprint_tiles(origin.offset(-1, -1), size + 2))
            .find(|&pos| {
                self.state.map.tile_at(pos) == Tile::Floor
                    && self.state.item_at(pos).is_none()
                    && self.state.npc_at(pos).is_none()
                    && self.state.enemy_at(pos).is_none()
                    && pos != self.state.player.pos
            })
    }

    pub(super) fn gain_xp(&mut self, amount: u32) {
        let progression = &self.rules.progression;
        let mut amount = amount;
        if self.state.player.class.pumps_xp() && self.dice.chance(progression.pump_chance) {
            amount = amount * progression.pump_bonus_pct / 100;
        }
        self.state.player.xp += amount;
        self.say(format!("+{amount} XP"), Tone::Good);

        while self.state.player.xp >= self.state.player.xp_next.max(1) {
            let progression = self.rules.progression.clone();
            let player = &mut self.state.player;
            player.xp -= player.xp_next.max(1);
            player.level += 1;
            player.xp_next = (player.xp_next * progression.xp_growth_pct / 100).max(1);
            let hp_gain = self.dice.range(progression.maxhp_gain_min, progression.maxhp_gain_max);
            let atk_gain = self.dice.chance(progression.atk_gain_chance);
            let def_gain = self.dice.chance(progression.def_gain_chance);
            let vision_gain = self.dice.chance(progression.vision_gain_chance);

            let player = &mut self.state.player;
            player.maxhp += hp_gain;
            player.hp = player.maxhp;
            player.atk += i32::from(atk_gain);
            player.def += i32::from(def_gain);
            player.vision += i32::from(vision_gain);
            let level = player.level;
            self.say(format!("LEVEL UP! You are now lvl {level}."), Tone::Level);
            self.emit(GameEvent::LeveledUp { level });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PlayerClass;
    use crate::game::test_support::*;

    #[test]
    fn damage_never_drops_below_one() {
        assert_eq!(mitigated_damage(-3, 0, 100), 1);
        assert_eq!(mitigated_damage(1, 500, 100), 1);
        assert_eq!(mitigated_damage(10, 0, 100), 10);
        assert_eq!(mitigated_damage(10, 100, 100), 5);
        assert_eq!(mitigated_damage(10, -4, 100), 10);
    }

    #[test]
    fn leveling_carries_over_remainder() {
        let mut game = open_room_game(12, 10);
        game.state.player.class = PlayerClass::SolidityDev;
        game.state.player.xp = 45;
        game.state.player.xp_next = 50;
        let level = game.state.player.level;
        game.gain_xp(60);
        // 45 + 60 = 105, minus the 50 threshold leaves 55, short of the next threshold of 62.
        assert_eq!(game.state.player.xp, 55);
        assert_eq!(game.state.player.level, level + 1);
        assert_eq!(game.state.player.xp_next, 62);
        assert_eq!(game.state.player.hp, game.state.player.maxhp);
    }

    #[test]
    fn crossing_the_threshold_by_a_little_leaves_small_remainder() {
        let mut game = open_room_game(12, 10);
        game.state.player.class = PlayerClass::WhaleApprentice;
        game.state.player.xp = 45;
        game.state.player.xp_next = 50;
        game.gain_xp(10);
        assert_eq!(game.state.player.xp, 5);
        assert_eq!(game.state.player.level, 2);
        assert_eq!(game.state.player.xp_next, 62);
    }

    #[test]
    fn large_grants_level_more_than_once() {
        let mut game = open_room_game(12, 10);
        game.state.player.class = PlayerClass::RugSurvivor;
        game.state.player.xp = 0;
        game.state.player.xp_next = 50;
        game.gain_xp(50 + 62 + 10);
        assert_eq!(game.state.player.level, 3);
        assert_eq!(game.state.player.xp, 10);
        assert_eq!(game.state.player.xp_next, 77);
        let level_ups = game
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, GameEvent::LeveledUp { .. }))
            .count();
        assert_eq!(level_ups, 2);
    }

    #[test]
    fn empty_gas_makes_crits_common_and_safe_gas_never_crits() {
        fn was_critical(events: Vec<GameEvent>) -> bool {
            events.iter().any(|event| matches!(event, GameEvent::AttackResolved { critical: true, .. }))
        }

        let mut crits_at_empty = 0;
        let mut crits_when_safe = 0;
        for seed in 0..400 {
            let mut game = open_room_game(12, 10);
            game.dice = Dice::from_seed(seed);
            game.state.player.class = PlayerClass::SolidityDev;
            game.state.player.hp = 1_000;
            let id = place_enemy(&mut game, Pos::new(6, 4), EnemyKind::Normal);

            game.state.player.gas = 0;
            game.enemy_attacks(id);
            crits_at_empty += usize::from(was_critical(game.drain_events()));

            game.state.player.gas = 60;
            game.enemy_attacks(id);
            crits_when_safe += usize::from(was_critical(game.drain_events()));
        }
        assert_eq!(crits_when_safe, 0);
        assert!((60..=190).contains(&crits_at_empty), "crits at empty gas: {crits_at_empty}");
    }

    #[test]
    fn killing_a_boss_drops_two_items_and_unlocks_stairs() {
        let mut game = open_room_game(20, 14);
        let boss = place_enemy(&mut game, Pos::new(10, 5), EnemyKind::Boss);
        assert!(game.state.stairs_locked());
        game.state.enemies[boss].hp = 1;
        game.state.player.atk = 50;
        let items_before = game.state.items.len();
        game.player_attacks(boss);
        assert!(!game.state.enemies[boss].is_alive());
        assert_eq!(game.state.items.len(), items_before + 2);
        assert!(!game.state.stairs_locked());
        assert!(game.state.enemy_at(Pos::new(10, 5)).is_none());
    }

    #[test]
    fn lethal_hit_ends_the_run() {
        let mut game = open_room_game(12, 10);
        game.state.player.class = PlayerClass::SolidityDev;
        game.state.player.hp = 1;
        game.state.player.gas = 100;
        let id = place_enemy(&mut game, Pos::new(6, 4), EnemyKind::Normal);
        game.state.enemies[id].atk = 40;
        game.enemy_attacks(id);
        assert_eq!(game.status(), RunStatus::GameOver);
        assert_eq!(game.player().hp, 0);
        assert!(game.messages().contains("GAME OVER"));
    }
}
