//! Gas spending and the per-turn risk applied as the pool runs dry.

use super::*;
use crate::state::footprint_distance;

impl Game {
    pub(super) fn spend_gas(&mut self, cost: i32) {
        let player = &mut self.state.player;
        player.gas = (player.gas - cost.max(0)).max(0);
    }

    /// Rolls the risk of the current gas tier once. Called after every
    /// consumed player turn, before enemies act.
    pub(super) fn apply_gas_risk(&mut self) {
        let tier = self.gas_tier();
        let gas = self.rules.gas.clone();
        let (damage, pull) = match tier {
            GasTier::Safe => (0, false),
            GasTier::Low => (0, self.dice.chance(gas.low_pull_chance)),
            GasTier::Danger => {
                let hit = self.dice.chance(gas.danger_hit_chance);
                (if hit { self.dice.range(1, gas.danger_damage_max) } else { 0 }, false)
            }
            GasTier::Critical => {
                let hit = self.dice.chance(gas.critical_hit_chance);
                let damage = if hit { self.dice.range(1, gas.critical_damage_max) } else { 0 };
                (damage, self.dice.chance(gas.critical_pull_chance))
            }
            GasTier::Empty => (gas.empty_damage, true),
        };
        if damage == 0 && !pull {
            return;
        }

        let pulled = if pull { self.pull_aggro(gas.pull_radius) } else { 0 };
        if pulled > 0 {
            self.say("Your stuck tx echoes through the mempool. Enemies close in.", Tone::Warn);
        }
        if damage > 0 {
            self.state.player.hp -= damage;
            let text = match tier {
                GasTier::Empty => format!("Out of gas! Reverted for {damage}."),
                _ => format!("Gas spike! You take {damage}."),
            };
            self.say(text, Tone::Danger);
        }
        self.emit(GameEvent::GasRisk { tier, damage, pulled });
        if self.state.player.hp <= 0 {
            self.player_defeated();
        }
    }

    /// Sets aggro on every live enemy within `radius` of the player. Returns
    /// how many were not already chasing.
    fn pull_aggro(&mut self, radius: i32) -> usize {
        let player = self.state.player.pos;
        let radius = radius.max(0) as u32;
        let mut pulled = 0;
        for (_, enemy) in self.state.enemies.iter_mut() {
            if !enemy.is_alive() || enemy.aggro {
                continue;
            }
            if footprint_distance(enemy.pos, enemy.size(), player) <= radius {
                enemy.aggro = true;
                pulled += 1;
            }
        }
        pulled
    }
}
