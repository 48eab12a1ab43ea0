//! Tunable rule set. Every balance constant of the simulation lives here so
//! tools can override them from a TOML file while the defaults stay the
//! shipped game.

use serde::{Deserialize, Serialize};

use crate::types::{GasTier, ItemKind};

pub const HOTBAR_SLOTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub map_width: usize,
    pub map_height: usize,
    pub final_floor: u32,
    pub boss_every: u32,
    pub miniboss_every: u32,
    pub tier_spacing: u32,
    pub spawns: SpawnRules,
    pub combat: CombatRules,
    pub gas: GasRules,
    pub progression: ProgressionRules,
    pub inventory: InventoryRules,
    pub timing: TimingRules,
    pub message_cap: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    pub enemy_base: u32,
    pub enemy_per_floor: u32,
    pub enemy_min: u32,
    pub enemy_max: u32,
    pub item_base: u32,
    pub item_min: u32,
    pub item_max: u32,
    /// Gas canister weight multiplier on floor 1; tapers to 1 at `gas_boost_until_floor`.
    pub gas_boost: u32,
    pub gas_boost_until_floor: u32,
    pub npc_every: u32,
    pub placement_attempts: u32,
    pub boss_min_distance: u32,
    /// Percent growth per floor for normal enemies.
    pub normal_growth_pct: u32,
    /// Linear percent growth per floor for bosses and mini-bosses.
    pub boss_growth_pct: u32,
    /// Quadratic term divisor for bosses: adds `(floor-1)^2 / divisor` percent.
    pub boss_quadratic_divisor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    pub roll_min: i32,
    pub roll_max: i32,
    pub armor_factor: i32,
    pub dodge_chance: f64,
    pub max_crit_chance: f64,
    /// Crit damage multiplier in percent.
    pub crit_multiplier_pct: i32,
    pub loot_drop_chance: f64,
    pub kill_gas_min: i32,
    pub kill_gas_max: i32,
    pub aggro_radius: f64,
    pub idle_step_chance: f64,
    pub vision_slack: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasRules {
    pub move_cost: i32,
    pub attack_cost: i32,
    pub wait_cost: i32,
    pub safe_at: i32,
    pub low_at: i32,
    pub danger_at: i32,
    pub pull_radius: i32,
    pub low_pull_chance: f64,
    pub danger_hit_chance: f64,
    pub danger_damage_max: i32,
    pub critical_hit_chance: f64,
    pub critical_damage_max: i32,
    pub critical_pull_chance: f64,
    pub empty_damage: i32,
    pub danger_def_penalty: i32,
    pub critical_def_penalty: i32,
    pub empty_def_penalty: i32,
    pub start_gas: i32,
    pub whale_start_gas: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    pub xp_first_level: u32,
    /// XP threshold growth per level in percent.
    pub xp_growth_pct: u32,
    pub maxhp_gain_min: i32,
    pub maxhp_gain_max: i32,
    pub atk_gain_chance: f64,
    pub def_gain_chance: f64,
    pub vision_gain_chance: f64,
    pub pump_chance: f64,
    pub pump_bonus_pct: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRules {
    pub bag_capacity: usize,
    pub heal_stack: u32,
    pub gas_stack: u32,
    pub xp_stack: u32,
    pub atk_stack: u32,
    pub def_stack: u32,
    pub trader_price: i32,
    pub talk_radius: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingRules {
    pub debounce_ms: u64,
    pub timer_tick_ms: u64,
    pub autosave_chance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            map_width: 72,
            map_height: 48,
            final_floor: 25,
            boss_every: 20,
            miniboss_every: 5,
            tier_spacing: 4,
            spawns: SpawnRules::default(),
            combat: CombatRules::default(),
            gas: GasRules::default(),
            progression: ProgressionRules::default(),
            inventory: InventoryRules::default(),
            timing: TimingRules::default(),
            message_cap: 10,
        }
    }
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            enemy_base: 6,
            enemy_per_floor: 2,
            enemy_min: 8,
            enemy_max: 40,
            item_base: 5,
            item_min: 6,
            item_max: 18,
            gas_boost: 4,
            gas_boost_until_floor: 6,
            npc_every: 3,
            placement_attempts: 3000,
            boss_min_distance: 12,
            normal_growth_pct: 6,
            boss_growth_pct: 10,
            boss_quadratic_divisor: 2,
        }
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            roll_min: -1,
            roll_max: 2,
            armor_factor: 100,
            dodge_chance: 0.15,
            max_crit_chance: 0.30,
            crit_multiplier_pct: 150,
            loot_drop_chance: 0.18,
            kill_gas_min: 2,
            kill_gas_max: 10,
            aggro_radius: 9.0,
            idle_step_chance: 0.25,
            vision_slack: 0.75,
        }
    }
}

impl Default for GasRules {
    fn default() -> Self {
        Self {
            move_cost: 1,
            attack_cost: 2,
            wait_cost: 0,
            safe_at: 60,
            low_at: 30,
            danger_at: 10,
            pull_radius: 8,
            low_pull_chance: 0.10,
            danger_hit_chance: 0.15,
            danger_damage_max: 2,
            critical_hit_chance: 0.30,
            critical_damage_max: 3,
            critical_pull_chance: 0.10,
            empty_damage: 1,
            danger_def_penalty: 1,
            critical_def_penalty: 2,
            empty_def_penalty: 3,
            start_gas: 100,
            whale_start_gas: 200,
        }
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            xp_first_level: 50,
            xp_growth_pct: 125,
            maxhp_gain_min: 3,
            maxhp_gain_max: 6,
            atk_gain_chance: 0.7,
            def_gain_chance: 0.5,
            vision_gain_chance: 0.4,
            pump_chance: 0.20,
            pump_bonus_pct: 120,
        }
    }
}

impl Default for InventoryRules {
    fn default() -> Self {
        Self {
            bag_capacity: 15,
            heal_stack: 5,
            gas_stack: 5,
            xp_stack: 3,
            atk_stack: 10,
            def_stack: 10,
            trader_price: 40,
            talk_radius: 2,
        }
    }
}

impl Default for TimingRules {
    fn default() -> Self {
        Self { debounce_ms: 95, timer_tick_ms: 40, autosave_chance: 0.06 }
    }
}

impl Rules {
    pub fn stack_limit(&self, kind: ItemKind) -> u32 {
        let limit = match kind {
            ItemKind::Heal => self.inventory.heal_stack,
            ItemKind::Gas => self.inventory.gas_stack,
            ItemKind::Xp => self.inventory.xp_stack,
            ItemKind::Atk => self.inventory.atk_stack,
            ItemKind::Def => self.inventory.def_stack,
        };
        limit.max(1)
    }

    pub fn gas_tier(&self, gas: i32) -> GasTier {
        if gas <= 0 {
            GasTier::Empty
        } else if gas < self.gas.danger_at {
            GasTier::Critical
        } else if gas < self.gas.low_at {
            GasTier::Danger
        } else if gas < self.gas.safe_at {
            GasTier::Low
        } else {
            GasTier::Safe
        }
    }

    pub fn defense_penalty(&self, tier: GasTier) -> i32 {
        match tier {
            GasTier::Safe | GasTier::Low => 0,
            GasTier::Danger => self.gas.danger_def_penalty,
            GasTier::Critical => self.gas.critical_def_penalty,
            GasTier::Empty => self.gas.empty_def_penalty,
        }
    }

    /// Enemy crit chance against the player: zero at or above the safe
    /// threshold, rising linearly to the maximum at empty.
    pub fn crit_chance(&self, gas: i32) -> f64 {
        let safe = self.gas.safe_at;
        if safe <= 0 || gas >= safe {
            return 0.0;
        }
        if gas <= 0 {
            return self.combat.max_crit_chance;
        }
        let missing = f64::from(safe - gas);
        self.combat.max_crit_chance * missing / f64::from(safe)
    }

    pub fn is_boss_floor(&self, floor: u32) -> bool {
        self.boss_every > 0 && floor > 0 && floor.is_multiple_of(self.boss_every)
    }

    pub fn is_miniboss_floor(&self, floor: u32) -> bool {
        self.miniboss_every > 0
            && floor > 0
            && floor.is_multiple_of(self.miniboss_every)
            && !self.is_boss_floor(floor)
    }

    pub fn max_tier(&self, floor: u32) -> u32 {
        floor.saturating_sub(1) / self.tier_spacing.max(1)
    }
}
