//! The simulation aggregate. `Game` owns the world state, the run dice and the
//! rule set, and is mutated only through [`Game::resolve`].

mod bootstrap;
mod combat;
mod enemy_turn;
mod floor_transition;
mod gas;
mod hash;
mod items;
mod movement;
mod npcs;
mod visibility;

#[cfg(test)]
mod test_support;

use std::mem;

use crate::rng::Dice;
use crate::rules::Rules;
use crate::state::{Enemy, FloorItem, GameState, Map, Meta, MessageLog, Npc, Player};
use crate::types::*;

pub use combat::mitigated_damage;
pub(crate) use visibility::line_of_sight;

pub struct Game {
    seed: u64,
    turn: u64,
    rules: Rules,
    dice: Dice,
    state: GameState,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &Map {
        &self.state.map
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn floor(&self) -> u32 {
        self.state.floor
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    pub fn meta(&self) -> Meta {
        self.state.meta
    }

    pub fn messages(&self) -> &MessageLog {
        &self.state.messages
    }

    pub fn inventory_open(&self) -> bool {
        self.state.inventory_open
    }

    pub fn enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.state.enemies.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &FloorItem)> {
        self.state.items.iter()
    }

    pub fn npcs(&self) -> impl Iterator<Item = (NpcId, &Npc)> {
        self.state.npcs.iter()
    }

    pub fn gas_tier(&self) -> GasTier {
        self.rules.gas_tier(self.state.player.gas)
    }

    /// Events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn log_message(&mut self, text: impl Into<String>, tone: Tone) {
        self.state.messages.push(text, tone);
    }

    pub(crate) fn record_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Resolves one gameplay intent. Storage intents (`Save`, `Load`) belong to
    /// the session and are acknowledged here without effect.
    pub fn resolve(&mut self, intent: Intent) -> TurnOutcome {
        match intent {
            Intent::NewGame => {
                self.restart();
                TurnOutcome::Handled
            }
            Intent::ToggleInventory => {
                self.state.inventory_open = !self.state.inventory_open;
                TurnOutcome::Handled
            }
            Intent::Save | Intent::Load => TurnOutcome::Handled,
            _ if self.state.status.is_over() => self.reject(Rejection::RunOver),
            Intent::Move(direction) => self.try_move(direction),
            Intent::Wait => {
                self.say("You wait.", Tone::Info);
                self.spend_gas(self.rules.gas.wait_cost);
                self.finish_turn()
            }
            Intent::UseHotbar(slot) => self.use_hotbar(slot),
            Intent::UseBag(index) => self.use_bag(index),
            Intent::Talk => self.talk_nearest(),
        }
    }

    /// Logs the player-facing reason for a rejected action. Nothing else changes.
    fn reject(&mut self, rejection: Rejection) -> TurnOutcome {
        if let Some(text) = self.rejection_text(rejection) {
            self.say(text, Tone::Info);
        }
        TurnOutcome::Rejected(rejection)
    }

    /// Player-facing line for `rejection`. Debounced input stays silent.
    fn rejection_text(&self, rejection: Rejection) -> Option<String> {
        let text = match rejection {
            Rejection::Blocked => "Something solid blocks the way.".to_string(),
            Rejection::NpcBlocks => "An NPC blocks the path. Press T to talk.".to_string(),
            Rejection::EmptyHotbarSlot(slot) => format!("Hotbar {} is empty.", slot + 1),
            Rejection::EmptyBagSlot(index) => format!("Bag slot {} is empty.", index + 1),
            Rejection::InventoryFull => format!("Inventory full ({}).", self.rules.inventory.bag_capacity),
            Rejection::NoNpcNearby => "No NPC nearby.".to_string(),
            Rejection::NoSaveFound => "No save found.".to_string(),
            Rejection::RunOver => "The run is over. Press N for a new game.".to_string(),
            Rejection::Debounced => return None,
        };
        Some(text)
    }

    /// Closes a consumed player turn: fog, gas risk, the enemy phase, fog again.
    fn finish_turn(&mut self) -> TurnOutcome {
        self.turn += 1;
        self.reveal_fog();
        if !self.state.status.is_over() {
            self.apply_gas_risk();
        }
        if !self.state.status.is_over() {
            self.enemy_turn();
        }
        self.reveal_fog();
        TurnOutcome::Resolved
    }

    fn say(&mut self, text: impl Into<String>, tone: Tone) {
        self.state.messages.push(text, tone);
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn player_defeated(&mut self) {
        self.state.player.hp = self.state.player.hp.max(0);
        self.state.status = RunStatus::GameOver;
        self.say("You got rugged. GAME OVER.", Tone::Danger);
        self.emit(GameEvent::GameOver);
        log::info!("run over on floor {} after {} turns", self.state.floor, self.turn);
    }
}
