//! Pickup and item use for the player.
//! This module exists to keep item flow separate from core turn orchestration.
//! It does not own loot rolls or NPC trades.

mod consumables;
mod inventory;

use super::*;
use crate::state::ItemStack;

pub(crate) use inventory::stow;
use inventory::{take_from_bag, take_from_hotbar};

impl Game {
    /// Picks up whatever lies at `pos`. Units that do not fit stay on the floor.
    pub(super) fn pickup_at(&mut self, pos: Pos) {
        let Some(id) = self.state.item_at(pos) else {
            return;
        };
        let offered = self.state.items[id].stack.clone();
        let taken = stow(&mut self.state.player, &self.rules, &offered);
        if taken == 0 {
            if let Some(text) = self.rejection_text(Rejection::InventoryFull) {
                self.say(text, Tone::Warn);
            }
            return;
        }

        if taken == offered.quantity {
            self.state.items.remove(id);
            self.say(format!("Picked up: {}", offered.name), Tone::Loot);
        } else {
            self.state.items[id].stack.quantity -= taken;
            self.say(format!("Picked up: {} x{taken}. The rest stays behind.", offered.name), Tone::Loot);
        }
        self.emit(GameEvent::ItemPickedUp { kind: offered.kind, quantity: taken });
    }

    pub(super) fn use_hotbar(&mut self, slot: usize) -> TurnOutcome {
        let Some(unit) = take_from_hotbar(&mut self.state.player, slot) else {
            return self.reject(Rejection::EmptyHotbarSlot(slot));
        };
        self.consume(unit)
    }

    pub(super) fn use_bag(&mut self, index: usize) -> TurnOutcome {
        let Some(unit) = take_from_bag(&mut self.state.player, index) else {
            return self.reject(Rejection::EmptyBagSlot(index));
        };
        self.consume(unit)
    }

    fn consume(&mut self, unit: ItemStack) -> TurnOutcome {
        self.apply_item(&unit);
        if self.state.status.is_over() {
            return TurnOutcome::Resolved;
        }
        self.finish_turn()
    }
}
