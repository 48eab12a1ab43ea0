//! Talking to NPCs and their once-per-floor favors.

use super::*;
use crate::content::{ITEMS, find_npc_archetype};
use crate::game::items::stow;
use crate::state::ItemStack;

impl Game {
    fn nearest_npc(&self) -> Option<NpcId> {
        let origin = self.state.player.pos;
        let radius = self.rules.inventory.talk_radius;
        self.state
            .npcs
            .iter()
            .map(|(id, npc)| (id, manhattan(origin, npc.pos)))
            .filter(|&(_, distance)| distance <= radius)
            .min_by_key(|&(_, distance)| distance)
            .map(|(id, _)| id)
    }

    pub(super) fn talk_nearest(&mut self) -> TurnOutcome {
        let Some(id) = self.nearest_npc() else {
            return self.reject(Rejection::NoNpcNearby);
        };
        let npc = self.state.npcs[id].clone();

        let line = find_npc_archetype(&npc.name)
            .and_then(|archetype| self.dice.pick(archetype.lines))
            .copied()
            .unwrap_or("...");
        self.say(format!("{}: \"{line}\"", npc.name), Tone::Lore);
        self.state.player.rep += self.dice.range(-1, 2);

        if npc.used {
            if npc.role != NpcRole::Lore {
                self.say(format!("{} has nothing more for you this floor.", npc.name), Tone::Info);
            }
        } else {
            let favored = match npc.role {
                NpcRole::Lore => self.lore_tip(),
                NpcRole::Trader => self.trade(&npc.name),
                NpcRole::Buffer => self.blessing(),
            };
            if favored {
                self.state.npcs[id].used = true;
            }
        }
        self.finish_turn()
    }

    fn lore_tip(&mut self) -> bool {
        if self.dice.chance(0.25) {
            let gas = self.dice.range(1, 8);
            self.state.player.gas += gas;
            self.say(format!("A tip from the mempool. +{gas} Gas."), Tone::Good);
        }
        true
    }

    /// Sells one Health Potion. Gas is only kept when the potion fits.
    fn trade(&mut self, name: &str) -> bool {
        let price = self.rules.inventory.trader_price;
        if self.state.player.gas < price {
            self.say(format!("{name} wants {price} gas for a potion."), Tone::Info);
            return false;
        }
        let Some(potion) = ITEMS.iter().find(|archetype| archetype.kind == ItemKind::Heal) else {
            return false;
        };
        let offered = ItemStack {
            name: potion.name.to_string(),
            glyph: potion.glyph,
            kind: potion.kind,
            amount: potion.amount,
            quantity: 1,
        };

        self.state.player.gas -= price;
        if stow(&mut self.state.player, &self.rules, &offered) == 0 {
            self.state.player.gas += price;
            let full = self.rejection_text(Rejection::InventoryFull).unwrap_or_default();
            self.say(format!("{full} Trade refunded."), Tone::Warn);
            return false;
        }
        self.say(format!("Bought {} for {price} gas.", offered.name), Tone::Loot);
        self.emit(GameEvent::ItemPickedUp { kind: offered.kind, quantity: 1 });
        true
    }

    fn blessing(&mut self) -> bool {
        let player = &mut self.state.player;
        let text = match self.dice.range(0, 2) {
            0 => {
                player.atk += 1;
                "Blessed. ATK +1."
            }
            1 => {
                player.def += 1;
                "Blessed. DEF +1."
            }
            _ => {
                player.maxhp += 3;
                player.hp += 3;
                "Blessed. Max HP +3."
            }
        };
        player.rep += 1;
        self.say(text, Tone::Good);
        true
    }
}
