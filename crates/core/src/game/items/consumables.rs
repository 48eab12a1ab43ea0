//! Effects of using one unit of an item.

use super::*;

impl Game {
    pub(in crate::game) fn apply_item(&mut self, unit: &ItemStack) {
        let amount = unit.amount;
        match unit.kind {
            ItemKind::Heal => {
                let player = &mut self.state.player;
                let before = player.hp;
                player.hp = (player.hp + amount).min(player.maxhp);
                let healed = player.hp - before;
                self.say(format!("Healed {healed}."), Tone::Good);
            }
            ItemKind::Gas => {
                self.state.player.gas += amount;
                self.say(format!("+{amount} Gas."), Tone::Good);
            }
            ItemKind::Xp => self.gain_xp(amount.max(0) as u32),
            ItemKind::Atk => {
                self.state.player.atk += amount;
                self.say(format!("ATK +{amount}."), Tone::Level);
            }
            ItemKind::Def => {
                self.state.player.def += amount;
                self.say(format!("DEF +{amount}."), Tone::Level);
            }
        }
        self.emit(GameEvent::ItemUsed { kind: unit.kind });
    }
}
