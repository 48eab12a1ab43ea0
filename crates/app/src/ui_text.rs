//! Text formatting for the HUD, hotbar, inventory panel and overlays.

use dungeon::content::floor_name;
use dungeon::state::ItemStack;
use dungeon::{Game, GasTier, Player, RunStatus, Tone};

pub fn status_line(game: &Game) -> String {
    let player = game.player();
    format!(
        "Floor {}: {} | HP {}/{} | ATK {} DEF {} | LV {} XP {}/{} | Gas {} ({}) | Rep {}",
        game.floor(),
        floor_name(game.floor()),
        player.hp.max(0),
        player.maxhp,
        player.atk,
        player.def,
        player.level,
        player.xp,
        player.xp_next,
        player.gas,
        gas_tier_label(game.gas_tier()),
        player.rep,
    )
}

pub fn meta_line(game: &Game) -> String {
    let meta = game.meta();
    format!(
        "{} | Wins {} | Best floor {} | Turn {}",
        game.player().class.profile().name,
        meta.wins,
        meta.high_floor,
        game.turn()
    )
}

pub fn gas_tier_label(tier: GasTier) -> &'static str {
    match tier {
        GasTier::Safe => "safe",
        GasTier::Low => "low",
        GasTier::Danger => "danger",
        GasTier::Critical => "critical",
        GasTier::Empty => "empty",
    }
}

fn stack_label(stack: &ItemStack) -> String {
    if stack.quantity > 1 { format!("{} x{}", stack.name, stack.quantity) } else { stack.name.clone() }
}

pub fn hotbar_line(player: &Player) -> String {
    player
        .hotbar
        .iter()
        .enumerate()
        .map(|(slot, stack)| match stack {
            Some(stack) => format!("[{}] {}", slot + 1, stack_label(stack)),
            None => format!("[{}] -", slot + 1),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Bag listing for the inventory panel. Only the first nine entries get a
/// number key.
pub fn inventory_lines(player: &Player, capacity: usize) -> Vec<String> {
    let mut lines = vec![format!("Bag {}/{} (I to close)", player.bag.len(), capacity)];
    if player.bag.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for (index, stack) in player.bag.iter().enumerate() {
        let key = if index < 9 { format!("{}", index + 1) } else { " ".to_string() };
        lines.push(format!("  {key}  {}", stack_label(stack)));
    }
    lines
}

pub fn overlay_text(status: RunStatus) -> Option<&'static str> {
    match status {
        RunStatus::Playing => None,
        RunStatus::GameOver => Some("GAME OVER - press N for a new run"),
        RunStatus::Won => Some("GENESIS BLOCK FOUND - press N for a new run"),
    }
}

pub fn controls_hint() -> &'static str {
    "Move: arrows/WASD  Wait: .  Use: 1-5  Talk: T  Bag: I  Save: P  Load: L  New: N"
}

/// 0xRRGGBB color a renderer should use for a feed message.
pub fn tone_rgb(tone: Tone) -> u32 {
    match tone {
        Tone::Info => 0xAAAAAA,
        Tone::Good => 0x66FF66,
        Tone::Warn => 0xFFAA33,
        Tone::Danger => 0xFF5555,
        Tone::Loot => 0xFFFF66,
        Tone::Level => 0x66CCFF,
        Tone::Lore => 0xCC99FF,
        Tone::System => 0xFFFFFF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon::{ItemKind, PlayerClass, Rules};

    fn potion(quantity: u32) -> ItemStack {
        ItemStack {
            name: "Health Potion".into(),
            glyph: '!',
            kind: ItemKind::Heal,
            amount: 14,
            quantity,
        }
    }

    #[test]
    fn status_line_names_the_floor_and_gas_tier() {
        let game = Game::new_with_class(1, &Rules::default(), PlayerClass::WhaleApprentice);
        let line = status_line(&game);
        assert!(line.starts_with("Floor 1: Meme Hell"), "{line}");
        assert!(line.contains("Gas 200 (safe)"), "{line}");
    }

    #[test]
    fn hotbar_shows_quantities_and_gaps() {
        let game = Game::new_with_class(1, &Rules::default(), PlayerClass::SolidityDev);
        let mut player = game.player().clone();
        player.hotbar = Default::default();
        player.hotbar[0] = Some(potion(3));
        player.hotbar[2] = Some(potion(1));
        assert_eq!(hotbar_line(&player), "[1] Health Potion x3  [2] -  [3] Health Potion  [4] -  [5] -");
    }

    #[test]
    fn inventory_numbers_the_first_nine_stacks() {
        let game = Game::new_with_class(1, &Rules::default(), PlayerClass::SolidityDev);
        let mut player = game.player().clone();
        player.bag = (0..11).map(|_| potion(2)).collect();
        let lines = inventory_lines(&player, 15);
        assert_eq!(lines[0], "Bag 11/15 (I to close)");
        assert_eq!(lines[1], "  1  Health Potion x2");
        assert!(lines[10].starts_with("     "));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn overlays_only_for_finished_runs() {
        assert_eq!(overlay_text(RunStatus::Playing), None);
        assert!(overlay_text(RunStatus::GameOver).is_some_and(|text| text.contains("GAME OVER")));
        assert!(overlay_text(RunStatus::Won).is_some());
    }
}
