use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dungeon::content::floor_name;
use dungeon::{MapGenerator, Rules, SaveDocument};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a generated floor as ASCII
    Floor {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 1)]
        floor: u32,
        /// TOML file overriding rule values; missing keys keep defaults
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print only the population summary
        #[arg(long)]
        summary_only: bool,
    },
    /// Validate a save file and print a summary
    InspectSave {
        path: PathBuf,
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    log::debug!("Loading rules from {}", path.display());
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read rules file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse rules TOML: {}", path.display()))
}

fn print_floor(seed: u64, floor: u32, rules: &Rules, summary_only: bool) {
    log::info!("Generating floor {floor} from seed {seed}");
    let generated = MapGenerator::new(seed, rules).generate(floor);
    println!("Seed {seed}, floor {floor}: {}", floor_name(floor));
    println!(
        "{} rooms, {} pruned tiles, {} enemies, {} items, {} npcs, spawn {:?}, stairs {:?}",
        generated.room_count,
        generated.pruned_tiles,
        generated.enemies.len(),
        generated.items.len(),
        generated.npcs.len(),
        generated.spawn,
        generated.stairs,
    );
    if summary_only {
        return;
    }
    for row in generated.render_ascii() {
        println!("{row}");
    }
}

fn inspect_save(path: &Path, rules: &Rules) -> Result<()> {
    log::info!("Inspecting save file {}", path.display());
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read save file: {}", path.display()))?;
    let document = SaveDocument::from_json(&json).with_context(|| "Save document failed validation")?;
    let version = document.version;
    let checksum = if document.checksum.is_some() { "verified" } else { "absent" };
    if document.checksum.is_none() {
        log::warn!("Save file {} carries no checksum", path.display());
    }
    let game = document.restore(rules).with_context(|| "Save document could not be restored")?;

    let player = game.player();
    println!("Version: {version} (checksum {checksum})");
    println!("Seed: {}  Turn: {}  Status: {:?}", game.seed(), game.turn(), game.status());
    println!("Floor: {} ({})", game.floor(), floor_name(game.floor()));
    println!(
        "Player: {} at {:?}, HP {}/{}, ATK {}, DEF {}, LV {}, gas {}, {} item units",
        player.class.profile().name,
        player.pos,
        player.hp,
        player.maxhp,
        player.atk,
        player.def,
        player.level,
        player.gas,
        player.item_units(),
    );
    let live = game.enemies().filter(|(_, enemy)| enemy.is_alive()).count();
    println!("Enemies: {live} alive of {}", game.enemies().count());
    println!("Items on floor: {}  NPCs: {}", game.items().count(), game.npcs().count());
    println!("Explored tiles: {}", game.map().explored_count());
    println!("Meta: {:?}", game.meta());
    println!("Snapshot Hash: 0x{:016x}", game.snapshot_hash());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Floor { seed, floor, rules, summary_only } => {
            let rules = load_rules(rules.as_deref())?;
            anyhow::ensure!(floor >= 1, "floor numbers start at 1");
            print_floor(seed, floor, &rules, summary_only);
        }
        Command::InspectSave { path, rules } => {
            let rules = load_rules(rules.as_deref())?;
            inspect_save(&path, &rules)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon::Game;
    use dungeon::save::encode;
    use tempfile::tempdir;

    #[test]
    fn missing_rules_path_yields_defaults() {
        assert_eq!(load_rules(None).unwrap(), Rules::default());
    }

    #[test]
    fn partial_rules_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        fs::write(&path, "[inventory]\nbag_capacity = 4\n").unwrap();

        let rules = load_rules(Some(&path)).unwrap();
        assert_eq!(rules.inventory.bag_capacity, 4);
        assert_eq!(rules.inventory.trader_price, Rules::default().inventory.trader_price);
        assert_eq!(rules.timing, Rules::default().timing);
    }

    #[test]
    fn unreadable_rules_file_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_rules(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn inspect_save_accepts_a_fresh_save_and_rejects_garbage() {
        let dir = tempdir().unwrap();
        let rules = Rules::default();
        let good = dir.path().join("save.json");
        fs::write(&good, encode(&Game::new(7, &rules)).unwrap()).unwrap();
        assert!(inspect_save(&good, &rules).is_ok());

        let bad = dir.path().join("broken.json");
        fs::write(&bad, "{ not a save").unwrap();
        assert!(inspect_save(&bad, &rules).is_err());
    }
}
