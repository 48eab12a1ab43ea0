use anyhow::{Result, bail};
use clap::Parser;
use dungeon::save::{decode, encode};
use dungeon::{Direction, Game, Intent, Rules, Tile, TurnOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First run seed; each run uses the next one
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20)]
    runs: u64,
    #[arg(short, long, default_value_t = 2000)]
    turns: u32,
    /// Round-trip the run through a save document every N resolved turns (0 disables)
    #[arg(long, default_value_t = 50)]
    save_every: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_intent(rng: &mut ChaCha8Rng) -> Intent {
    let weighted = [
        Intent::Move(Direction::North),
        Intent::Move(Direction::South),
        Intent::Move(Direction::East),
        Intent::Move(Direction::West),
        Intent::Move(Direction::North),
        Intent::Move(Direction::South),
        Intent::Move(Direction::East),
        Intent::Move(Direction::West),
        Intent::Wait,
        Intent::Talk,
        Intent::UseHotbar(choose(rng, &[0, 1, 2, 3, 4])),
        Intent::UseBag(choose(rng, &[0, 1, 2])),
    ];
    choose(rng, &weighted)
}

fn check_invariants(game: &Game) -> Result<()> {
    let player = game.player();
    let map = game.map();
    let rules = game.rules();
    if !map.is_walkable(player.pos) {
        bail!("player inside a wall at {:?}", player.pos);
    }
    if player.gas < 0 || player.hp > player.maxhp {
        bail!("player stats out of range: gas {}, hp {}/{}", player.gas, player.hp, player.maxhp);
    }
    if map.count_tiles(Tile::Stairs) != 1 {
        bail!("floor {} has {} stairs tiles", game.floor(), map.count_tiles(Tile::Stairs));
    }
    if player.bag.len() > rules.inventory.bag_capacity {
        bail!("bag holds {} stacks", player.bag.len());
    }
    for stack in player.hotbar.iter().flatten().chain(player.bag.iter()) {
        if stack.quantity == 0 || stack.quantity > rules.stack_limit(stack.kind) {
            bail!("stack {} has quantity {}", stack.name, stack.quantity);
        }
    }
    for (_, enemy) in game.enemies().filter(|(_, enemy)| enemy.is_alive()) {
        if enemy.footprint().any(|pos| map.tile_at(pos) != Tile::Floor || pos == player.pos) {
            bail!("{} at {:?} overlaps a wall, the stairs or the player", enemy.name, enemy.pos);
        }
    }
    Ok(())
}

struct RunReport {
    resolved: u32,
    floor: u32,
    hash: u64,
}

fn fuzz_run(seed: u64, args: &Args, rules: &Rules) -> Result<RunReport> {
    let mut game = Game::new(seed, rules);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED);
    let mut resolved = 0;

    for _ in 0..args.turns {
        if game.status().is_over() {
            break;
        }
        if game.resolve(random_intent(&mut rng)) == TurnOutcome::Resolved {
            resolved += 1;
            if args.save_every > 0 && resolved % args.save_every == 0 {
                let before = game.snapshot_hash();
                game = decode(&encode(&game)?, rules)?;
                if game.snapshot_hash() != before {
                    log::warn!("seed {seed}: snapshot hash diverged after a save round trip");
                    bail!("seed {seed}: save round trip changed the snapshot hash at turn {}", game.turn());
                }
            }
        }
        game.drain_events();
        if let Err(err) = check_invariants(&game) {
            log::warn!("seed {seed}: invariant broken at turn {}", game.turn());
            bail!("seed {seed}, turn {}: {err}", game.turn());
        }
    }
    log::debug!("seed {seed}: finished after {resolved} resolved turns on floor {}", game.floor());
    Ok(RunReport { resolved, floor: game.floor(), hash: game.snapshot_hash() })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let rules = Rules::default();

    println!("Fuzzing {} runs from seed {} for up to {} turns each...", args.runs, args.seed, args.turns);
    let mut deepest = 0;
    for offset in 0..args.runs {
        let seed = args.seed.wrapping_add(offset);
        let report = fuzz_run(seed, &args, &rules)?;
        deepest = deepest.max(report.floor);
        println!(
            "seed {seed}: {} turns, reached floor {}, hash 0x{:016x}",
            report.resolved, report.floor, report.hash
        );
    }
    println!("All runs kept their invariants. Deepest floor: {deepest}");
    Ok(())
}
