use dungeon::{Direction, Game, Intent, Rules, RunStatus, Tile, TurnOutcome};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn random_intent(rng: &mut ChaCha8Rng) -> Intent {
    let roll = rng.next_u64();
    match roll % 12 {
        0..=6 => Intent::Move(Direction::ALL[(roll / 12 % 4) as usize]),
        7 => Intent::Wait,
        8 => Intent::UseHotbar((roll / 12 % 5) as usize),
        9 => Intent::UseBag((roll / 12 % 4) as usize),
        10 => Intent::Talk,
        _ => Intent::ToggleInventory,
    }
}

fn check_invariants(game: &Game) -> Result<(), String> {
    let player = game.player();
    let map = game.map();
    if !map.is_walkable(player.pos) {
        return Err(format!("player inside a wall at {:?}", player.pos));
    }
    if player.gas < 0 {
        return Err(format!("negative gas {}", player.gas));
    }
    if player.hp > player.maxhp {
        return Err(format!("hp {} above max {}", player.hp, player.maxhp));
    }
    if game.status() == RunStatus::Playing && player.hp <= 0 {
        return Err("player at zero hp while still playing".to_string());
    }
    if map.count_tiles(Tile::Stairs) != 1 {
        return Err("floor lost its single stairs tile".to_string());
    }
    let rules = game.rules();
    if player.bag.len() > rules.inventory.bag_capacity {
        return Err(format!("bag holds {} stacks", player.bag.len()));
    }
    for stack in player.hotbar.iter().flatten().chain(player.bag.iter()) {
        if stack.quantity == 0 || stack.quantity > rules.stack_limit(stack.kind) {
            return Err(format!("stack {} has quantity {}", stack.name, stack.quantity));
        }
    }
    let live: Vec<_> = game.enemies().filter(|(_, enemy)| enemy.is_alive()).collect();
    for (id, enemy) in &live {
        for tile in enemy.footprint() {
            if map.tile_at(tile) != Tile::Floor {
                return Err(format!("{} stands on {:?} at {tile:?}", enemy.name, map.tile_at(tile)));
            }
            if tile == player.pos {
                return Err(format!("{} overlaps the player", enemy.name));
            }
            if live.iter().any(|(other, rival)| other != id && rival.occupies(tile)) {
                return Err(format!("{} overlaps another enemy at {tile:?}", enemy.name));
            }
        }
    }
    Ok(())
}

fn run_fuzz_simulation(map_seed: u64, choice_seed: u64, max_turns: u32) -> Result<(), String> {
    let mut game = Game::new(map_seed, &Rules::default());
    let mut rng = ChaCha8Rng::seed_from_u64(choice_seed);
    check_invariants(&game)?;

    for _ in 0..max_turns {
        let before = game.turn();
        let outcome = game.resolve(random_intent(&mut rng));
        match outcome {
            TurnOutcome::Resolved if game.turn() != before + 1 => {
                return Err(format!("resolved turn advanced from {before} to {}", game.turn()));
            }
            TurnOutcome::Rejected(_) | TurnOutcome::Handled if game.turn() != before => {
                return Err("a turn was consumed by a non-resolving intent".to_string());
            }
            _ => {}
        }
        game.drain_events();
        check_invariants(&game).map_err(|err| format!("map_seed {map_seed}, turn {}: {err}", game.turn()))?;
        if game.status().is_over() {
            let sticky = game.resolve(Intent::Move(Direction::North));
            if !matches!(sticky, TurnOutcome::Rejected(_)) {
                return Err("finished run accepted movement".to_string());
            }
            break;
        }
    }
    Ok(())
}

#[test]
fn fixed_seeds_keep_world_invariants() {
    for seed in [1, 7, 42, 1_234, 99_999] {
        if let Err(err) = run_fuzz_simulation(seed, seed ^ 0xF00D, 600) {
            panic!("{err}");
        }
    }
}

#[test]
fn random_play_keeps_world_invariants() {
    let mut runner = TestRunner::new(ProptestConfig { cases: 24, ..ProptestConfig::default() });
    runner
        .run(&(any::<u64>(), any::<u64>()), |(map_seed, choice_seed)| {
            run_fuzz_simulation(map_seed, choice_seed, 300).map_err(TestCaseError::fail)
        })
        .unwrap();
}
