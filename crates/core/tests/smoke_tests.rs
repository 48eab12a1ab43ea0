use dungeon::{
    Direction, Game, GameEvent, Intent, MemoryStore, PlayerClass, Rejection, Rules, RunStatus,
    SaveStore, Session, Tile, TurnOutcome,
};

/// Greedy walker: steps toward the stairs along the larger gap, falling back
/// to any open direction. Enough to make progress on most floors.
fn step_toward_stairs(game: &Game) -> Intent {
    let player = game.player().pos;
    let stairs = game.state().stairs;
    let mut preferred = Vec::new();
    if stairs.x > player.x {
        preferred.push(Direction::East);
    }
    if stairs.x < player.x {
        preferred.push(Direction::West);
    }
    if stairs.y > player.y {
        preferred.push(Direction::South);
    }
    if stairs.y < player.y {
        preferred.push(Direction::North);
    }
    preferred.extend(Direction::ALL);
    let direction = preferred
        .into_iter()
        .find(|&direction| game.map().is_walkable(player.step(direction)))
        .unwrap_or(Direction::North);
    Intent::Move(direction)
}

#[test]
fn new_run_starts_clean() {
    let game = Game::new_with_class(31_337, &Rules::default(), PlayerClass::SolidityDev);
    assert_eq!(game.floor(), 1);
    assert_eq!(game.status(), RunStatus::Playing);
    assert_eq!(game.map().count_tiles(Tile::Stairs), 1);
    assert!(game.map().is_explored(game.player().pos));
    assert!(game.enemies().count() > 0);
    assert!(game.items().count() > 0);
    assert!(game.messages().len() <= game.rules().message_cap);
}

#[test]
fn rejected_actions_change_nothing() {
    let mut game = Game::new_with_class(8, &Rules::default(), PlayerClass::WhaleApprentice);
    let before = game.snapshot_hash();
    assert_eq!(game.resolve(Intent::UseHotbar(4)), TurnOutcome::Rejected(Rejection::EmptyHotbarSlot(4)));
    assert_eq!(game.snapshot_hash(), before);
    assert_eq!(game.turn(), 0);
}

#[test]
fn inventory_toggle_does_not_use_a_turn() {
    let mut game = Game::new(3, &Rules::default());
    assert_eq!(game.resolve(Intent::ToggleInventory), TurnOutcome::Handled);
    assert!(game.inventory_open());
    assert_eq!(game.turn(), 0);
}

#[test]
fn walking_toward_the_stairs_never_climbs_back_up() {
    let mut game = Game::new_with_class(2_468, &Rules::default(), PlayerClass::RugSurvivor);
    let mut deepest = game.floor();
    for _ in 0..1_500 {
        let intent = step_toward_stairs(&game);
        if game.resolve(intent) == TurnOutcome::Rejected(Rejection::RunOver) {
            break;
        }
        for event in game.drain_events() {
            if let GameEvent::FloorChanged { floor } = event {
                assert_eq!(floor, deepest + 1);
                deepest = floor;
            }
        }
        assert!(game.map().is_walkable(game.player().pos));
        assert_eq!(game.floor(), deepest);
    }
    assert!(game.turn() > 0);
    assert!(game.meta().high_floor >= deepest);
}

#[test]
fn session_drives_turns_through_the_queue() {
    let mut rules = Rules::default();
    rules.timing.autosave_chance = 1.0;
    let mut session = Session::new(Game::new(55, &rules), MemoryStore::new());
    session.submit(Intent::Wait);
    session.submit(Intent::Wait);

    let mut now = 0;
    let mut resolved = 0;
    while session.pending() > 0 && now < 1_000 {
        if session.tick(now) == Some(TurnOutcome::Resolved) {
            resolved += 1;
        }
        now += rules.timing.timer_tick_ms;
    }
    assert_eq!(resolved, 2);
    assert!(session.store().read().unwrap().is_some(), "autosave should have written the slot");
}
