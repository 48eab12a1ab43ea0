use dungeon::mapgen::flood_reachable;
use dungeon::mapgen::progression::{enemy_count, item_count};
use dungeon::{EnemyKind, MapGenerator, Rules, Tile, mitigated_damage};
use proptest::prelude::*;

#[test]
fn floor_one_with_fixed_seed_reaches_the_stairs() {
    let rules = Rules::default();
    let floor = MapGenerator::new(2_026, &rules).generate(1);
    let reach = flood_reachable(&floor.map, floor.spawn);
    let index = floor.stairs.y as usize * floor.map.width() + floor.stairs.x as usize;
    assert!(reach[index]);
}

#[test]
fn guardian_floors_spawn_exactly_one_guardian() {
    let rules = Rules::default();
    let generator = MapGenerator::new(5, &rules);
    for floor in [5, 10, 15, 20, 25] {
        let generated = generator.generate(floor);
        let bosses = generated.enemies.iter().filter(|enemy| enemy.kind == EnemyKind::Boss).count();
        let minis = generated.enemies.iter().filter(|enemy| enemy.kind == EnemyKind::MiniBoss).count();
        if rules.is_boss_floor(floor) {
            assert_eq!((bosses, minis), (1, 0), "floor {floor}");
        } else {
            assert_eq!((bosses, minis), (0, 1), "floor {floor}");
        }
    }
}

#[test]
fn population_stays_within_the_configured_bounds() {
    let rules = Rules::default();
    for floor in 1..=rules.final_floor {
        let generated = MapGenerator::new(u64::from(floor) * 31, &rules).generate(floor);
        assert!(generated.enemies.len() <= enemy_count(&rules, floor) + 1);
        assert!(generated.items.len() <= item_count(&rules, floor));
        for enemy in &generated.enemies {
            assert!(enemy.tier <= rules.max_tier(floor) || enemy.kind != EnemyKind::Normal);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn every_floor_connects_spawn_to_a_single_stairs(seed in any::<u64>(), floor in 1u32..=25) {
        let rules = Rules::default();
        let generated = MapGenerator::new(seed, &rules).generate(floor);
        prop_assert_eq!(generated.map.count_tiles(Tile::Stairs), 1);
        prop_assert_eq!(generated.map.tile_at(generated.stairs), Tile::Stairs);
        let reach = flood_reachable(&generated.map, generated.spawn);
        let index = generated.stairs.y as usize * generated.map.width() + generated.stairs.x as usize;
        prop_assert!(reach[index]);
    }

    #[test]
    fn damage_is_always_at_least_one(raw in -50i32..500, defense in -20i32..2_000, factor in 1i32..400) {
        prop_assert!(mitigated_damage(raw, defense, factor) >= 1);
    }
}
