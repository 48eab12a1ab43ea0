//! Starting world construction and first-floor setup for a new run.
//! This module exists to isolate initialization details from runtime simulation flow.
//! It does not own turn resolution once a run has started.

use slotmap::SlotMap;

use super::*;
use crate::content::{PlayerClass, STORY_INTRO};
use crate::rng::{mix_seed_stream, resume_seed};

const RESTART_STREAM: u64 = 0x4E45_5747;

impl Game {
    /// Starts a run with a class rolled from the run seed.
    pub fn new(seed: u64, rules: &Rules) -> Self {
        let mut dice = Dice::from_seed(seed);
        let class = PlayerClass::ALL[dice.index(PlayerClass::ALL.len())];
        Self::start(seed, rules, class, dice)
    }

    pub fn new_with_class(seed: u64, rules: &Rules, class: PlayerClass) -> Self {
        Self::start(seed, rules, class, Dice::from_seed(seed))
    }

    fn start(seed: u64, rules: &Rules, class: PlayerClass, dice: Dice) -> Self {
        let player = Self::starting_player(rules, class, Pos::new(0, 0));
        let mut game = Self {
            seed,
            turn: 0,
            rules: rules.clone(),
            dice,
            state: GameState {
                map: Map::filled(rules.map_width, rules.map_height, Tile::Wall),
                floor: 0,
                stairs: Pos::new(0, 0),
                spawn: Pos::new(0, 0),
                player,
                enemies: SlotMap::with_key(),
                items: SlotMap::with_key(),
                npcs: SlotMap::with_key(),
                status: RunStatus::Playing,
                messages: MessageLog::new(rules.message_cap),
                meta: Meta::default(),
                inventory_open: false,
            },
            events: Vec::new(),
        };

        for line in STORY_INTRO {
            game.say(line, Tone::Lore);
        }
        let profile = class.profile();
        game.say(format!("Class selected: {}. {}", profile.name, profile.perk), Tone::System);
        game.descend_to_floor(1);
        game.say("Tip: Find '>' to descend. Floor 25 = Genesis Block.", Tone::Info);
        log::info!("new run: seed {seed:#x}, class {}", profile.name);
        game
    }

    pub(crate) fn starting_player(rules: &Rules, class: PlayerClass, spawn: Pos) -> Player {
        let profile = class.profile();
        let gas = if class.is_whale() { rules.gas.whale_start_gas } else { rules.gas.start_gas };
        Player {
            pos: spawn,
            facing: Direction::default(),
            hp: profile.hp,
            maxhp: profile.hp,
            atk: profile.atk,
            def: profile.def,
            vision: profile.vision + class.vision_bonus(),
            level: 1,
            xp: 0,
            xp_next: rules.progression.xp_first_level,
            class,
            gas,
            rep: 0,
            hotbar: Default::default(),
            bag: Vec::new(),
        }
    }

    /// Replaces the run with a fresh one. Meta progression and rules carry over.
    pub(super) fn restart(&mut self) {
        let seed = mix_seed_stream(self.seed, self.turn.wrapping_add(RESTART_STREAM));
        let meta = self.state.meta;
        let rules = self.rules.clone();
        *self = Self::new(seed, &rules);
        self.state.meta.wins = meta.wins;
        self.state.meta.high_floor = self.state.meta.high_floor.max(meta.high_floor);
    }

    /// Rebuilds a game from decoded save data. The run dice are reseeded from
    /// the run seed and turn so a load does not replay the original rolls.
    pub(crate) fn restore(seed: u64, turn: u64, rules: Rules, state: GameState) -> Self {
        Self { seed, turn, rules, dice: Dice::from_seed(resume_seed(seed, turn)), state, events: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_set_starting_stats() {
        let rules = Rules::default();
        let dev = Game::starting_player(&rules, PlayerClass::SolidityDev, Pos::new(2, 2));
        assert_eq!((dev.hp, dev.atk, dev.def, dev.vision, dev.gas), (35, 8, 4, 13, 100));
        let whale = Game::starting_player(&rules, PlayerClass::WhaleApprentice, Pos::new(2, 2));
        assert_eq!(whale.gas, 200);
        assert_eq!(whale.vision, 11);
        assert_eq!(whale.xp_next, 50);
        assert!(whale.hotbar.iter().all(Option::is_none));
    }

    #[test]
    fn new_game_lands_on_floor_one_with_intro() {
        let game = Game::new_with_class(99, &Rules::default(), PlayerClass::RugSurvivor);
        assert_eq!(game.floor(), 1);
        assert_eq!(game.status(), RunStatus::Playing);
        assert_eq!(game.player().pos, game.state().spawn);
        assert_eq!(game.map().tile_at(game.state().stairs), Tile::Stairs);
        assert!(game.messages().contains("Class selected: Rug Survivor."));
        assert!(game.messages().contains("Tip: Find '>'"));
        assert!(game.messages().contains("GM degens."));
        assert_eq!(game.meta().high_floor, 1);
    }

    #[test]
    fn same_seed_same_start() {
        let rules = Rules::default();
        let a = Game::new(4242, &rules);
        let b = Game::new(4242, &rules);
        assert_eq!(a.player().class, b.player().class);
        assert_eq!(a.snapshot_hash(), b.snapshot_hash());
    }

    #[test]
    fn restart_keeps_meta_and_rerolls_the_run() {
        let mut game = Game::new(1, &Rules::default());
        game.state.meta.wins = 3;
        game.state.meta.high_floor = 12;
        game.state.status = RunStatus::GameOver;
        let old_seed = game.seed();

        assert_eq!(game.resolve(Intent::NewGame), TurnOutcome::Handled);
        assert_ne!(game.seed(), old_seed);
        assert_eq!(game.status(), RunStatus::Playing);
        assert_eq!(game.floor(), 1);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.meta(), Meta { wins: 3, high_floor: 12 });
    }
}
