//! The turn controller seen from the host: an intent queue, the debounce gate,
//! and the save slot.
//! This module exists to keep storage and real-time pacing out of `Game`.
//! It does not own rendering, key mapping or the timer itself.

use std::collections::VecDeque;

use crate::game::Game;
use crate::rng::{Dice, mix_seed_stream};
use crate::save::{SaveError, decode, encode};
use crate::store::SaveStore;
use crate::types::{GameEvent, Intent, Rejection, Tone, TurnOutcome};

/// Intents beyond this many pending ones are dropped.
pub const INTENT_QUEUE_LIMIT: usize = 8;

const AUTOSAVE_STREAM: u64 = 0xA5A5;

pub struct Session<S> {
    game: Game,
    store: S,
    queue: VecDeque<Intent>,
    last_action_at: Option<u64>,
    autosave_dice: Dice,
}

impl<S: SaveStore> Session<S> {
    pub fn new(game: Game, store: S) -> Self {
        let autosave_dice = Dice::from_seed(mix_seed_stream(game.seed(), AUTOSAVE_STREAM));
        Self { game, store, queue: VecDeque::new(), last_action_at: None, autosave_dice }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queues an intent. Returns false when the queue is full.
    pub fn submit(&mut self, intent: Intent) -> bool {
        if self.queue.len() >= INTENT_QUEUE_LIMIT {
            return false;
        }
        self.queue.push_back(intent);
        true
    }

    /// One timer tick. Resolves at most one queued intent, and only once the
    /// debounce interval since the last accepted action has passed; a
    /// debounced intent stays queued.
    pub fn tick(&mut self, now_ms: u64) -> Option<TurnOutcome> {
        let intent = *self.queue.front()?;
        let debounce = self.game.rules().timing.debounce_ms;
        if self.last_action_at.is_some_and(|last| now_ms.saturating_sub(last) < debounce) {
            return Some(TurnOutcome::Rejected(Rejection::Debounced));
        }
        self.queue.pop_front();

        let outcome = match intent {
            Intent::Save => self.handle_save(),
            Intent::Load => self.handle_load(),
            Intent::NewGame => self.handle_new_game(),
            other => self.game.resolve(other),
        };
        if !matches!(outcome, TurnOutcome::Rejected(_)) {
            self.last_action_at = Some(now_ms);
        }
        let autosave_chance = self.game.rules().timing.autosave_chance;
        if outcome == TurnOutcome::Resolved && self.autosave_dice.chance(autosave_chance) {
            self.autosave();
        }
        Some(outcome)
    }

    pub fn save(&mut self) -> Result<(), SaveError> {
        let json = encode(&self.game)?;
        self.store.write(&json)?;
        Ok(())
    }

    /// Replaces the game with the stored one. `Ok(false)` means the slot is
    /// empty. On error the current game is untouched.
    pub fn load(&mut self) -> Result<bool, SaveError> {
        let Some(json) = self.store.read()? else {
            return Ok(false);
        };
        self.game = decode(&json, self.game.rules())?;
        Ok(true)
    }

    fn handle_save(&mut self) -> TurnOutcome {
        match self.save() {
            Ok(()) => {
                self.game.log_message("Saved to immutable chain.", Tone::System);
                self.game.record_event(GameEvent::Saved);
                log::info!("saved run at floor {} turn {}", self.game.floor(), self.game.turn());
            }
            Err(err) => {
                self.game.log_message("Save failed (gas too high).", Tone::Warn);
                log::warn!("save failed: {err}");
            }
        }
        TurnOutcome::Handled
    }

    fn handle_load(&mut self) -> TurnOutcome {
        match self.load() {
            Ok(true) => {
                self.game.log_message("Ledger restored. Still HODLing?", Tone::System);
                self.game.record_event(GameEvent::Loaded);
                log::info!("loaded run at floor {} turn {}", self.game.floor(), self.game.turn());
                TurnOutcome::Handled
            }
            Ok(false) => {
                self.game.log_message("No save found.", Tone::Info);
                TurnOutcome::Rejected(Rejection::NoSaveFound)
            }
            Err(err) => {
                self.game.log_message("Corrupted block. Can't load.", Tone::Warn);
                log::warn!("load failed: {err}");
                TurnOutcome::Rejected(Rejection::NoSaveFound)
            }
        }
    }

    fn handle_new_game(&mut self) -> TurnOutcome {
        if let Err(err) = self.store.clear() {
            log::warn!("could not clear save slot: {err}");
        }
        self.game.resolve(Intent::NewGame)
    }

    fn autosave(&mut self) {
        match self.save() {
            Ok(()) => log::debug!("autosaved at turn {}", self.game.turn()),
            Err(err) => log::warn!("autosave failed: {err}"),
        }
    }
}
