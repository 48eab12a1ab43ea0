use dungeon::rules::HOTBAR_SLOTS;
use dungeon::{Direction, Game, GameEvent, Intent, SaveStore, Session, TurnOutcome};
use macroquad::prelude::KeyCode;

/// Upper bound on timer ticks run for one rendered frame, so a long stall
/// (window drag, breakpoint) does not replay a burst of queued turns.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

pub const MOVE_KEYS: [KeyCode; 8] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
];

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::North),
        KeyCode::Down | KeyCode::S => Some(Direction::South),
        KeyCode::Left | KeyCode::A => Some(Direction::West),
        KeyCode::Right | KeyCode::D => Some(Direction::East),
        _ => None,
    }
}

/// Maps one key press to an intent. Digits use the hotbar normally and the
/// bag while the inventory panel is open.
pub fn intent_for_key(key: KeyCode, inventory_open: bool) -> Option<Intent> {
    if let Some(direction) = direction_for_key(key) {
        return Some(Intent::Move(direction));
    }
    if let Some(digit) = DIGIT_KEYS.iter().position(|&candidate| candidate == key) {
        return if inventory_open {
            Some(Intent::UseBag(digit))
        } else if digit < HOTBAR_SLOTS {
            Some(Intent::UseHotbar(digit))
        } else {
            None
        };
    }
    match key {
        KeyCode::Period | KeyCode::Space => Some(Intent::Wait),
        KeyCode::T => Some(Intent::Talk),
        KeyCode::I => Some(Intent::ToggleInventory),
        KeyCode::P => Some(Intent::Save),
        KeyCode::L => Some(Intent::Load),
        KeyCode::N => Some(Intent::NewGame),
        _ => None,
    }
}

/// Input gathered for one rendered frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameKeys {
    /// Keys that went down this frame.
    pub pressed: Vec<KeyCode>,
    /// A movement key still held from an earlier frame.
    pub held_move: Option<KeyCode>,
}

/// Host-side state: the session plus the fixed-rate timer that drives it.
pub struct AppState<S> {
    session: Session<S>,
    clock_ms: u64,
    accumulator_ms: u64,
    /// Events produced by the most recent frame, for transient effects.
    pub recent_events: Vec<GameEvent>,
    pub last_outcome: Option<TurnOutcome>,
}

impl<S: SaveStore> AppState<S> {
    pub fn new(session: Session<S>) -> Self {
        Self { session, clock_ms: 0, accumulator_ms: 0, recent_events: Vec::new(), last_outcome: None }
    }

    pub fn game(&self) -> &Game {
        self.session.game()
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Queues this frame's input, then runs as many timer ticks as the
    /// elapsed time covers. Returns the number of ticks run.
    pub fn frame(&mut self, keys: &FrameKeys, elapsed_ms: u64) -> u32 {
        self.recent_events.clear();
        let inventory_open = self.game().inventory_open();
        for &key in &keys.pressed {
            if let Some(intent) = intent_for_key(key, inventory_open)
                && !self.session.submit(intent)
            {
                log::debug!("intent queue full, dropping {intent:?}");
            }
        }
        // Holding a direction repeats it, but never stacks up a backlog.
        if keys.pressed.is_empty()
            && self.session.pending() == 0
            && let Some(direction) = keys.held_move.and_then(direction_for_key)
        {
            self.session.submit(Intent::Move(direction));
        }

        let tick_ms = self.game().rules().timing.timer_tick_ms.max(1);
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let mut ticks = 0;
        while self.accumulator_ms >= tick_ms && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator_ms -= tick_ms;
            self.clock_ms += tick_ms;
            ticks += 1;
            if let Some(outcome) = self.session.tick(self.clock_ms) {
                self.last_outcome = Some(outcome);
            }
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator_ms = self.accumulator_ms.min(tick_ms);
        }
        self.recent_events.extend(self.session.drain_events());
        ticks
    }
}
