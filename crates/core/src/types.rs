use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ItemId;
    pub struct NpcId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn euclidean(a: Pos, b: Pos) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

pub fn neighbors(pos: Pos) -> [Pos; 4] {
    [
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y, x: pos.x - 1 },
    ]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    #[default]
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
    Stairs,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Stairs => '>',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Floor),
            '>' => Some(Tile::Stairs),
            _ => None,
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Stairs)
    }
}

/// Enemy size class. Determines tile footprint and the stat curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    MiniBoss,
    Boss,
}

impl EnemyKind {
    pub fn footprint(self) -> i32 {
        match self {
            EnemyKind::Normal => 1,
            EnemyKind::MiniBoss => 2,
            EnemyKind::Boss => 4,
        }
    }

    pub fn locks_stairs(self) -> bool {
        !matches!(self, EnemyKind::Normal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Heal,
    Gas,
    Atk,
    Def,
    Xp,
}

impl ItemKind {
    pub fn hotbar_eligible(self) -> bool {
        matches!(self, ItemKind::Heal | ItemKind::Gas | ItemKind::Xp)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcRole {
    Lore,
    Trader,
    Buffer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    Playing,
    GameOver,
    Won,
}

impl RunStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, RunStatus::Playing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GasTier {
    Empty,
    Critical,
    Danger,
    Low,
    Safe,
}

/// Discrete inputs accepted by the turn controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    Wait,
    /// Zero-based hotbar slot.
    UseHotbar(usize),
    /// Zero-based bag index.
    UseBag(usize),
    Talk,
    ToggleInventory,
    Save,
    Load,
    NewGame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Blocked,
    NpcBlocks,
    EmptyHotbarSlot(usize),
    EmptyBagSlot(usize),
    InventoryFull,
    NoNpcNearby,
    NoSaveFound,
    RunOver,
    Debounced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A player turn was consumed and enemies acted.
    Resolved,
    /// Handled without consuming a turn (save, load, inventory toggle).
    Handled,
    Rejected(Rejection),
}

/// Who swung in an [`GameEvent::AttackResolved`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combatant {
    Player,
    Enemy(EnemyId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    AttackResolved { attacker: Combatant, target: Combatant, damage: i32, critical: bool },
    Dodged { attacker: EnemyId },
    EnemyKilled { enemy: EnemyId, xp: u32 },
    LeveledUp { level: u32 },
    ItemDropped { pos: Pos, kind: ItemKind },
    ItemPickedUp { kind: ItemKind, quantity: u32 },
    ItemUsed { kind: ItemKind },
    FloorChanged { floor: u32 },
    StairsLocked,
    GasRisk { tier: GasTier, damage: i32, pulled: usize },
    GameOver,
    Victory,
    Saved,
    Loaded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Info,
    Good,
    Warn,
    Danger,
    Loot,
    Level,
    Lore,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub tone: Tone,
}
