//! Static catalogs: enemy, boss, item and NPC archetypes, the class roster,
//! floor names and story text.

use serde::{Deserialize, Serialize};

use crate::types::{ItemKind, NpcRole};

/// Colors are packed `0xRRGGBB` for renderers.
pub type Rgb = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyArchetype {
    pub name: &'static str,
    pub glyph: char,
    pub color: Rgb,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub xp: u32,
    pub tier: u32,
}

pub const ENEMIES: &[EnemyArchetype] = &[
    EnemyArchetype { name: "Bot Swarm", glyph: 'b', color: 0x99CCFF, hp: 9, atk: 3, def: 0, xp: 10, tier: 0 },
    EnemyArchetype { name: "FUD Imp", glyph: 'f', color: 0xFF9966, hp: 10, atk: 4, def: 1, xp: 14, tier: 0 },
    EnemyArchetype { name: "Rug Gremlin", glyph: 'r', color: 0xFF6666, hp: 14, atk: 5, def: 2, xp: 20, tier: 0 },
    EnemyArchetype { name: "Pump Fiend", glyph: 'p', color: 0x66FF66, hp: 12, atk: 6, def: 1, xp: 22, tier: 1 },
    EnemyArchetype { name: "Whale Shade", glyph: 'w', color: 0x66FFFF, hp: 18, atk: 7, def: 3, xp: 34, tier: 1 },
    EnemyArchetype { name: "Sandwich Bot", glyph: 's', color: 0xFFCC66, hp: 20, atk: 8, def: 3, xp: 40, tier: 2 },
    EnemyArchetype { name: "Gas Leech", glyph: 'g', color: 0x33DDAA, hp: 16, atk: 9, def: 2, xp: 42, tier: 2 },
    EnemyArchetype { name: "MEV Wraith", glyph: 'm', color: 0xCC88FF, hp: 24, atk: 10, def: 4, xp: 55, tier: 3 },
    EnemyArchetype { name: "Flash Loaner", glyph: 'l', color: 0xFFFF66, hp: 28, atk: 12, def: 4, xp: 68, tier: 4 },
    EnemyArchetype { name: "Oracle Glitch", glyph: 'o', color: 0xFF66CC, hp: 32, atk: 13, def: 6, xp: 82, tier: 5 },
    EnemyArchetype { name: "Fork Hydra", glyph: 'h', color: 0xFF3333, hp: 38, atk: 15, def: 7, xp: 100, tier: 6 },
];

pub const MINI_BOSSES: &[EnemyArchetype] = &[
    EnemyArchetype { name: "Rug Baron", glyph: 'R', color: 0xFF4444, hp: 60, atk: 9, def: 4, xp: 120, tier: 0 },
    EnemyArchetype { name: "Pump Tyrant", glyph: 'T', color: 0x44FF44, hp: 64, atk: 8, def: 5, xp: 120, tier: 0 },
];

pub const BOSSES: &[EnemyArchetype] = &[
    EnemyArchetype { name: "The Liquidator", glyph: 'L', color: 0xFF2222, hp: 160, atk: 14, def: 7, xp: 400, tier: 0 },
    EnemyArchetype { name: "Genesis Warden", glyph: 'G', color: 0x22FFFF, hp: 170, atk: 13, def: 8, xp: 400, tier: 0 },
];

pub fn find_enemy_archetype(name: &str) -> Option<&'static EnemyArchetype> {
    ENEMIES.iter().chain(MINI_BOSSES).chain(BOSSES).find(|archetype| archetype.name == name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemArchetype {
    pub name: &'static str,
    pub glyph: char,
    pub color: Rgb,
    pub kind: ItemKind,
    pub amount: i32,
}

pub const ITEMS: &[ItemArchetype] = &[
    ItemArchetype { name: "Health Potion", glyph: '!', color: 0xFFFF66, kind: ItemKind::Heal, amount: 14 },
    ItemArchetype { name: "Gas Canister", glyph: '$', color: 0x00FFFF, kind: ItemKind::Gas, amount: 60 },
    ItemArchetype { name: "Attack Patch", glyph: '+', color: 0xFF66FF, kind: ItemKind::Atk, amount: 1 },
    ItemArchetype { name: "Defense Patch", glyph: '*', color: 0x66FFFF, kind: ItemKind::Def, amount: 1 },
    ItemArchetype { name: "Airdrop XP", glyph: '?', color: 0x99FF99, kind: ItemKind::Xp, amount: 40 },
];

pub fn item_archetype(kind: ItemKind) -> &'static ItemArchetype {
    match kind {
        ItemKind::Heal => &ITEMS[0],
        ItemKind::Gas => &ITEMS[1],
        ItemKind::Atk => &ITEMS[2],
        ItemKind::Def => &ITEMS[3],
        ItemKind::Xp => &ITEMS[4],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NpcArchetype {
    pub name: &'static str,
    pub glyph: char,
    pub color: Rgb,
    pub role: NpcRole,
    pub lines: &'static [&'static str],
}

pub const NPCS: &[NpcArchetype] = &[
    NpcArchetype {
        name: "Meme Lord",
        glyph: 'M',
        color: 0xFFFF99,
        role: NpcRole::Lore,
        lines: &["GM. Your bags are heavy.", "Diamond hands or NGMI.", "I sold the top (I didn't)."],
    },
    NpcArchetype {
        name: "Bagholder",
        glyph: 'B',
        color: 0xCCCCCC,
        role: NpcRole::Trader,
        lines: &[
            "It's not a loss if I don't sell.",
            "My portfolio is a museum.",
            "I trust the dev (I am the dev).",
        ],
    },
    NpcArchetype {
        name: "Ape Priest",
        glyph: 'A',
        color: 0x99FFFF,
        role: NpcRole::Buffer,
        lines: &["Ape together strong.", "Buy high, sell... never.", "WAGMI, but pay the gas."],
    },
];

pub fn find_npc_archetype(name: &str) -> Option<&'static NpcArchetype> {
    NPCS.iter().find(|archetype| archetype.name == name)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    #[default]
    SolidityDev,
    MemeDegenerate,
    RugSurvivor,
    WhaleApprentice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassProfile {
    pub name: &'static str,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub vision: i32,
    pub perk: &'static str,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 4] = [
        PlayerClass::SolidityDev,
        PlayerClass::MemeDegenerate,
        PlayerClass::RugSurvivor,
        PlayerClass::WhaleApprentice,
    ];

    pub fn profile(self) -> ClassProfile {
        match self {
            PlayerClass::SolidityDev => ClassProfile {
                name: "Solidity Dev",
                hp: 35,
                atk: 8,
                def: 4,
                vision: 12,
                perk: "Audit: +1 vision",
            },
            PlayerClass::MemeDegenerate => ClassProfile {
                name: "Meme Degenerate",
                hp: 28,
                atk: 10,
                def: 2,
                vision: 10,
                perk: "Pump: +20% XP sometimes",
            },
            PlayerClass::RugSurvivor => ClassProfile {
                name: "Rug Survivor",
                hp: 40,
                atk: 6,
                def: 5,
                vision: 11,
                perk: "Dodge: 15% chance to avoid damage",
            },
            PlayerClass::WhaleApprentice => ClassProfile {
                name: "Whale Apprentice",
                hp: 32,
                atk: 7,
                def: 4,
                vision: 11,
                perk: "Whale: start with 200 gas",
            },
        }
    }

    pub fn vision_bonus(self) -> i32 {
        i32::from(self == PlayerClass::SolidityDev)
    }

    pub fn dodges(self) -> bool {
        self == PlayerClass::RugSurvivor
    }

    pub fn pumps_xp(self) -> bool {
        self == PlayerClass::MemeDegenerate
    }

    pub fn is_whale(self) -> bool {
        self == PlayerClass::WhaleApprentice
    }
}

pub const FLOOR_NAMES: [&str; 5] = ["Meme Hell", "Pump Chasm", "Rug Depths", "FUD Abyss", "WAGMI Vault"];

pub fn floor_name(floor: u32) -> &'static str {
    FLOOR_NAMES[(floor.saturating_sub(1) as usize) % FLOOR_NAMES.len()]
}

pub const STORY_INTRO: [&str; 4] = [
    "2026. Dev, you got rugged again. Rugpull.eth 3.0 stole your life savings.",
    "A glitched wallet sucked you into the chain. Now you're in the Abyss.",
    "Reach the Genesis Block, rewrite tx#0 and escape with an immutable Lambo.",
    "GM degens. WAGMI if diamond hands. NGMI if paper hands.",
];
