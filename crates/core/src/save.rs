//! Versioned JSON save documents.
//!
//! A document carries the whole in-progress floor plus the player, the message
//! feed and meta progression. Version 4 documents (no facing, no stack
//! quantity, no NPC `used` flag, no checksum) still load; missing fields take
//! their serde defaults. Version 5 adds an optional SHA-256 checksum over the
//! canonical JSON of the payload.
//!
//! Decoding builds a complete [`Game`] before anything is replaced, so a
//! failed load never leaves a half-written world behind.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use slotmap::SlotMap;
use thiserror::Error;

use crate::content::find_enemy_archetype;
use crate::game::Game;
use crate::mapgen::progression::rescale_enemy;
use crate::rules::Rules;
use crate::state::{Enemy, FloorItem, GameState, Map, MessageLog, Meta, Npc, Player};
use crate::store::StoreError;
use crate::types::{EnemyKind, Message, Pos, RunStatus, Tile};

pub const SAVE_VERSION: u32 = 5;
pub const OLDEST_SUPPORTED_VERSION: u32 = 4;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save storage failed: {0}")]
    Storage(#[from] StoreError),
    #[error("save data could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unsupported save version {found} (expected 4 or 5)")]
    UnsupportedVersion { found: u32 },
    #[error("save checksum does not match its contents")]
    ChecksumMismatch,
    #[error("save data is inconsistent: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub turn: u64,
    pub floor: u32,
    #[serde(default)]
    pub status: RunStatus,
    pub map: Vec<String>,
    pub explored: Vec<Vec<bool>>,
    #[serde(default)]
    pub spawn: Option<Pos>,
    pub player: Player,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub items: Vec<FloorItem>,
    #[serde(default)]
    pub npcs: Vec<Npc>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub version: u32,
    #[serde(flatten)]
    pub payload: SavePayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

fn payload_checksum(payload: &SavePayload) -> Result<String, SaveError> {
    let canonical = serde_json::to_string(payload)?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(format!("{digest:064x}"))
}

impl SaveDocument {
    pub fn capture(game: &Game) -> Result<Self, SaveError> {
        let state = game.state();
        let payload = SavePayload {
            seed: game.seed(),
            turn: game.turn(),
            floor: state.floor,
            status: state.status,
            map: state.map.to_rows(),
            explored: state.map.explored_rows(),
            spawn: Some(state.spawn),
            player: state.player.clone(),
            enemies: state.enemies.values().cloned().collect(),
            items: state.items.values().cloned().collect(),
            npcs: state.npcs.values().cloned().collect(),
            messages: state.messages.to_vec(),
            meta: state.meta,
        };
        let checksum = Some(payload_checksum(&payload)?);
        Ok(Self { version: SAVE_VERSION, payload, checksum })
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses and checks a document without building a game from it.
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        if !(OLDEST_SUPPORTED_VERSION..=SAVE_VERSION).contains(&probe.version) {
            return Err(SaveError::UnsupportedVersion { found: probe.version });
        }
        let document: SaveDocument = serde_json::from_str(json)?;
        if let Some(expected) = &document.checksum {
            if *expected != payload_checksum(&document.payload)? {
                return Err(SaveError::ChecksumMismatch);
            }
        }
        Ok(document)
    }

    /// Builds the saved world under `rules`. Live bosses and mini-bosses are
    /// rescaled to the saved floor's curve; normal enemies load as written.
    pub fn restore(self, rules: &Rules) -> Result<Game, SaveError> {
        let SavePayload { seed, turn, floor, status, map, explored, spawn, player, enemies, items, npcs, messages, meta } =
            self.payload;
        if floor == 0 {
            return Err(SaveError::Invalid("floor must be at least 1".into()));
        }
        let map = Map::from_rows(&map, &explored)
            .ok_or_else(|| SaveError::Invalid("map rows and explored grid do not form a rectangle".into()))?;
        let stairs = single_stairs(&map)?;
        if !map.is_walkable(player.pos) {
            return Err(SaveError::Invalid(format!("player stands on a wall at {:?}", player.pos)));
        }

        let mut enemy_slots = SlotMap::with_key();
        for mut enemy in enemies {
            if enemy.is_alive() && enemy.kind != EnemyKind::Normal {
                if let Some(archetype) = find_enemy_archetype(&enemy.name) {
                    rescale_enemy(rules, &mut enemy, archetype, floor);
                }
            }
            enemy_slots.insert(enemy);
        }
        let mut item_slots = SlotMap::with_key();
        for item in items {
            item_slots.insert(item);
        }
        let mut npc_slots = SlotMap::with_key();
        for npc in npcs {
            npc_slots.insert(npc);
        }
        let mut log = MessageLog::new(rules.message_cap);
        log.replace(messages);

        let state = GameState {
            spawn: spawn.unwrap_or(player.pos),
            map,
            floor,
            stairs,
            player,
            enemies: enemy_slots,
            items: item_slots,
            npcs: npc_slots,
            status,
            messages: log,
            meta,
            inventory_open: false,
        };
        Ok(Game::restore(seed, turn, rules.clone(), state))
    }
}

fn single_stairs(map: &Map) -> Result<Pos, SaveError> {
    let mut stairs = map.positions().filter(|&pos| map.tile_at(pos) == Tile::Stairs);
    match (stairs.next(), stairs.next()) {
        (Some(pos), None) => Ok(pos),
        (None, _) => Err(SaveError::Invalid("map has no stairs".into())),
        (Some(_), Some(_)) => Err(SaveError::Invalid("map has more than one stairs tile".into())),
    }
}

pub fn encode(game: &Game) -> Result<String, SaveError> {
    SaveDocument::capture(game)?.to_json()
}

pub fn decode(json: &str, rules: &Rules) -> Result<Game, SaveError> {
    SaveDocument::from_json(json)?.restore(rules)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::content::{MINI_BOSSES, PlayerClass};
    use crate::mapgen::progression::spawn_enemy;

    fn sample_game() -> Game {
        Game::new_with_class(2024, &Rules::default(), PlayerClass::MemeDegenerate)
    }

    #[test]
    fn round_trip_reproduces_the_world() {
        let rules = Rules::default();
        let game = sample_game();
        let restored = decode(&encode(&game).unwrap(), &rules).unwrap();

        assert_eq!(restored.floor(), game.floor());
        assert_eq!(restored.player(), game.player());
        assert_eq!(restored.map(), game.map());
        assert_eq!(restored.state().stairs, game.state().stairs);
        let enemies = |g: &Game| g.enemies().map(|(_, enemy)| enemy.clone()).collect::<Vec<_>>();
        assert_eq!(enemies(&restored), enemies(&game));
        assert_eq!(restored.messages().to_vec(), game.messages().to_vec());
        assert_eq!(restored.snapshot_hash(), game.snapshot_hash());
    }

    #[test]
    fn unknown_versions_are_rejected() {
        let mut value: Value = serde_json::from_str(&encode(&sample_game()).unwrap()).unwrap();
        value["version"] = json!(3);
        let result = decode(&value.to_string(), &Rules::default());
        assert!(matches!(result, Err(SaveError::UnsupportedVersion { found: 3 })));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(decode("{not json", &Rules::default()), Err(SaveError::Decode(_))));
        assert!(matches!(decode("{\"floor\": 2}", &Rules::default()), Err(SaveError::Decode(_))));
    }

    #[test]
    fn tampering_breaks_the_checksum() {
        let mut value: Value = serde_json::from_str(&encode(&sample_game()).unwrap()).unwrap();
        value["player"]["gas"] = json!(9_999);
        let result = decode(&value.to_string(), &Rules::default());
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn legacy_documents_fill_in_defaults() {
        let mut value: Value = serde_json::from_str(&encode(&sample_game()).unwrap()).unwrap();
        value["version"] = json!(4);
        let object = value.as_object_mut().unwrap();
        object.remove("checksum");
        object.remove("spawn");
        object["player"].as_object_mut().unwrap().remove("facing");
        for npc in object["npcs"].as_array_mut().unwrap() {
            npc.as_object_mut().unwrap().remove("used");
        }
        for item in object["items"].as_array_mut().unwrap() {
            item["stack"].as_object_mut().unwrap().remove("quantity");
        }

        let restored = decode(&value.to_string(), &Rules::default()).unwrap();
        assert_eq!(restored.player().facing, Default::default());
        assert!(restored.items().all(|(_, item)| item.stack.quantity == 1));
        assert_eq!(restored.state().spawn, restored.player().pos);
    }

    #[test]
    fn maps_without_exactly_one_stairs_are_invalid() {
        let mut value: Value = serde_json::from_str(&encode(&sample_game()).unwrap()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("checksum");
        let rows: Vec<String> = object["map"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row.as_str().unwrap().replace('>', "."))
            .collect();
        object["map"] = json!(rows);
        let result = decode(&value.to_string(), &Rules::default());
        assert!(matches!(result, Err(SaveError::Invalid(_))));
    }

    #[test]
    fn loading_rescales_guardians_but_not_the_rank_and_file() {
        let rules = Rules::default();
        let game = sample_game();
        let mut document = SaveDocument::capture(&game).unwrap();
        document.checksum = None;
        document.payload.floor = 10;
        let mut guardian = spawn_enemy(&rules, &MINI_BOSSES[0], EnemyKind::MiniBoss, 1, Pos::new(2, 2));
        guardian.hp = guardian.maxhp / 2;
        let floor_one_maxhp = guardian.maxhp;
        document.payload.enemies = vec![guardian];

        let restored = document.restore(&rules).unwrap();
        let (_, loaded) = restored.enemies().next().unwrap();
        assert!(loaded.maxhp > floor_one_maxhp);
        assert!((loaded.hp * 2 - loaded.maxhp).abs() <= 2);
    }
}
