//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own save encoding.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u32(self.state.floor);
        hasher.write_u8(match self.state.status {
            RunStatus::Playing => 0,
            RunStatus::GameOver => 1,
            RunStatus::Won => 2,
        });

        let player = &self.state.player;
        hasher.write_i32(player.pos.x);
        hasher.write_i32(player.pos.y);
        for stat in [player.hp, player.maxhp, player.atk, player.def, player.vision, player.gas, player.rep] {
            hasher.write_i32(stat);
        }
        hasher.write_u32(player.level);
        hasher.write_u32(player.xp);
        hasher.write_u32(player.xp_next);
        hasher.write_u32(player.item_units());

        for (_, enemy) in self.state.live_enemies() {
            hasher.write_i32(enemy.pos.x);
            hasher.write_i32(enemy.pos.y);
            hasher.write_i32(enemy.hp);
            hasher.write_u8(u8::from(enemy.aggro));
        }
        for (_, npc) in &self.state.npcs {
            hasher.write_i32(npc.pos.x);
            hasher.write_i32(npc.pos.y);
        }
        for row in self.state.map.to_rows() {
            hasher.write(row.as_bytes());
        }
        hasher.finish()
    }
}
