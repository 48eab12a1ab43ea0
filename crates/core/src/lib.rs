pub mod content;
pub mod game;
pub mod mapgen;
pub mod rng;
pub mod rules;
pub mod save;
pub mod session;
pub mod state;
pub mod store;
pub mod types;

pub use content::PlayerClass;
pub use game::{Game, mitigated_damage};
pub use mapgen::{GeneratedFloor, MapGenerator, generate_floor};
pub use rules::Rules;
pub use save::{SAVE_VERSION, SaveDocument, SaveError};
pub use session::Session;
pub use state::{GameState, Map, MessageLog, Meta, Player};
pub use store::{MemoryStore, SaveStore, StoreError};
pub use types::*;
