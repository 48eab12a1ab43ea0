//! Procedural floor generation split into layout, connectivity, progression and spawning.

pub mod model;
pub mod progression;

mod generator;
mod grid;
mod layout;
mod spawns;

pub use generator::MapGenerator;
pub use grid::flood_reachable;
pub use model::GeneratedFloor;
pub(crate) use spawns::roll_item;

use crate::rules::Rules;

pub fn generate_floor(run_seed: u64, floor: u32, rules: &Rules) -> GeneratedFloor {
    MapGenerator::new(run_seed, rules).generate(floor)
}
