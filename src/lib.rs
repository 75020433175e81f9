pub mod agent;
pub mod config;
pub mod errors;
pub mod map;
pub mod pathfinding;
pub mod plugins;
pub mod resources;
pub mod terrain;
pub mod terrain_generation;
pub mod world;

// Selective re-exports for external consumers

// Plugins - the binary drives the world through these
pub use plugins::*;

pub use errors::{WayfinderError, WayfinderResult};

pub use map::{CellInfo, CellKind, TerrainData};
pub use pathfinding::{find_path, is_traversable};
pub use terrain::coordinates::GridCoord;
pub use world::{RouteStatus, WorldContext};

/// Generate a complete terrain for `seed` at the given size
pub fn generate_terrain(seed: u32, width: u32, height: u32) -> WayfinderResult<TerrainData> {
    terrain_generation::TerrainGenerator::new(seed).generate(width, height)
}
