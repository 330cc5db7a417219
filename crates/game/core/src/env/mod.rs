//! Traits describing the world as the simulation kernel sees it.
//!
//! Oracles expose terrain, occupancy, entity enumeration and randomness. The
//! kernel never owns world state; callers inject these collaborators so the
//! same algorithms serve the live game, previews and tests.
mod map;
mod occupancy;
mod rng;

pub use map::{GridOracle, MapDimensions, TerrainKind, TileGrid};
pub use occupancy::{EntityLocator, OccupancyOracle, Unoccupied};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
