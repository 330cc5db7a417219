//! Deterministic simulation kernel for the ironclad tactics game.
//!
//! `ironclad-core` holds the pure, synchronous rules: grid geometry,
//! line-of-fire classification, A* pathfinding, area-of-effect shapes,
//! accuracy and damage math, and the energy-based turn scheduler. World
//! state is never owned here; terrain, occupancy, entity enumeration and
//! randomness arrive through the oracle traits in [`env`], so the same
//! functions serve the live runtime, targeting previews and tests.
pub mod aoe;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod geometry;
pub mod los;
pub mod path;
pub mod state;

pub use aoe::{AoeResult, AoeShape, AoeTile, AreaPattern, TileFlags, damage_with_falloff};
pub use combat::{
    AccuracyBreakdown, AccuracyModifiers, AttackResult, AttackerMovement, CombatError,
    DamageResult, DamageType, Defense, TargetSize, TargetState, WeaponStats, calculate_accuracy,
    calculate_damage, calculate_simple, resolve_attack, roll_to_hit,
};
pub use config::{CombatTables, GameConfig, PathConfig, SchedulerConfig};
pub use engine::{ActionCost, Scheduler, SchedulerEntry, SchedulerError, energy_per_tick};
pub use env::{
    EntityLocator, GridOracle, MapDimensions, OccupancyOracle, PcgRng, RngOracle, ScriptedRng,
    TerrainKind, TileGrid, Unoccupied,
};
pub use geometry::{DistanceMetric, chebyshev_distance, euclidean_distance, manhattan_distance};
pub use los::{FireStatus, LineOfFireResult};
pub use state::{Direction, EntityId, Position, ResourceMeter};
