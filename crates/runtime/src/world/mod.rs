//! Canonical actor state and the spatial index over it.
//!
//! The [`World`] owns every [`Actor`] and the [`EntityGrid`] occupancy index.
//! AI and combat code refer to actors by [`EntityId`](ironclad_core::EntityId)
//! and look them up here rather than holding references to each other.

mod actor;
mod grid;
mod registry;

pub use actor::{Actor, Faction, Loadout};
pub use grid::EntityGrid;
pub use registry::World;
