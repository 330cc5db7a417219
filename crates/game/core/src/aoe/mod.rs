//! Area-of-effect geometry.
//!
//! Shape functions produce an [`AoeResult`]: the affected tiles with their
//! distance and damage multiplier. Occupant and blocking flags are filled by
//! separate passes ([`AoeResult::update_entity_info`],
//! [`AoeResult::update_blocking`]) so the calculator itself never iterates
//! world entities.

mod calculator;
mod falloff;
mod result;
mod shape;

pub use calculator::{chain, circle, cone, cross, line, ring};
pub use falloff::{MIN_FALLOFF, damage_with_falloff, linear_falloff};
pub use result::{AoeResult, AoeTile, TileFlags};
pub use shape::{AoeShape, AreaPattern};
