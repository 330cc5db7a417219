//! Canonical value types shared by every subsystem: identifiers, grid
//! positions, directions and resource meters.
mod common;

pub use common::{Direction, EntityId, Position, ResourceMeter};
