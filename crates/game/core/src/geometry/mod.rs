//! Geometry kernel: integer line tracing, distance metrics and radius
//! enumeration.
//!
//! Everything here is a pure function of its inputs. Higher layers
//! (line-of-fire, pathfinding, area-of-effect) build on these primitives and
//! never re-implement them.

mod distance;
mod line;
mod radius;

pub use distance::{
    DistanceMetric, chebyshev_distance, euclidean_distance, euclidean_distance_rounded,
    manhattan_distance,
};
pub use line::{Line, line};
pub use radius::{PositionsInRadius, positions_in_radius};
