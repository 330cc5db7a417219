//! Line-of-fire and line-of-sight classification.
//!
//! A shot is traced with the geometry kernel's Bresenham line; only interior
//! tiles are inspected, so actors standing on the endpoints never block
//! their own shot.

mod line_of_fire;

pub use line_of_fire::{
    FireStatus, LineOfFireResult, PARTIAL_COVER_PENALTY, check, check_target, check_with,
    distance, has_clear_path, has_clear_path_with,
};
