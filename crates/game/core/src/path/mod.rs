//! Grid pathfinding.
//!
//! A* with Euclidean heuristic over a caller-supplied walkability predicate,
//! plus the flee-direction helper used by retreating AI. Absence of a path is
//! a normal outcome (`None`), never an error.

mod astar;
mod flee;

pub use astar::{
    DIAGONAL_STEP_COST, STRAIGHT_STEP_COST, find_path, find_path_bounded, find_path_with_costs,
    next_step, path_cost,
};
pub use flee::flee_direction;
