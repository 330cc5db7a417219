use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use arrayvec::ArrayVec;

use crate::config::PathConfig;
use crate::geometry::euclidean_distance;
use crate::state::{Direction, Position};

pub const STRAIGHT_STEP_COST: f32 = 1.0;
pub const DIAGONAL_STEP_COST: f32 = std::f32::consts::SQRT_2;

/// Entry in the A* open set.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    position: Position,
    f_cost: f32,
    /// Insertion order; equal-cost nodes pop first-in first-out.
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for a min-heap on f, then on seq.
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn neighbors(position: Position, allow_diagonal: bool) -> ArrayVec<(Position, f32), 8> {
    let mut out = ArrayVec::new();
    for dir in Direction::CARDINALS {
        out.push((position + dir.delta(), STRAIGHT_STEP_COST));
    }
    if allow_diagonal {
        for dir in Direction::DIAGONALS {
            out.push((position + dir.delta(), DIAGONAL_STEP_COST));
        }
    }
    out
}

/// Shortest path from `start` to `goal`, both inclusive.
///
/// Returns `Some(vec![start])` when `start == goal` and `None` when the goal
/// is not walkable, unreachable, or the search exceeds the default iteration
/// budget.
pub fn find_path(
    start: Position,
    goal: Position,
    is_walkable: impl Fn(Position) -> bool,
    allow_diagonal: bool,
) -> Option<Vec<Position>> {
    find_path_with_costs(start, goal, is_walkable, |_| 0.0, allow_diagonal)
}

/// A* where entering a tile costs its base step cost plus `extra_cost(tile)`.
///
/// A zero extra cost everywhere reproduces [`find_path`].
pub fn find_path_with_costs(
    start: Position,
    goal: Position,
    is_walkable: impl Fn(Position) -> bool,
    extra_cost: impl Fn(Position) -> f32,
    allow_diagonal: bool,
) -> Option<Vec<Position>> {
    find_path_bounded(
        start,
        goal,
        is_walkable,
        extra_cost,
        allow_diagonal,
        PathConfig::MAX_ITERATIONS,
    )
}

/// A* with an explicit iteration budget.
pub fn find_path_bounded(
    start: Position,
    goal: Position,
    is_walkable: impl Fn(Position) -> bool,
    extra_cost: impl Fn(Position) -> f32,
    allow_diagonal: bool,
    max_iterations: usize,
) -> Option<Vec<Position>> {
    if start == goal {
        return Some(vec![start]);
    }
    if !is_walkable(goal) {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_scores: HashMap<Position, f32> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0.0);
    open.push(OpenNode {
        position: start,
        f_cost: euclidean_distance(start, goal),
        seq,
    });

    let mut iterations = 0usize;
    while let Some(current) = open.pop() {
        if current.position == goal {
            return Some(reconstruct_path(&came_from, goal));
        }
        if !closed.insert(current.position) {
            continue;
        }

        iterations += 1;
        if iterations > max_iterations {
            return None;
        }

        let current_g = g_scores
            .get(&current.position)
            .copied()
            .unwrap_or(f32::INFINITY);

        for (next, step_cost) in neighbors(current.position, allow_diagonal) {
            if closed.contains(&next) || !is_walkable(next) {
                continue;
            }

            let tentative_g = current_g + step_cost + extra_cost(next).max(0.0);
            let known_g = g_scores.get(&next).copied().unwrap_or(f32::INFINITY);
            if tentative_g < known_g {
                came_from.insert(next, current.position);
                g_scores.insert(next, tentative_g);
                seq += 1;
                open.push(OpenNode {
                    position: next,
                    f_cost: tentative_g + euclidean_distance(next, goal),
                    seq,
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// The first step of the path toward `goal`, i.e. its second element.
pub fn next_step(
    start: Position,
    goal: Position,
    is_walkable: impl Fn(Position) -> bool,
    allow_diagonal: bool,
) -> Option<Position> {
    find_path(start, goal, is_walkable, allow_diagonal).and_then(|path| path.get(1).copied())
}

/// Movement cost of an existing path (straight 1, diagonal √2).
pub fn path_cost(path: &[Position]) -> f32 {
    path.windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            if d.x != 0 && d.y != 0 {
                DIAGONAL_STEP_COST
            } else {
                STRAIGHT_STEP_COST
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridOracle, TileGrid};
    use crate::geometry::{chebyshev_distance, manhattan_distance};
    use proptest::prelude::*;

    fn open(grid: &TileGrid) -> impl Fn(Position) -> bool + '_ {
        move |p| grid.is_walkable(p)
    }

    #[test]
    fn same_position_is_single_element() {
        let p = Position::new(3, 3);
        assert_eq!(find_path(p, p, |_| false, true), Some(vec![p]));
    }

    #[test]
    fn unwalkable_goal_returns_none() {
        let grid = TileGrid::from_ascii("..#");
        assert_eq!(
            find_path(Position::new(0, 0), Position::new(2, 0), open(&grid), true),
            None
        );
    }

    #[test]
    fn routes_around_wall_column() {
        let grid = TileGrid::from_ascii("..#..\n..#..\n..#..\n.....");
        let path = find_path(Position::new(0, 1), Position::new(4, 1), open(&grid), true)
            .expect("path around the wall");
        for blocked in [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)] {
            assert!(!path.contains(&blocked));
        }
        assert_eq!(path.first(), Some(&Position::new(0, 1)));
        assert_eq!(path.last(), Some(&Position::new(4, 1)));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let grid = TileGrid::from_ascii(".....\n.###.\n.#.#.\n.###.\n.....");
        assert_eq!(
            find_path(Position::new(0, 0), Position::new(2, 2), open(&grid), true),
            None
        );
    }

    #[test]
    fn iteration_budget_stops_search() {
        let grid = TileGrid::open(60, 60);
        let far = Position::new(59, 59);
        assert!(
            find_path_bounded(Position::ORIGIN, far, open(&grid), |_| 0.0, false, 5).is_none()
        );
        assert!(find_path(Position::ORIGIN, far, open(&grid), true).is_some());
    }

    #[test]
    fn hazard_costs_bend_the_route() {
        let grid = TileGrid::open(7, 3);
        let fire = |p: Position| if p.y == 1 && (2..=4).contains(&p.x) { 10.0 } else { 0.0 };
        let path = find_path_with_costs(
            Position::new(0, 1),
            Position::new(6, 1),
            open(&grid),
            fire,
            true,
        )
        .expect("path");
        assert!(path.iter().all(|p| fire(*p) == 0.0));
    }

    #[test]
    fn zero_extra_cost_matches_plain_search() {
        let grid = TileGrid::from_ascii(".....\n.##..\n...#.\n.....");
        let a = Position::new(0, 0);
        let b = Position::new(4, 2);
        let plain = find_path(a, b, open(&grid), true).expect("path");
        let costed = find_path_with_costs(a, b, open(&grid), |_| 0.0, true).expect("path");
        assert_eq!(plain.len(), costed.len());
    }

    #[test]
    fn next_step_is_second_element() {
        let grid = TileGrid::open(5, 5);
        let step = next_step(Position::new(0, 0), Position::new(3, 0), open(&grid), false);
        assert_eq!(step, Some(Position::new(1, 0)));
        assert_eq!(
            next_step(Position::new(1, 1), Position::new(1, 1), open(&grid), true),
            None
        );
    }

    #[test]
    fn path_cost_counts_diagonals() {
        let cost = path_cost(&[Position::new(0, 0), Position::new(1, 1), Position::new(2, 1)]);
        assert!((cost - (DIAGONAL_STEP_COST + 1.0)).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn open_ground_length_matches_metric(gx in 0i32..12, gy in 0i32..12) {
            let grid = TileGrid::open(12, 12);
            let start = Position::ORIGIN;
            let goal = Position::new(gx, gy);
            let diag = find_path(start, goal, open(&grid), true).expect("diag path");
            let card = find_path(start, goal, open(&grid), false).expect("card path");
            prop_assert_eq!(diag.len() as i32, chebyshev_distance(start, goal) + 1);
            prop_assert_eq!(card.len() as i32, manhattan_distance(start, goal) + 1);
            prop_assert!(diag.len() <= card.len());
        }
    }
}
