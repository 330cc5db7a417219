use crate::env::GridOracle;
use crate::geometry::{Line, chebyshev_distance};
use crate::state::Position;

/// Accuracy penalty applied when a shot passes over partial cover.
pub const PARTIAL_COVER_PENALTY: i32 = -20;

/// Classification of a traced shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FireStatus {
    Clear,
    /// The first cover tile along the trace.
    PartialCover { penalty: i32, at: Position },
    /// The first fully blocking tile along the trace.
    Blocked { at: Position },
    OutOfRange,
    NoTarget,
}

/// Result of a line-of-fire check.
///
/// `path` runs from the origin toward the target. It is complete for `Clear`
/// and `PartialCover`, ends on the blocking tile for `Blocked`, and is empty
/// for `OutOfRange` and `NoTarget`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineOfFireResult {
    pub status: FireStatus,
    pub distance: i32,
    pub accuracy_penalty: i32,
    pub path: Vec<Position>,
}

impl LineOfFireResult {
    fn new(status: FireStatus, distance: i32, path: Vec<Position>) -> Self {
        let accuracy_penalty = match status {
            FireStatus::PartialCover { penalty, .. } => penalty,
            _ => 0,
        };
        Self {
            status,
            distance,
            accuracy_penalty,
            path,
        }
    }

    pub fn no_target() -> Self {
        Self::new(FireStatus::NoTarget, 0, Vec::new())
    }

    pub fn is_clear(&self) -> bool {
        matches!(self.status, FireStatus::Clear)
    }

    pub fn is_partial_cover(&self) -> bool {
        matches!(self.status, FireStatus::PartialCover { .. })
    }

    /// True when a shot can be taken at all (clear or through cover).
    pub fn can_fire(&self) -> bool {
        matches!(
            self.status,
            FireStatus::Clear | FireStatus::PartialCover { .. }
        )
    }

    pub fn blocking_position(&self) -> Option<Position> {
        match self.status {
            FireStatus::Blocked { at } => Some(at),
            _ => None,
        }
    }
}

/// Chebyshev distance used for all range checks.
#[inline]
pub fn distance(a: Position, b: Position) -> i32 {
    chebyshev_distance(a, b)
}

/// Line-of-fire against a terrain oracle: solid non-cover tiles block,
/// cover tiles impose [`PARTIAL_COVER_PENALTY`].
pub fn check(
    grid: &(impl GridOracle + ?Sized),
    origin: Position,
    target: Position,
    max_range: i32,
) -> LineOfFireResult {
    check_with(
        origin,
        target,
        max_range,
        |p| grid.blocks_fire(p),
        |p| grid.provides_cover(p),
    )
}

/// As [`check`], returning `NoTarget` when there is nothing to shoot at.
pub fn check_target(
    grid: &(impl GridOracle + ?Sized),
    origin: Position,
    target: Option<Position>,
    max_range: i32,
) -> LineOfFireResult {
    match target {
        Some(target) => check(grid, origin, target, max_range),
        None => LineOfFireResult::no_target(),
    }
}

/// Line-of-fire with explicit predicates.
pub fn check_with(
    origin: Position,
    target: Position,
    max_range: i32,
    blocks: impl Fn(Position) -> bool,
    partial_cover: impl Fn(Position) -> bool,
) -> LineOfFireResult {
    if origin == target {
        return LineOfFireResult::new(FireStatus::Clear, 0, vec![origin]);
    }

    let dist = distance(origin, target);
    if dist > max_range {
        return LineOfFireResult::new(FireStatus::OutOfRange, dist, Vec::new());
    }

    let trace = Line::new(origin, target);
    let mut path = Vec::with_capacity(trace.len());
    let mut cover: Option<Position> = None;

    for point in trace {
        path.push(point);
        if point == origin || point == target {
            continue;
        }
        if blocks(point) {
            return LineOfFireResult::new(FireStatus::Blocked { at: point }, dist, path);
        }
        if cover.is_none() && partial_cover(point) {
            cover = Some(point);
        }
    }

    let status = match cover {
        Some(at) => FireStatus::PartialCover {
            penalty: PARTIAL_COVER_PENALTY,
            at,
        },
        None => FireStatus::Clear,
    };
    LineOfFireResult::new(status, dist, path)
}

/// Pure sight test: only opaque tiles matter, cover is ignored.
pub fn has_clear_path(grid: &(impl GridOracle + ?Sized), origin: Position, target: Position) -> bool {
    has_clear_path_with(origin, target, |p| grid.blocks_sight(p))
}

pub fn has_clear_path_with(
    origin: Position,
    target: Position,
    blocks: impl Fn(Position) -> bool,
) -> bool {
    Line::new(origin, target)
        .filter(|&p| p != origin && p != target)
        .all(|p| !blocks(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TileGrid;
    use proptest::prelude::*;

    #[test]
    fn open_ground_is_clear() {
        let grid = TileGrid::open(12, 3);
        let r = check(&grid, Position::new(0, 0), Position::new(5, 0), 10);
        assert_eq!(r.status, FireStatus::Clear);
        assert_eq!(r.distance, 5);
        assert_eq!(r.accuracy_penalty, 0);
        assert_eq!(r.path.len(), 6);
    }

    #[test]
    fn same_tile_is_clear_at_zero() {
        let grid = TileGrid::open(3, 3);
        let r = check(&grid, Position::new(1, 1), Position::new(1, 1), 0);
        assert!(r.is_clear());
        assert_eq!(r.distance, 0);
    }

    #[test]
    fn beyond_range_reports_distance() {
        let grid = TileGrid::open(20, 1);
        let r = check(&grid, Position::new(0, 0), Position::new(12, 0), 10);
        assert_eq!(r.status, FireStatus::OutOfRange);
        assert_eq!(r.distance, 12);
    }

    #[test]
    fn wall_blocks_at_first_hit_and_truncates_path() {
        let grid = TileGrid::from_ascii("..#.#.");
        let r = check(&grid, Position::new(0, 0), Position::new(5, 0), 10);
        assert_eq!(r.status, FireStatus::Blocked {
            at: Position::new(2, 0)
        });
        assert_eq!(r.path.last(), Some(&Position::new(2, 0)));
        assert_eq!(r.blocking_position(), Some(Position::new(2, 0)));
    }

    #[test]
    fn records_only_first_cover_tile() {
        let grid = TileGrid::from_ascii(".=.=..");
        let r = check(&grid, Position::new(0, 0), Position::new(5, 0), 10);
        assert_eq!(r.status, FireStatus::PartialCover {
            penalty: PARTIAL_COVER_PENALTY,
            at: Position::new(1, 0)
        });
        assert_eq!(r.accuracy_penalty, -20);
        assert!(r.can_fire());
    }

    #[test]
    fn wall_behind_cover_still_blocks() {
        let grid = TileGrid::from_ascii(".=#..");
        let r = check(&grid, Position::new(0, 0), Position::new(4, 0), 10);
        assert_eq!(r.blocking_position(), Some(Position::new(2, 0)));
    }

    #[test]
    fn endpoints_never_block() {
        let grid = TileGrid::from_ascii("#...#");
        let r = check(&grid, Position::new(0, 0), Position::new(4, 0), 10);
        assert!(r.is_clear());
    }

    #[test]
    fn missing_target_is_no_target() {
        let grid = TileGrid::open(2, 2);
        let r = check_target(&grid, Position::ORIGIN, None, 5);
        assert_eq!(r.status, FireStatus::NoTarget);
        assert!(!r.can_fire());
    }

    #[test]
    fn sight_ignores_cover_and_glass() {
        let grid = TileGrid::from_ascii(".=\".");
        assert!(has_clear_path(&grid, Position::new(0, 0), Position::new(3, 0)));
        let walled = TileGrid::from_ascii(".#.");
        assert!(!has_clear_path(&walled, Position::new(0, 0), Position::new(2, 0)));
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(ax in -30i32..30, ay in -30i32..30, bx in -30i32..30, by in -30i32..30) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(distance(a, b), distance(b, a));
        }
    }
}
