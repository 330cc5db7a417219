use crate::geometry::euclidean_distance;
use crate::state::{Direction, Position};

/// Step offset that takes `from` furthest from `threat`.
///
/// All eight neighbours are considered, walkable ones only; ties resolve in
/// [`Direction::ALL`] order. Returns the zero offset when cornered.
pub fn flee_direction(
    from: Position,
    threat: Position,
    is_walkable: impl Fn(Position) -> bool,
) -> Position {
    let mut best: Option<(Position, f32)> = None;
    for dir in Direction::ALL {
        let step = dir.delta();
        let candidate = from + step;
        if !is_walkable(candidate) {
            continue;
        }
        let d = euclidean_distance(candidate, threat);
        if best.is_none_or(|(_, best_d)| d > best_d) {
            best = Some((step, d));
        }
    }
    best.map(|(step, _)| step).unwrap_or(Position::ORIGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_directly_away_in_open_ground() {
        let step = flee_direction(Position::new(5, 5), Position::new(4, 5), |_| true);
        // (6,4), (6,5), (6,6) tie on x; the diagonals are further.
        assert_eq!(step.x, 1);
        assert_ne!(step.y, 0);
    }

    #[test]
    fn cornered_returns_zero() {
        let step = flee_direction(Position::new(0, 0), Position::new(1, 1), |_| false);
        assert!(step.is_zero());
    }

    #[test]
    fn picks_best_walkable_when_retreat_is_blocked() {
        let from = Position::new(5, 5);
        let threat = Position::new(4, 5);
        let step = flee_direction(from, threat, |p| p.x <= 5);
        assert_eq!(step.x, 0);
        assert_ne!(step.y, 0);
    }
}
