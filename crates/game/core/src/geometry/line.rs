use crate::state::Position;

/// Integer Bresenham line from `from` to `to`, both endpoints included.
///
/// Every step advances the major axis by exactly one tile, so a line always
/// yields `chebyshev_distance(from, to) + 1` points. The iterator is `Clone`,
/// which makes it cheap to restart a trace from the beginning.
#[derive(Clone, Debug)]
pub struct Line {
    current: Position,
    end: Position,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Line {
    pub fn new(from: Position, to: Position) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        Self {
            current: from,
            end: to,
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let rx = (self.end.x - self.current.x).unsigned_abs();
        let ry = (self.end.y - self.current.y).unsigned_abs();
        rx.max(ry) as usize + 1
    }
}

impl Iterator for Line {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.done {
            return None;
        }

        let point = self.current;
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.current.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line {}

impl std::iter::FusedIterator for Line {}

/// Convenience wrapper collecting a [`Line`] into a vector.
pub fn line(from: Position, to: Position) -> Vec<Position> {
    Line::new(from, to).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::chebyshev_distance;

    #[test]
    fn includes_both_endpoints() {
        let pts = line(Position::new(0, 0), Position::new(3, 1));
        assert_eq!(pts.first(), Some(&Position::new(0, 0)));
        assert_eq!(pts.last(), Some(&Position::new(3, 1)));
    }

    #[test]
    fn single_point_for_identical_endpoints() {
        assert_eq!(line(Position::new(2, 2), Position::new(2, 2)), vec![
            Position::new(2, 2)
        ]);
    }

    #[test]
    fn diagonal_has_no_duplicate_steps() {
        let pts = line(Position::new(0, 0), Position::new(4, 4));
        assert_eq!(pts.len(), 5);
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(*p, Position::new(i as i32, i as i32));
        }
    }

    #[test]
    fn point_count_matches_chebyshev_distance() {
        let cases = [
            (Position::new(0, 0), Position::new(7, 2)),
            (Position::new(5, -3), Position::new(-2, 4)),
            (Position::new(1, 1), Position::new(1, -6)),
        ];
        for (a, b) in cases {
            let l = Line::new(a, b);
            assert_eq!(l.len(), chebyshev_distance(a, b) as usize + 1);
            assert_eq!(l.count(), chebyshev_distance(a, b) as usize + 1);
        }
    }

    #[test]
    fn consecutive_points_are_adjacent() {
        let pts = line(Position::new(-3, 2), Position::new(6, -1));
        for pair in pts.windows(2) {
            assert_eq!(chebyshev_distance(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn restart_by_clone_yields_same_trace() {
        let l = Line::new(Position::new(0, 0), Position::new(5, 3));
        let first: Vec<_> = l.clone().collect();
        let second: Vec<_> = l.collect();
        assert_eq!(first, second);
    }
}
