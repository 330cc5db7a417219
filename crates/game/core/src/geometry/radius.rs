use crate::state::Position;

/// Row-major walk over the square `(2r+1)²` region around a centre.
#[derive(Clone, Debug)]
pub struct PositionsInRadius {
    center: Position,
    radius: i32,
    dx: i32,
    dy: i32,
}

impl Iterator for PositionsInRadius {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.radius < 0 || self.dy > self.radius {
            return None;
        }
        let p = self.center.offset(self.dx, self.dy);
        self.dx += 1;
        if self.dx > self.radius {
            self.dx = -self.radius;
            self.dy += 1;
        }
        Some(p)
    }
}

/// Every position with Chebyshev distance `<= radius` from `center`.
///
/// Order is row-major from the lowest `y`, stable for a given input. A
/// negative radius yields nothing.
pub fn positions_in_radius(center: Position, radius: i32) -> PositionsInRadius {
    PositionsInRadius {
        center,
        radius,
        dx: -radius,
        dy: -radius,
    }
}
