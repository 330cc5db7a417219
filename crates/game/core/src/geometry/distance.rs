use crate::state::Position;

/// Chebyshev distance: `max(|dx|, |dy|)`. A diagonal step counts as one.
#[inline]
pub fn chebyshev_distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Manhattan distance: `|dx| + |dy|`. A diagonal step counts as two.
#[inline]
pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Straight-line distance between tile centres.
#[inline]
pub fn euclidean_distance(a: Position, b: Position) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance rounded to the nearest whole tile.
#[inline]
pub fn euclidean_distance_rounded(a: Position, b: Position) -> i32 {
    euclidean_distance(a, b).round() as i32
}

/// Metric used by shape queries that accept a choice of distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// Square regions.
    #[default]
    Chebyshev,
    /// Diamond regions.
    Manhattan,
    /// Disc regions; distance truncated toward zero.
    Euclidean,
}

impl DistanceMetric {
    /// Integer distance under this metric.
    pub fn measure(self, a: Position, b: Position) -> i32 {
        match self {
            DistanceMetric::Chebyshev => chebyshev_distance(a, b),
            DistanceMetric::Manhattan => manhattan_distance(a, b),
            DistanceMetric::Euclidean => euclidean_distance(a, b) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn metrics_agree_on_cardinal_offsets() {
        let a = Position::new(2, 2);
        let b = Position::new(2, 7);
        assert_eq!(chebyshev_distance(a, b), 5);
        assert_eq!(manhattan_distance(a, b), 5);
        assert_eq!(euclidean_distance_rounded(a, b), 5);
    }

    #[test]
    fn diagonal_offsets_differ_by_metric() {
        let a = Position::ORIGIN;
        let b = Position::new(3, 3);
        assert_eq!(DistanceMetric::Chebyshev.measure(a, b), 3);
        assert_eq!(DistanceMetric::Manhattan.measure(a, b), 6);
        // sqrt(18) = 4.24
        assert_eq!(DistanceMetric::Euclidean.measure(a, b), 4);
        assert_eq!(euclidean_distance_rounded(a, b), 4);
    }

    proptest! {
        #[test]
        fn chebyshev_is_symmetric(ax in -50i32..50, ay in -50i32..50, bx in -50i32..50, by in -50i32..50) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(chebyshev_distance(a, b), chebyshev_distance(b, a));
        }

        #[test]
        fn chebyshev_never_exceeds_manhattan(ax in -50i32..50, ay in -50i32..50, bx in -50i32..50, by in -50i32..50) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert!(chebyshev_distance(a, b) <= manhattan_distance(a, b));
        }
    }
}
