use crate::env::EntityLocator;
use crate::geometry::DistanceMetric;
use crate::state::Position;

use super::calculator;
use super::result::AoeResult;

/// Tag identifying which shape produced an [`AoeResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AoeShape {
    Circle,
    Cone,
    Line,
    Cross,
    Ring,
    Chain,
}

/// A shape together with its parameters, as carried by a weapon or module.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaPattern {
    Circle {
        radius: i32,
        metric: DistanceMetric,
        falloff: bool,
    },
    Cone {
        length: i32,
        spread_degrees: f32,
        falloff: bool,
    },
    Line {
        length: i32,
        width: i32,
        extend: bool,
    },
    Cross {
        arm_length: i32,
        diagonals: bool,
        falloff: bool,
    },
    Ring {
        inner: i32,
        outer: i32,
    },
    Chain {
        max_jumps: u32,
        jump_range: i32,
    },
}

impl AreaPattern {
    pub fn shape(&self) -> AoeShape {
        match self {
            AreaPattern::Circle { .. } => AoeShape::Circle,
            AreaPattern::Cone { .. } => AoeShape::Cone,
            AreaPattern::Line { .. } => AoeShape::Line,
            AreaPattern::Cross { .. } => AoeShape::Cross,
            AreaPattern::Ring { .. } => AoeShape::Ring,
            AreaPattern::Chain { .. } => AoeShape::Chain,
        }
    }

    /// Whether the area is placed at the target rather than swept out from
    /// the attacker. Placed areas need a line of fire to their centre.
    pub fn is_placed(&self) -> bool {
        !matches!(self, AreaPattern::Cone { .. } | AreaPattern::Line { .. })
    }

    /// Computes the affected tiles for an attack fired from `origin` at
    /// `target`. Occupant flags are populated from `locator`.
    pub fn resolve(
        &self,
        origin: Position,
        target: Position,
        locator: &(impl EntityLocator + ?Sized),
    ) -> AoeResult {
        let mut result = match *self {
            AreaPattern::Circle {
                radius,
                metric,
                falloff,
            } => calculator::circle(target, radius, origin, metric, falloff),
            AreaPattern::Cone {
                length,
                spread_degrees,
                falloff,
            } => calculator::cone(origin, target, length, spread_degrees, falloff),
            AreaPattern::Line {
                length,
                width,
                extend,
            } => calculator::line(origin, target, length, width, extend),
            AreaPattern::Cross {
                arm_length,
                diagonals,
                falloff,
            } => calculator::cross(target, arm_length, origin, diagonals, falloff),
            AreaPattern::Ring { inner, outer } => calculator::ring(target, inner, outer, origin),
            AreaPattern::Chain {
                max_jumps,
                jump_range,
            } => calculator::chain(origin, target, max_jumps, jump_range, locator),
        };
        result.update_entity_info(locator);
        result
    }
}
