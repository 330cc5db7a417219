use std::collections::HashSet;
use std::f32::consts::PI;

use crate::env::EntityLocator;
use crate::geometry::{DistanceMetric, Line, chebyshev_distance, euclidean_distance};
use crate::state::{Direction, Position};

use super::falloff::linear_falloff;
use super::result::{AoeResult, AoeTile, TileFlags};
use super::shape::AoeShape;

fn multiplier(falloff: bool, distance: i32, max_distance: i32) -> f32 {
    if falloff {
        linear_falloff(distance, max_distance)
    } else {
        1.0
    }
}

/// Every tile within `radius` of `center` under `metric`.
///
/// Chebyshev gives a square, Manhattan a diamond, Euclidean a disc.
pub fn circle(
    center: Position,
    radius: i32,
    origin: Position,
    metric: DistanceMetric,
    falloff: bool,
) -> AoeResult {
    let mut result = AoeResult::new(AoeShape::Circle, center, origin, radius);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let p = center.offset(dx, dy);
            let d = metric.measure(center, p);
            if d > radius {
                continue;
            }
            let mut tile = AoeTile::new(p, d, multiplier(falloff, d, radius));
            if d == 0 {
                tile.flags.insert(TileFlags::CENTER);
            }
            result.push(tile);
        }
    }
    result
}

fn normalize_angle(mut a: f32) -> f32 {
    while a > PI {
        a -= 2.0 * PI;
    }
    while a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Wedge of tiles opening from `origin` toward `target`.
///
/// A tile is included when its bearing differs from the aim by at most half
/// the spread and its truncated Euclidean distance lies in `[1, length]`.
/// An aim with no direction (`origin == target`) yields no tiles.
pub fn cone(
    origin: Position,
    target: Position,
    length: i32,
    spread_degrees: f32,
    falloff: bool,
) -> AoeResult {
    let mut result = AoeResult::new(AoeShape::Cone, origin, origin, length);
    if origin == target || length < 1 {
        return result;
    }

    let aim = target - origin;
    let aim_angle = (aim.y as f32).atan2(aim.x as f32);
    let half_spread = spread_degrees.to_radians() / 2.0;

    for dy in -length..=length {
        for dx in -length..=length {
            if dx == 0 && dy == 0 {
                continue;
            }
            let p = origin.offset(dx, dy);
            let d = euclidean_distance(origin, p) as i32;
            if d < 1 || d > length {
                continue;
            }
            let bearing = (dy as f32).atan2(dx as f32);
            // Small epsilon keeps tiles lying exactly on the edge ray.
            if normalize_angle(bearing - aim_angle).abs() > half_spread + 1e-4 {
                continue;
            }
            result.push(AoeTile::new(p, d, multiplier(falloff, d, length)));
        }
    }
    result
}

/// Beam from `origin` toward `target`.
///
/// With `extend` the beam continues past the target until it is `length`
/// tiles long; otherwise it stops at the target (or at `length`, whichever
/// is shorter). Widths above one add parallel rows offset perpendicular to
/// the beam, alternating sides. The origin tile is never included.
pub fn line(origin: Position, target: Position, length: i32, width: i32, extend: bool) -> AoeResult {
    let mut result = AoeResult::new(AoeShape::Line, origin, origin, length);
    if origin == target || length < 1 {
        return result;
    }

    let aim = target - origin;
    let span = chebyshev_distance(origin, target);
    let end = if extend && span < length {
        let k = (length + span - 1) / span;
        Position::new(origin.x + aim.x * k, origin.y + aim.y * k)
    } else {
        target
    };

    let spine: Vec<Position> = Line::new(origin, end)
        .skip(1)
        .take(length as usize)
        .collect();

    let mut seen: HashSet<Position> = HashSet::new();
    seen.insert(origin);
    for &p in &spine {
        if seen.insert(p) {
            result.push(AoeTile::new(p, chebyshev_distance(origin, p), 1.0));
        }
    }

    if width > 1 {
        let len = euclidean_distance(origin, target);
        let (ux, uy) = (aim.x as f32 / len, aim.y as f32 / len);
        // Rotating (ux, uy) by +90° gives (-uy, ux); -90° is its negation.
        let (px, py) = (-uy, ux);
        for i in 1..width {
            let side = if i % 2 == 1 { 1.0 } else { -1.0 };
            let k = ((i + 1) / 2) as f32 * side;
            let shift = Position::new((px * k).round() as i32, (py * k).round() as i32);
            for &p in &spine {
                let q = p + shift;
                if seen.insert(q) {
                    result.push(AoeTile::new(q, chebyshev_distance(origin, q), 1.0));
                }
            }
        }
    }
    result
}

/// Plus-shaped (or star-shaped with `diagonals`) blast around `center`.
pub fn cross(
    center: Position,
    arm_length: i32,
    origin: Position,
    diagonals: bool,
    falloff: bool,
) -> AoeResult {
    let mut result = AoeResult::new(AoeShape::Cross, center, origin, arm_length);
    let mut c = AoeTile::new(center, 0, 1.0);
    c.flags.insert(TileFlags::CENTER);
    result.push(c);

    let dirs: &[Direction] = if diagonals {
        &Direction::ALL
    } else {
        &Direction::CARDINALS
    };
    for dir in dirs {
        let step = dir.delta();
        for i in 1..=arm_length {
            let p = Position::new(center.x + step.x * i, center.y + step.y * i);
            result.push(AoeTile::new(p, i, multiplier(falloff, i, arm_length)));
        }
    }
    result
}

/// Chebyshev annulus `inner <= d <= outer`. Reported distance is measured
/// from the inner edge.
pub fn ring(center: Position, inner: i32, outer: i32, origin: Position) -> AoeResult {
    let inner = inner.max(0);
    let mut result = AoeResult::new(AoeShape::Ring, center, origin, outer);
    for dy in -outer..=outer {
        for dx in -outer..=outer {
            let p = center.offset(dx, dy);
            let d = chebyshev_distance(center, p);
            if d < inner || d > outer {
                continue;
            }
            let mut tile = AoeTile::new(p, d - inner, 1.0);
            if d == 0 {
                tile.flags.insert(TileFlags::CENTER);
            }
            result.push(tile);
        }
    }
    result
}

/// Arc that hits the enemy at `first_target`, then greedily jumps to the
/// nearest not-yet-hit enemy within `jump_range`, for at most
/// `max_jumps - 1` further hops.
///
/// The reported distance of each tile is its hop index. If nobody stands on
/// `first_target` the arc grounds there and goes no further.
pub fn chain(
    origin: Position,
    first_target: Position,
    max_jumps: u32,
    jump_range: i32,
    locator: &(impl EntityLocator + ?Sized),
) -> AoeResult {
    let mut result = AoeResult::new(AoeShape::Chain, first_target, origin, jump_range);
    if max_jumps == 0 {
        return result;
    }

    let mut first = AoeTile::new(first_target, 0, 1.0);
    first.flags.insert(TileFlags::CENTER);
    result.push(first);

    let Some(first_id) = locator.enemy_at(first_target) else {
        return result;
    };

    let candidates = locator.enemies();
    let mut hit = vec![first_id];
    let mut current = first_target;

    for hop in 1..max_jumps {
        let next = candidates
            .iter()
            .filter(|(id, _)| !hit.contains(id))
            .map(|&(id, pos)| (id, pos, chebyshev_distance(current, pos)))
            .filter(|&(_, _, d)| d <= jump_range)
            .min_by_key(|&(_, _, d)| d);

        let Some((id, pos, _)) = next else {
            break;
        };
        hit.push(id);
        result.push(AoeTile::new(pos, hop as i32, 1.0));
        current = pos;
    }
    result
}
