/// Lowest multiplier a falloff curve may produce at its edge.
pub const MIN_FALLOFF: f32 = 0.1;

/// `1 - distance / (max_distance + 1)`, floored at [`MIN_FALLOFF`].
///
/// Distance zero always yields exactly `1.0`.
pub fn linear_falloff(distance: i32, max_distance: i32) -> f32 {
    if distance <= 0 {
        return 1.0;
    }
    let raw = 1.0 - distance as f32 / (max_distance.max(0) + 1) as f32;
    raw.max(MIN_FALLOFF)
}

/// Scales `base` by `multiplier`, rounding to nearest, never below `min_damage`.
pub fn damage_with_falloff(base: i32, multiplier: f32, min_damage: i32) -> i32 {
    let scaled = (base as f32 * multiplier).round() as i32;
    scaled.max(min_damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_full_strength() {
        assert_eq!(linear_falloff(0, 3), 1.0);
    }

    #[test]
    fn edge_stays_positive() {
        assert!((linear_falloff(3, 3) - 0.25).abs() < 1e-6);
        assert_eq!(linear_falloff(50, 50), MIN_FALLOFF);
    }

    #[test]
    fn falloff_damage_rounds_and_floors() {
        assert_eq!(damage_with_falloff(10, 0.55, 1), 6);
        assert_eq!(damage_with_falloff(3, 0.1, 1), 1);
        assert_eq!(damage_with_falloff(0, 1.0, 1), 1);
    }
}
