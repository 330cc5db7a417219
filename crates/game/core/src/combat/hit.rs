//! Roll-under hit check.

use crate::env::RngOracle;

/// A single to-hit roll and its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRoll {
    pub roll: u32,
    pub accuracy: i32,
    pub hit: bool,
}

impl HitRoll {
    /// Draws a roll in `[0, 100)` and compares it against `accuracy`.
    pub fn roll(accuracy: i32, rng: &mut (impl RngOracle + ?Sized)) -> Self {
        let roll = rng.roll_percent();
        Self {
            roll,
            accuracy,
            hit: roll_to_hit(roll, accuracy),
        }
    }
}

/// Succeeds iff `roll` is strictly below `accuracy`. A roll equal to the
/// accuracy is a miss.
#[inline]
pub fn roll_to_hit(roll: u32, accuracy: i32) -> bool {
    (roll as i64) < accuracy as i64
}
