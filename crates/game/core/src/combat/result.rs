//! Attack resolution.

use crate::config::CombatTables;
use crate::env::RngOracle;

use super::damage::{CombatError, DamageResult, Defense, calculate_damage};
use super::hit::HitRoll;
use super::weapon::WeaponStats;

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub hit: HitRoll,
    /// Zero result when the attack missed.
    pub damage: DamageResult,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        self.hit.hit
    }
}

/// Resolve a complete attack sequence (hit check + damage calculation).
///
/// `accuracy` is the already-computed hit chance, normally from
/// [`calculate_simple`](super::calculate_simple) or
/// [`calculate_accuracy`](super::calculate_accuracy). A miss consumes only
/// the to-hit roll.
pub fn resolve_attack(
    weapon: &WeaponStats,
    accuracy: i32,
    defense: &Defense,
    tables: &CombatTables,
    rng: &mut (impl RngOracle + ?Sized),
) -> Result<AttackResult, CombatError> {
    let hit = HitRoll::roll(accuracy, rng);
    if !hit.hit {
        return Ok(AttackResult {
            hit,
            damage: DamageResult::miss(weapon.damage_type),
        });
    }

    let damage = calculate_damage(weapon, defense, tables, rng)?;
    Ok(AttackResult { hit, damage })
}
