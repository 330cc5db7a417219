//! Damage calculation.

use crate::config::CombatTables;
use crate::env::RngOracle;

use super::weapon::{DamageType, WeaponStats};

/// Errors raised by combat math on malformed inputs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("invalid damage range: min {min} exceeds max {max}")]
    InvalidDamageRange { min: i32, max: i32 },
}

/// Protection on the receiving end of a hit.
///
/// An active shield takes the hit first and selects the shield column of the
/// damage-type table; otherwise plating selects the armor column. `armor` is
/// also subtracted flat from every hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Defense {
    pub armor: i32,
    pub shield: u32,
}

impl Defense {
    pub const NONE: Self = Self {
        armor: 0,
        shield: 0,
    };

    pub fn armored(armor: i32) -> Self {
        Self { armor, shield: 0 }
    }

    pub fn type_multiplier(&self, damage_type: DamageType) -> f32 {
        if self.shield > 0 {
            damage_type.vs_shield()
        } else if self.armor > 0 {
            damage_type.vs_armor()
        } else {
            damage_type.vs_unprotected()
        }
    }
}

/// Outcome of one damage roll.
///
/// `final_damage = max(min_damage, raw + critical_bonus + type_modifier - armor_reduction)`
/// for a hit; every field is zero for a miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    pub damage_type: DamageType,
    pub raw_damage: i32,
    pub armor_reduction: i32,
    /// Signed delta contributed by the damage-type table.
    pub type_modifier: i32,
    pub critical_bonus: i32,
    pub final_damage: i32,
    pub is_critical: bool,
}

impl DamageResult {
    /// The zero result of a missed attack.
    pub fn miss(damage_type: DamageType) -> Self {
        Self {
            damage_type,
            ..Self::default()
        }
    }

    pub fn is_miss(&self) -> bool {
        self.final_damage == 0
    }

    /// Human-readable lines for the non-zero terms.
    pub fn modifier_strings(&self) -> Vec<String> {
        if self.is_miss() {
            return vec!["Miss".to_string()];
        }
        let mut lines = vec![format!("Rolled {} {}", self.raw_damage, self.damage_type)];
        if self.is_critical {
            lines.push(format!("Critical hit: +{}", self.critical_bonus));
        }
        if self.type_modifier != 0 {
            lines.push(format!("{} vs defense: {:+}", self.damage_type, self.type_modifier));
        }
        if self.armor_reduction != 0 {
            lines.push(format!("Armor: -{}", self.armor_reduction));
        }
        lines.push(format!("Final damage: {}", self.final_damage));
        lines
    }
}

/// Calculate damage for a hit.
///
/// # Formula
///
/// ```text
/// raw      = uniform [min, max]
/// crit     = unit() < crit_chance / 100
/// boosted  = crit ? round(raw * crit_multiplier) : raw
/// typed    = round(boosted * type_multiplier(defense))
/// final    = max(min_damage, typed - armor)
/// ```
///
/// The damage roll is drawn before the critical roll.
pub fn calculate_damage(
    weapon: &WeaponStats,
    defense: &Defense,
    tables: &CombatTables,
    rng: &mut (impl RngOracle + ?Sized),
) -> Result<DamageResult, CombatError> {
    if weapon.min_damage > weapon.max_damage {
        return Err(CombatError::InvalidDamageRange {
            min: weapon.min_damage,
            max: weapon.max_damage,
        });
    }

    let raw = rng.range_inclusive(weapon.min_damage, weapon.max_damage);

    let is_critical = rng.unit() < weapon.crit_chance as f32 / 100.0;
    let boosted = if is_critical {
        (raw as f32 * weapon.crit_multiplier).round() as i32
    } else {
        raw
    };

    let typed = (boosted as f32 * defense.type_multiplier(weapon.damage_type)).round() as i32;
    let armor = defense.armor.max(0);

    Ok(DamageResult {
        damage_type: weapon.damage_type,
        raw_damage: raw,
        armor_reduction: armor,
        type_modifier: typed - boosted,
        critical_bonus: boosted - raw,
        final_damage: (typed - armor).max(tables.min_damage),
        is_critical,
    })
}
