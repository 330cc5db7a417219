//! Hit chance calculation.
//!
//! # Formula
//!
//! ```text
//! base       = weapon.base_accuracy, or the table default when zero
//! range      = (threshold - distance) * bonus_per_tile   if distance < threshold
//! cover      = cover_penalty   if partial cover and the weapon does not ignore it
//! final      = clamp(base + range + cover + situational, min, max)
//! ```

use crate::config::CombatTables;
use crate::los::LineOfFireResult;

use super::weapon::WeaponStats;

/// Silhouette class of the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSize {
    Tiny,
    Small,
    #[default]
    Normal,
    Large,
    Huge,
}

impl TargetSize {
    pub const fn modifier(self) -> i32 {
        match self {
            TargetSize::Tiny => -30,
            TargetSize::Small => -10,
            TargetSize::Normal => 0,
            TargetSize::Large => 10,
            TargetSize::Huge => 30,
        }
    }
}

/// Transient condition of the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetState {
    #[default]
    Normal,
    Immobilized,
    Stunned,
    Evading,
}

impl TargetState {
    pub const fn modifier(self) -> i32 {
        match self {
            TargetState::Normal => 0,
            TargetState::Immobilized => 25,
            TargetState::Stunned => 15,
            TargetState::Evading => -15,
        }
    }
}

/// What the attacker did earlier this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackerMovement {
    #[default]
    Stationary,
    Moved,
    Sprinted,
}

impl AttackerMovement {
    pub const fn modifier(self) -> i32 {
        match self {
            AttackerMovement::Stationary => 0,
            AttackerMovement::Moved => -10,
            AttackerMovement::Sprinted => -25,
        }
    }
}

/// Situational inputs beyond weapon and line-of-fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccuracyModifiers {
    pub size: TargetSize,
    pub state: TargetState,
    pub movement: AttackerMovement,
    /// Flat bonus from weapon mods (scopes, stabilizers).
    pub weapon: i32,
    /// Flat bonus from attacker equipment (targeting computers).
    pub equipment: i32,
}

/// Itemized accuracy computation for UI display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccuracyBreakdown {
    pub base: i32,
    pub range_bonus: i32,
    pub cover_penalty: i32,
    pub size: i32,
    pub state: i32,
    pub movement: i32,
    pub weapon: i32,
    pub equipment: i32,
    /// Sum before clamping.
    pub raw: i32,
    pub final_accuracy: i32,
}

impl AccuracyBreakdown {
    pub fn was_clamped(&self) -> bool {
        self.raw != self.final_accuracy
    }

    /// Human-readable lines for every non-zero term, base first.
    pub fn modifier_strings(&self) -> Vec<String> {
        let mut lines = vec![format!("Base accuracy: {}%", self.base)];
        let terms = [
            ("Close range", self.range_bonus),
            ("Cover", self.cover_penalty),
            ("Target size", self.size),
            ("Target state", self.state),
            ("Movement", self.movement),
            ("Weapon", self.weapon),
            ("Equipment", self.equipment),
        ];
        for (label, value) in terms {
            if value != 0 {
                lines.push(format!("{label}: {value:+}%"));
            }
        }
        if self.was_clamped() {
            lines.push(format!("Clamped from {}%", self.raw));
        }
        lines.push(format!("Final: {}%", self.final_accuracy));
        lines
    }
}

fn base_accuracy(weapon: &WeaponStats, tables: &CombatTables) -> i32 {
    if weapon.base_accuracy == 0 {
        tables.default_accuracy
    } else {
        weapon.base_accuracy
    }
}

fn range_bonus(distance: i32, tables: &CombatTables) -> i32 {
    if distance < tables.close_range_threshold {
        (tables.close_range_threshold - distance) * tables.close_range_bonus_per_tile
    } else {
        0
    }
}

fn cover_penalty(weapon: &WeaponStats, line: &LineOfFireResult, tables: &CombatTables) -> i32 {
    if line.is_partial_cover() && !weapon.ignores_cover {
        tables.cover_penalty
    } else {
        0
    }
}

/// Base, range bonus and cover only, clamped to the table bounds.
pub fn calculate_simple(
    weapon: &WeaponStats,
    line: &LineOfFireResult,
    tables: &CombatTables,
) -> i32 {
    let raw = base_accuracy(weapon, tables)
        + range_bonus(line.distance, tables)
        + cover_penalty(weapon, line, tables);
    raw.clamp(tables.min_accuracy, tables.max_accuracy)
}

/// Full breakdown including situational modifiers.
pub fn calculate_accuracy(
    weapon: &WeaponStats,
    line: &LineOfFireResult,
    modifiers: &AccuracyModifiers,
    tables: &CombatTables,
) -> AccuracyBreakdown {
    let mut b = AccuracyBreakdown {
        base: base_accuracy(weapon, tables),
        range_bonus: range_bonus(line.distance, tables),
        cover_penalty: cover_penalty(weapon, line, tables),
        size: modifiers.size.modifier(),
        state: modifiers.state.modifier(),
        movement: modifiers.movement.modifier(),
        weapon: modifiers.weapon,
        equipment: modifiers.equipment,
        ..AccuracyBreakdown::default()
    };
    b.raw = b.base
        + b.range_bonus
        + b.cover_penalty
        + b.size
        + b.state
        + b.movement
        + b.weapon
        + b.equipment;
    b.final_accuracy = b.raw.clamp(tables.min_accuracy, tables.max_accuracy);
    b
}
