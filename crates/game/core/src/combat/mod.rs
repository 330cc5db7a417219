//! Combat resolution system.
//!
//! Pure functions turning a weapon, a line-of-fire classification and a
//! defender's protection into an accuracy figure and a [`DamageResult`].
//! Randomness is drawn from an injected [`RngOracle`](crate::env::RngOracle)
//! so every roll is reproducible.
//!
//! # Core Functions
//!
//! - `calculate_simple` / `calculate_accuracy`: hit chance with itemized modifiers
//! - `roll_to_hit`: roll-under check
//! - `calculate_damage`: raw roll, critical, damage-type modifier, armor
//! - `resolve_attack`: complete attack (hit check + damage)

pub mod accuracy;
pub mod damage;
pub mod hit;
pub mod result;
pub mod weapon;

pub use accuracy::{
    AccuracyBreakdown, AccuracyModifiers, AttackerMovement, TargetSize, TargetState,
    calculate_accuracy, calculate_simple,
};
pub use damage::{CombatError, DamageResult, Defense, calculate_damage};
pub use hit::{HitRoll, roll_to_hit};
pub use result::{AttackResult, resolve_attack};
pub use weapon::{DamageType, WeaponStats};
