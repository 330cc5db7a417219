//! Tunable balance parameters and compile-time limits.
//!
//! Every number the kernel's formulas depend on lives here with its default,
//! so a balance pass touches one file.

/// Top-level bundle handed to the runtime.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub combat: CombatTables,
    pub scheduler: SchedulerConfig,
    pub path: PathConfig,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Accuracy and damage parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTables {
    /// Substituted when a weapon reports a base accuracy of zero.
    pub default_accuracy: i32,
    /// Shots at a distance strictly below this get a close-range bonus.
    pub close_range_threshold: i32,
    pub close_range_bonus_per_tile: i32,
    pub cover_penalty: i32,
    pub min_accuracy: i32,
    pub max_accuracy: i32,
    /// Floor applied after armor; a hit always does at least this much.
    pub min_damage: i32,
}

impl CombatTables {
    pub const DEFAULT_ACCURACY: i32 = 60;
    pub const CLOSE_RANGE_THRESHOLD: i32 = 6;
    pub const CLOSE_RANGE_BONUS_PER_TILE: i32 = 3;
    pub const COVER_PENALTY: i32 = -20;
    pub const MIN_ACCURACY: i32 = 5;
    pub const MAX_ACCURACY: i32 = 95;
    pub const MIN_DAMAGE: i32 = 1;
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            default_accuracy: Self::DEFAULT_ACCURACY,
            close_range_threshold: Self::CLOSE_RANGE_THRESHOLD,
            close_range_bonus_per_tile: Self::CLOSE_RANGE_BONUS_PER_TILE,
            cover_penalty: Self::COVER_PENALTY,
            min_accuracy: Self::MIN_ACCURACY,
            max_accuracy: Self::MAX_ACCURACY,
            min_damage: Self::MIN_DAMAGE,
        }
    }
}

/// Energy economy of the turn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Energy an entry must hold before it may act.
    pub action_threshold: i32,
    pub min_speed: i32,
    pub max_speed: i32,
    pub move_cost: i32,
    pub attack_cost: i32,
    pub wait_cost: i32,
    /// Ceiling on the energy a single turn can be charged.
    pub max_action_cost: i32,
}

impl SchedulerConfig {
    pub const ACTION_THRESHOLD: i32 = 100;
    pub const MIN_SPEED: i32 = 1;
    pub const MAX_SPEED: i32 = 400;
    pub const MOVE_COST: i32 = 100;
    pub const ATTACK_COST: i32 = 120;
    pub const WAIT_COST: i32 = 100;
    pub const MAX_ACTION_COST: i32 = 10_000;
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            action_threshold: Self::ACTION_THRESHOLD,
            min_speed: Self::MIN_SPEED,
            max_speed: Self::MAX_SPEED,
            move_cost: Self::MOVE_COST,
            attack_cost: Self::ATTACK_COST,
            wait_cost: Self::WAIT_COST,
            max_action_cost: Self::MAX_ACTION_COST,
        }
    }
}

/// Pathfinding limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConfig {
    /// Nodes expanded before A* gives up.
    pub max_iterations: usize,
}

impl PathConfig {
    pub const MAX_ITERATIONS: usize = 1000;
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::MAX_ITERATIONS,
        }
    }
}
