//! Runtime and AI configuration.
use std::env;

use ironclad_core::GameConfig;

/// Perception and selection parameters shared by every AI actor.
///
/// Per-behavior tuning (flee threshold, guard radius, ...) lives on the
/// behavior structs themselves; this holds what the selector and the
/// perception pass need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiConfig {
    /// Beyond this distance a calm enemy with no lead is not evaluated.
    pub early_exit_distance: i32,
    /// Alert level at or above which the early exit never applies.
    pub min_alert_for_evaluation: i32,
    /// Maximum Chebyshev distance at which the target can be seen.
    pub sight_range: i32,
    /// Turns an enemy keeps chasing a last-known position after losing sight.
    pub chase_persistence: u32,
    /// Investigation timer set when an ally calls for help.
    pub ally_alert_duration: u32,
    /// Alert lost per turn once the target has been out of view for longer
    /// than `chase_persistence`.
    pub alert_decay: i32,
}

impl AiConfig {
    pub const EARLY_EXIT_DISTANCE: i32 = 15;
    pub const MIN_ALERT_FOR_EVALUATION: i32 = 5;
    pub const SIGHT_RANGE: i32 = 12;
    pub const CHASE_PERSISTENCE: u32 = 5;
    pub const ALLY_ALERT_DURATION: u32 = 8;
    pub const ALERT_DECAY: i32 = 5;
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            early_exit_distance: Self::EARLY_EXIT_DISTANCE,
            min_alert_for_evaluation: Self::MIN_ALERT_FOR_EVALUATION,
            sight_range: Self::SIGHT_RANGE,
            chase_persistence: Self::CHASE_PERSISTENCE,
            ally_alert_duration: Self::ALLY_ALERT_DURATION,
            alert_decay: Self::ALERT_DECAY,
        }
    }
}

/// Runtime configuration shared across the orchestrator and AI.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub ai: AiConfig,
    /// Seed for the shared combat/AI random stream.
    pub seed: u64,
    /// Broadcast capacity per event topic.
    pub event_capacity: usize,
    /// Buffered player commands.
    pub input_buffer: usize,
    /// Stop after this many turns; `None` runs until the player falls.
    pub max_turns: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            ai: AiConfig::default(),
            seed: 0,
            event_capacity: 256,
            input_buffer: 16,
            max_turns: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `IRONCLAD_SEED` - RNG seed (default: 0)
    /// - `IRONCLAD_EVENT_CAPACITY` - per-topic event buffer (default: 256)
    /// - `IRONCLAD_INPUT_BUFFER` - player command buffer (default: 16)
    /// - `IRONCLAD_MAX_TURNS` - turn limit (default: unlimited)
    /// - `IRONCLAD_SIGHT_RANGE` - AI sight range in tiles (default: 12)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("IRONCLAD_SEED") {
            config.seed = seed;
        }
        if let Some(capacity) = read_env::<usize>("IRONCLAD_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }
        if let Some(buffer) = read_env::<usize>("IRONCLAD_INPUT_BUFFER") {
            config.input_buffer = buffer.max(1);
        }
        if let Some(turns) = read_env::<u64>("IRONCLAD_MAX_TURNS") {
            config.max_turns = Some(turns);
        }
        if let Some(range) = read_env::<i32>("IRONCLAD_SIGHT_RANGE") {
            config.ai.sight_range = range.max(0);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
