//! Enemy decision making.
//!
//! Each hostile owns an [`EnemyBrain`]: a [`BehaviorSelector`] over the
//! behaviors in [`behaviors`] plus its [`EnemyMemory`]. On its turn the
//! runtime builds a [`BehaviorContext`], lets the selector pick one
//! behavior, and applies the resulting [`AiAction`] and [`AiSignal`]s.

pub mod behaviors;
mod brain;
mod context;
mod debug;
mod memory;
pub mod presets;
mod selector;

pub use brain::EnemyBrain;
pub use context::{
    AiAction, AiSignal, AlertCause, AttackMode, BehaviorContext, SelfView, TargetView,
};
pub use debug::EnemyDebugInfo;
pub use memory::{ALLY_ALERT_BOOST, COUNTER_CAP, EnemyMemory, MAX_ALERT};
pub use selector::BehaviorSelector;
