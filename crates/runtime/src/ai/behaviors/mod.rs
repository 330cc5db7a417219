//! Concrete enemy behaviors.
//!
//! Every behavior is an independent [`Behavior<BehaviorContext>`]; the
//! preset builders decide which ones an archetype carries and at which
//! priority. Defaults place each behavior in its conventional band:
//!
//! | Behavior | Default priority |
//! |---|---|
//! | [`Flee`] | 0 |
//! | [`Ambush`] | 10 |
//! | [`CallForHelp`] | 20 |
//! | [`MeleeAttack`] | 25 |
//! | [`RangedAttack`] | 30 |
//! | [`Guard`] | 38 |
//! | [`AlertOnNoise`] | 40 |
//! | [`Chase`] | 45 |
//! | [`Investigate`] | 60 |
//! | [`Patrol`] | 80 |
//! | [`Wander`] | 95 |
//!
//! [`Behavior<BehaviorContext>`]: ironclad_behavior::Behavior
//! [`BehaviorContext`]: super::BehaviorContext

mod awareness;
mod combat;
mod guard;
mod movement;
mod patrol;

pub use awareness::{AlertOnNoise, Ambush, Investigate};
pub use combat::{CallForHelp, MeleeAttack, RangedAttack};
pub use guard::Guard;
pub use movement::{Chase, Flee};
pub use patrol::{Patrol, PatrolMode, Wander};
