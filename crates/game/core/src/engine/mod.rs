//! Energy-based turn scheduling.
//!
//! The [`Scheduler`] decides who acts next; it owns nothing but per-actor
//! energy counters. Actors live in the runtime's world registry and are
//! referenced here by [`EntityId`](crate::state::EntityId) only.

mod cost;
mod errors;
mod turns;

pub use cost::{ActionCost, energy_per_tick};
pub use errors::SchedulerError;
pub use turns::{Scheduler, SchedulerEntry};
