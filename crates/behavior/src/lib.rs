//! Priority-ordered behavior selection for turn-based AI.
//!
//! Each AI actor owns a list of independently pluggable behaviors. Every turn
//! the list is scanned in ascending priority order and the first behavior
//! whose precondition holds executes and ends the scan.
//!
//! - **No delta time**: every evaluation completes immediately (turn-based semantics)
//! - **Generic context**: behaviors see whatever context type `C` the caller supplies
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all behaviors
//! - [`Outcome`]: Status, energy cost and description of an execution
//! - [`PrioritySelector`]: Lazily sorted behavior list with first-match execution
//! - Decorators: [`Reprioritized`], [`Guarded`]

pub mod behavior;
pub mod builder;
pub mod decorator;
pub mod outcome;
pub mod selector;
pub mod status;

pub use behavior::{Behavior, PriorityBand};
pub use builder::PrioritySelectorBuilder;
pub use decorator::{Guarded, Reprioritized};
pub use outcome::Outcome;
pub use selector::{PrioritySelector, Selection};
pub use status::Status;
