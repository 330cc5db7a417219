//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! errors, the provider abstraction, and the player action vocabulary.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionProvider, PlayerAction, WaitActionProvider};
