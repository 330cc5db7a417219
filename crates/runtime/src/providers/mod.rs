//! [`ActionProvider`](crate::api::ActionProvider) implementations.

mod player;
mod scripted;

pub use player::{ChannelPlayerProvider, PlayerHandle};
pub use scripted::ScriptedProvider;
