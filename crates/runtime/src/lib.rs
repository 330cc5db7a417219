//! Runtime orchestration for the turn-based tactics simulation.
//!
//! This crate wires the pure kernel in `ironclad-core` and the generic
//! selector in `ironclad-behavior` into a playable loop. Consumers embed
//! [`Runtime`] to drive turns, plug in an [`ActionProvider`] for the
//! player, and subscribe to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the turn driver and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`ai`] holds enemy memory, behaviors, the selector and archetype presets
//! - [`world`] owns actor state and the occupancy index
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] contains the channel-backed and scripted player providers
pub mod ai;
pub mod api;
pub mod config;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod world;

pub use ai::{BehaviorSelector, EnemyBrain, EnemyDebugInfo, EnemyMemory, presets};
pub use api::{ActionProvider, PlayerAction, Result, RuntimeError, WaitActionProvider};
pub use config::{AiConfig, RuntimeConfig};
pub use events::{AiEvent, CombatEvent, Event, EventBus, Topic, TurnEvent};
pub use providers::{ChannelPlayerProvider, PlayerHandle, ScriptedProvider};
pub use runtime::{RunSummary, Runtime, RuntimeBuilder, StopReason, TurnReport};
pub use world::{Actor, Faction, Loadout, World};
