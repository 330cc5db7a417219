use ironclad_core::{AoeShape, EntityId, Position};
use serde::Serialize;

use crate::ai::{AlertCause, AttackMode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TurnEvent {
    TurnStarted {
        turn: u64,
        tick: u64,
        actor: EntityId,
    },
    TurnEnded {
        turn: u64,
        actor: EntityId,
        /// Energy actually charged.
        energy: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CombatEvent {
    AttackResolved {
        attacker: EntityId,
        target: EntityId,
        mode: AttackMode,
        accuracy: i32,
        roll: u32,
        hit: bool,
        damage: i32,
        critical: bool,
        /// Portion of the damage soaked by shields.
        absorbed: u32,
    },
    AreaAttack {
        attacker: EntityId,
        center: Position,
        shape: AoeShape,
        tiles: usize,
        targets: Vec<EntityId>,
    },
    ActorDestroyed {
        actor: EntityId,
        by: EntityId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AiEvent {
    BehaviorExecuted {
        actor: EntityId,
        behavior: Option<String>,
        passed: Vec<String>,
        description: String,
        cost: u32,
    },
    AlertRaised {
        actor: EntityId,
        level: i32,
        cause: AlertCause,
    },
    CallForHelp {
        actor: EntityId,
        position: Position,
        responders: Vec<EntityId>,
    },
    AmbushSprung {
        actor: EntityId,
        target: EntityId,
    },
}
