//! High-level runtime orchestrator.
//!
//! The runtime owns the world, the turn scheduler, every enemy brain and
//! the shared random stream. Each [`Runtime::step`] grants exactly one turn:
//! the player's comes from the injected [`ActionProvider`], an enemy's from
//! its behavior selector. Decisions are pure; only this module mutates the
//! world, so at most one actor changes shared state at a time.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use ironclad_core::{
    AccuracyModifiers, ActionCost, AreaPattern, EntityId, GridOracle, PcgRng, Position,
    Scheduler, SchedulerError, calculate_accuracy, calculate_damage, chebyshev_distance,
    damage_with_falloff, los, resolve_attack,
};
use tokio::sync::broadcast;

use crate::ai::{
    AiAction, AiSignal, AttackMode, BehaviorContext, EnemyBrain, EnemyDebugInfo, EnemyMemory,
    SelfView, TargetView,
};
use crate::api::{ActionProvider, PlayerAction, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{AiEvent, CombatEvent, Event, EventBus, Topic, TurnEvent};
use crate::world::{Actor, World};

/// Noise an action makes, as heard by enemies on their next turn.
mod noise {
    pub const QUIET: i32 = 0;
    pub const MOVE: i32 = 30;
    pub const MELEE: i32 = 60;
    pub const RANGED: i32 = 80;
    pub const AREA: i32 = 100;
}

/// What a single [`Runtime::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub actor: EntityId,
    pub cost: ActionCost,
    /// Energy actually charged by the scheduler.
    pub energy: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    PlayerDestroyed,
    HostilesCleared,
    TurnLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub turns: u64,
    pub reason: StopReason,
}

/// Main runtime that drives the simulation turn by turn.
pub struct Runtime {
    config: RuntimeConfig,
    world: World,
    scheduler: Scheduler,
    brains: HashMap<EntityId, EnemyBrain>,
    rng: PcgRng,
    events: EventBus,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl Runtime {
    /// Create a new runtime builder over the given terrain.
    pub fn builder(grid: impl GridOracle + 'static) -> RuntimeBuilder {
        RuntimeBuilder::new(Arc::new(grid))
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn turn_number(&self) -> u64 {
        self.scheduler.turn_number()
    }

    /// Scheduler dump for logs and debug overlays.
    pub fn debug_state(&self) -> String {
        self.scheduler.debug_state()
    }

    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    pub fn memory(&self, id: EntityId) -> Option<&EnemyMemory> {
        self.brains.get(&id).map(|brain| &brain.memory)
    }

    pub fn enemy_debug(&mut self, id: EntityId) -> Option<EnemyDebugInfo> {
        self.brains.get_mut(&id).map(|brain| brain.debug_info(id))
    }

    /// Debug info for every living hostile, in id order.
    pub fn enemy_debug_all(&mut self) -> Vec<EnemyDebugInfo> {
        let ids: Vec<EntityId> = self.world.hostiles().map(|a| a.id).collect();
        ids.into_iter()
            .filter_map(|id| self.enemy_debug(id))
            .collect()
    }

    /// Adds a hostile mid-game and schedules it.
    pub fn spawn_enemy(&mut self, actor: Actor, brain: EnemyBrain) -> Result<EntityId> {
        let speed = actor.speed;
        let id = self.world.spawn(actor)?;
        self.scheduler.register(id, speed)?;
        self.brains.insert(id, brain);
        Ok(id)
    }

    /// Execute a single turn step.
    pub async fn step(&mut self) -> Result<TurnReport> {
        let world = &self.world;
        for gone in self.scheduler.prune_inactive(|id| world.is_active(id)) {
            tracing::debug!("Pruned inactive actor {} from the schedule", gone);
        }

        let actor = self.scheduler.next_actor().map_err(|e| match e {
            SchedulerError::NoActiveActors => RuntimeError::NoActiveActors,
            other => other.into(),
        })?;
        let turn = self.scheduler.turn_number();
        tracing::trace!("Turn {} granted to {}", turn, actor);
        self.events.publish(TurnEvent::TurnStarted {
            turn,
            tick: self.scheduler.ticks(),
            actor,
        });

        let cost = if actor.is_player() {
            self.player_turn(actor).await?
        } else {
            self.enemy_turn(actor)?
        };

        let energy = self.scheduler.end_turn(actor, cost)?;
        self.events.publish(TurnEvent::TurnEnded {
            turn,
            actor,
            energy,
        });

        Ok(TurnReport {
            turn,
            actor,
            cost,
            energy,
        })
    }

    /// Run until the player falls, every hostile is gone, or the configured
    /// turn limit is reached.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let mut turns = 0;
        loop {
            let reason = if self.world.player().is_none() {
                Some(StopReason::PlayerDestroyed)
            } else if self.world.hostiles().next().is_none() {
                Some(StopReason::HostilesCleared)
            } else if self.config.max_turns.is_some_and(|max| turns >= max) {
                Some(StopReason::TurnLimit)
            } else {
                None
            };
            if let Some(reason) = reason {
                tracing::info!("Run stopped after {} turns: {:?}", turns, reason);
                return Ok(RunSummary { turns, reason });
            }
            self.step().await?;
            turns += 1;
        }
    }

    // ------------------------------------------------------------------
    // Player turn
    // ------------------------------------------------------------------

    async fn player_turn(&mut self, actor: EntityId) -> Result<ActionCost> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;
        let action = provider.provide_action(actor, &self.world).await?;
        tracing::debug!("Player action: {:?}", action);

        match self.apply_player_action(actor, action) {
            Ok(cost) => Ok(cost),
            Err(RuntimeError::InvalidAction { actor, reason }) => {
                tracing::warn!("Rejected action for {}: {}; waiting instead", actor, reason);
                self.set_noise(actor, noise::QUIET);
                Ok(ActionCost::Wait)
            }
            Err(e) => Err(e),
        }
    }

    fn apply_player_action(&mut self, actor: EntityId, action: PlayerAction) -> Result<ActionCost> {
        match action {
            PlayerAction::Move(direction) => {
                let to = self.world.require(actor)?.position + direction.delta();
                if !self.world.move_actor(actor, to)? {
                    return Err(RuntimeError::invalid(actor, format!("{to} is blocked")));
                }
                self.set_noise(actor, noise::MOVE);
                Ok(ActionCost::Move)
            }
            PlayerAction::Attack(target) => {
                let attacker = self.world.require(actor)?;
                let defender = self.world.require(target)?;
                if !defender.is_alive() || defender.faction == attacker.faction {
                    return Err(RuntimeError::invalid(actor, format!("{target} is not a valid target")));
                }
                let mode = if chebyshev_distance(attacker.position, defender.position) <= 1 {
                    AttackMode::Melee
                } else {
                    AttackMode::Ranged
                };
                self.attack(actor, target, mode)?;
                Ok(ActionCost::Attack)
            }
            PlayerAction::AreaAttack { target, pattern } => {
                self.area_attack(actor, target, pattern)?;
                Ok(ActionCost::Attack)
            }
            PlayerAction::Wait => {
                self.set_noise(actor, noise::QUIET);
                Ok(ActionCost::Wait)
            }
            PlayerAction::Complete(cost) => Ok(cost),
        }
    }

    fn area_attack(&mut self, actor: EntityId, target: Position, pattern: AreaPattern) -> Result<()> {
        let attacker = self.world.require(actor)?;
        let origin = attacker.position;
        let weapon = attacker
            .loadout
            .ranged
            .ok_or_else(|| RuntimeError::invalid(actor, "no ranged weapon"))?;
        if chebyshev_distance(origin, target) > weapon.range {
            return Err(RuntimeError::invalid(actor, format!("{target} is out of range")));
        }
        if pattern.is_placed() {
            let line = los::check(self.world.grid(), origin, target, weapon.range);
            if !line.can_fire() {
                return Err(RuntimeError::invalid(
                    actor,
                    format!("no line of fire to {target}: {:?}", line.status),
                ));
            }
        }

        let mut area = pattern.resolve(origin, target, &self.world);
        area.update_blocking(self.world.grid());
        let victims: Vec<(EntityId, f32)> = area.affected().filter(|(id, _)| *id != actor).collect();

        let tables = self.config.game.combat;
        for &(victim, multiplier) in &victims {
            let defense = self.world.require(victim)?.defense();
            let roll = calculate_damage(&weapon, &defense, &tables, &mut self.rng)?;
            let damage = damage_with_falloff(roll.final_damage, multiplier, tables.min_damage);
            self.apply_damage(actor, victim, damage)?;
        }

        tracing::debug!(
            "{} area attack at {} hit {} of {} tiles",
            pattern.shape(),
            target,
            victims.len(),
            area.tile_count()
        );
        self.events.publish(CombatEvent::AreaAttack {
            attacker: actor,
            center: target,
            shape: pattern.shape(),
            tiles: area.tile_count(),
            targets: victims.iter().map(|(id, _)| *id).collect(),
        });
        self.set_noise(actor, noise::AREA);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Enemy turn
    // ------------------------------------------------------------------

    fn enemy_turn(&mut self, id: EntityId) -> Result<ActionCost> {
        let Some(mut brain) = self.brains.remove(&id) else {
            tracing::warn!("Hostile {} has no brain; waiting", id);
            return Ok(ActionCost::Wait);
        };
        let result = self.think_and_act(id, &mut brain);
        self.brains.insert(id, brain);
        result
    }

    fn think_and_act(&mut self, id: EntityId, brain: &mut EnemyBrain) -> Result<ActionCost> {
        let me = self.world.require(id)?.clone();

        brain.memory.on_turn_start();
        let target = self.perceive(&me, &mut brain.memory);

        let mut ctx = BehaviorContext::new(
            SelfView {
                id,
                position: me.position,
                health_percent: me.health_percent(),
                can_hear: me.can_hear,
                loadout: me.loadout,
            },
            target,
            mem::take(&mut brain.memory),
            self.rng,
            self.config.ai,
            self.config.game.scheduler,
            self.world.shared_grid(),
            self.world.shared_occupancy(),
        );
        let selection = brain.selector.evaluate(&mut ctx);
        let (action, signals, memory, rng) = ctx.finish();
        brain.memory = memory;
        self.rng = rng;
        brain.last_executed = selection.executed.clone();

        tracing::debug!(
            "{} [{}] -> {} ({}), passed {:?}",
            id,
            brain.archetype,
            selection.executed.as_deref().unwrap_or("Idle"),
            selection.outcome.description,
            selection.passed
        );
        self.events.publish(AiEvent::BehaviorExecuted {
            actor: id,
            behavior: selection.executed,
            passed: selection.passed,
            description: selection.outcome.description,
            cost: selection.outcome.cost,
        });

        self.apply_signals(id, me.position, signals);

        match action {
            Some(AiAction::Move(to)) => {
                if self.world.move_actor(id, to)? {
                    self.set_noise(id, noise::MOVE);
                } else {
                    tracing::warn!("{} could not move to {}", id, to);
                    brain.memory.invalidate_path();
                }
            }
            Some(AiAction::Attack { target, mode }) => match self.attack(id, target, mode) {
                Ok(()) => {}
                Err(RuntimeError::InvalidAction { reason, .. }) => {
                    tracing::warn!("{} attack on {} failed: {}", id, target, reason);
                }
                Err(e) => return Err(e),
            },
            Some(AiAction::Wait) | None => self.set_noise(id, noise::QUIET),
        }

        let cost = i32::try_from(selection.outcome.cost).unwrap_or(i32::MAX);
        Ok(ActionCost::Custom(cost))
    }

    /// Updates sight-related memory and describes the player as this enemy
    /// perceives it.
    fn perceive(&self, me: &Actor, memory: &mut EnemyMemory) -> Option<TargetView> {
        let Some(player) = self.world.player() else {
            memory.on_target_lost();
            return None;
        };
        let ai = &self.config.ai;
        let distance = chebyshev_distance(me.position, player.position);

        let visible = distance <= ai.sight_range
            && match memory.cached_sight(me.position, player.position) {
                Some(visible) => visible,
                None => {
                    let visible = los::has_clear_path(self.world.grid(), me.position, player.position);
                    memory.store_sight(me.position, player.position, visible);
                    visible
                }
            };

        if visible {
            memory.on_target_seen(player.position);
        } else {
            memory.on_target_lost();
            if memory.turns_since_target_seen > ai.chase_persistence {
                memory.lower_alert(ai.alert_decay);
            }
        }

        Some(TargetView {
            id: player.id,
            position: player.position,
            distance,
            visible,
            noise: player.noise,
        })
    }

    fn apply_signals(&mut self, caller: EntityId, from: Position, signals: Vec<AiSignal>) {
        for signal in signals {
            match signal {
                AiSignal::CallForHelp { position, radius } => {
                    let responders: Vec<EntityId> = self
                        .world
                        .hostiles()
                        .filter(|a| a.id != caller && chebyshev_distance(a.position, from) <= radius)
                        .map(|a| a.id)
                        .collect();
                    let duration = self.config.ai.ally_alert_duration;
                    for responder in &responders {
                        if let Some(brain) = self.brains.get_mut(responder) {
                            brain.memory.alert_to_position(position, duration);
                        }
                    }
                    tracing::info!("{} called for help; {} allies respond", caller, responders.len());
                    self.events.publish(AiEvent::CallForHelp {
                        actor: caller,
                        position,
                        responders,
                    });
                }
                AiSignal::AlertRaised { level, cause } => {
                    self.events.publish(AiEvent::AlertRaised {
                        actor: caller,
                        level,
                        cause,
                    });
                }
                AiSignal::AmbushSprung { target } => {
                    tracing::info!("{} sprang an ambush on {}", caller, target);
                    self.events.publish(AiEvent::AmbushSprung {
                        actor: caller,
                        target,
                    });
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    fn attack(&mut self, actor: EntityId, target: EntityId, mode: AttackMode) -> Result<()> {
        let attacker = self.world.require(actor)?;
        let defender = self.world.require(target)?;
        if !defender.is_alive() {
            return Err(RuntimeError::invalid(actor, format!("{target} is already down")));
        }
        let weapon = match mode {
            AttackMode::Melee => attacker.loadout.melee,
            AttackMode::Ranged => attacker
                .loadout
                .ranged
                .ok_or_else(|| RuntimeError::invalid(actor, "no ranged weapon"))?,
        };

        let line = los::check(self.world.grid(), attacker.position, defender.position, weapon.range);
        if !line.can_fire() {
            return Err(RuntimeError::invalid(
                actor,
                format!("no line of fire to {target}: {:?}", line.status),
            ));
        }

        let modifiers = AccuracyModifiers {
            size: defender.size,
            ..AccuracyModifiers::default()
        };
        let tables = self.config.game.combat;
        let accuracy = calculate_accuracy(&weapon, &line, &modifiers, &tables);
        let defense = defender.defense();
        let result = resolve_attack(&weapon, accuracy.final_accuracy, &defense, &tables, &mut self.rng)?;

        let absorbed = if result.is_hit() {
            self.apply_damage(actor, target, result.damage.final_damage)?
        } else {
            0
        };

        tracing::debug!(
            "{} {:?} attack on {}: roll {} vs {}% -> {}",
            actor,
            mode,
            target,
            result.hit.roll,
            accuracy.final_accuracy,
            if result.is_hit() {
                format!("{} damage", result.damage.final_damage)
            } else {
                "miss".to_string()
            }
        );
        self.events.publish(CombatEvent::AttackResolved {
            attacker: actor,
            target,
            mode,
            accuracy: accuracy.final_accuracy,
            roll: result.hit.roll,
            hit: result.is_hit(),
            damage: result.damage.final_damage,
            critical: result.damage.is_critical,
            absorbed,
        });
        self.set_noise(
            actor,
            match mode {
                AttackMode::Melee => noise::MELEE,
                AttackMode::Ranged => noise::RANGED,
            },
        );
        Ok(())
    }

    /// Applies `amount` to `target`, shields first. Returns what the shield
    /// absorbed.
    fn apply_damage(&mut self, attacker: EntityId, target: EntityId, amount: i32) -> Result<u32> {
        let from = self.world.require(attacker)?.position;
        let victim = self
            .world
            .actor_mut(target)
            .ok_or(RuntimeError::ActorNotFound(target))?;
        let (absorbed, _) = victim.take_damage(amount);
        let destroyed = !victim.is_alive();

        if let Some(brain) = self.brains.get_mut(&target) {
            brain.memory.on_damaged(from);
        }

        if destroyed {
            self.world.remove_from_play(target)?;
            if self.scheduler.is_registered(target) {
                self.scheduler.unregister(target)?;
            }
            tracing::info!("{} destroyed by {}", target, attacker);
            self.events.publish(CombatEvent::ActorDestroyed {
                actor: target,
                by: attacker,
            });
        }
        Ok(absorbed)
    }

    fn set_noise(&mut self, id: EntityId, level: i32) {
        if let Some(actor) = self.world.actor_mut(id) {
            actor.noise = level;
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: World,
    player_provider: Option<Box<dyn ActionProvider>>,
    pending: Vec<(Actor, Option<EnemyBrain>)>,
}

impl RuntimeBuilder {
    fn new(grid: Arc<dyn GridOracle>) -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: World::from_shared(grid),
            player_provider: None,
            pending: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player(mut self, actor: Actor) -> Self {
        self.pending.push((actor, None));
        self
    }

    /// Adds a hostile. Give it [`EntityId`]s from 1 upward, or use
    /// [`RuntimeBuilder::next_enemy_id`].
    pub fn enemy(mut self, actor: Actor, brain: EnemyBrain) -> Self {
        self.pending.push((actor, Some(brain)));
        self
    }

    /// First hostile id not yet handed out by this builder.
    pub fn next_enemy_id(&self) -> EntityId {
        let highest = self
            .pending
            .iter()
            .map(|(a, _)| a.id.0)
            .max()
            .unwrap_or(EntityId::PLAYER.0);
        EntityId(highest + 1)
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Spawns every actor and registers it with the scheduler in spawn order.
    pub fn build(self) -> Result<Runtime> {
        let Self {
            config,
            mut world,
            player_provider,
            pending,
        } = self;

        let mut brains = HashMap::new();
        let mut scheduler = Scheduler::new(config.game.scheduler);
        for (actor, brain) in pending {
            let speed = actor.speed;
            let id = world.spawn(actor)?;
            scheduler.register(id, speed)?;
            if let Some(brain) = brain {
                brains.insert(id, brain);
            }
        }

        tracing::info!(
            "Runtime ready: {} actors, seed {}",
            scheduler.len(),
            config.seed
        );

        Ok(Runtime {
            rng: PcgRng::seeded(config.seed),
            events: EventBus::with_capacity(config.event_capacity),
            world,
            scheduler,
            brains,
            player_provider,
            config,
        })
    }
}
