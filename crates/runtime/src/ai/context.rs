//! Per-evaluation view handed to behaviors.
//!
//! A [`BehaviorContext`] is built fresh for every AI turn and dropped once
//! the decision has been applied. It owns the acting enemy's memory for the
//! duration (moved out of and back into the brain), holds shared read-only
//! views of terrain and occupancy, and collects the decision as an
//! [`AiAction`] plus any [`AiSignal`]s for the runtime to apply. Behaviors
//! never touch the world directly.

use std::sync::Arc;

use ironclad_behavior::{Outcome, Status};
use ironclad_core::{
    Direction, EntityId, GridOracle, LineOfFireResult, OccupancyOracle, PcgRng, Position,
    SchedulerConfig, chebyshev_distance, los, path,
};
use serde::Serialize;

use super::memory::EnemyMemory;
use crate::config::AiConfig;
use crate::world::{EntityGrid, Loadout};

/// The acting enemy, as of the start of its turn.
#[derive(Clone, Debug)]
pub struct SelfView {
    pub id: EntityId,
    pub position: Position,
    pub health_percent: u32,
    pub can_hear: bool,
    pub loadout: Loadout,
}

/// The enemy's target (the player), as perceived this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetView {
    pub id: EntityId,
    pub position: Position,
    pub distance: i32,
    pub visible: bool,
    /// Noise of the target's last action, 0-100.
    pub noise: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AttackMode {
    Melee,
    Ranged,
}

/// The single world-changing decision of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AiAction {
    Move(Position),
    Attack { target: EntityId, mode: AttackMode },
    Wait,
}

/// Side effects for the runtime to broadcast or apply to other actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AiSignal {
    AlertRaised { level: i32, cause: AlertCause },
    /// Allies within `radius` should investigate `position`.
    CallForHelp { position: Position, radius: i32 },
    AmbushSprung { target: EntityId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AlertCause {
    Noise,
    Ambush,
    Ally,
    Damage,
}

pub struct BehaviorContext {
    pub me: SelfView,
    pub target: Option<TargetView>,
    pub memory: EnemyMemory,
    pub rng: PcgRng,
    pub ai: AiConfig,
    pub costs: SchedulerConfig,
    grid: Arc<dyn GridOracle>,
    occupancy: Arc<EntityGrid>,
    action: Option<AiAction>,
    signals: Vec<AiSignal>,
}

impl BehaviorContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        me: SelfView,
        target: Option<TargetView>,
        memory: EnemyMemory,
        rng: PcgRng,
        ai: AiConfig,
        costs: SchedulerConfig,
        grid: Arc<dyn GridOracle>,
        occupancy: Arc<EntityGrid>,
    ) -> Self {
        Self {
            me,
            target,
            memory,
            rng,
            ai,
            costs,
            grid,
            occupancy,
            action: None,
            signals: Vec::new(),
        }
    }

    pub fn grid(&self) -> &dyn GridOracle {
        self.grid.as_ref()
    }

    // ------------------------------------------------------------------
    // Perception helpers
    // ------------------------------------------------------------------

    pub fn target_visible(&self) -> bool {
        self.target.is_some_and(|t| t.visible)
    }

    pub fn target_distance(&self) -> Option<i32> {
        self.target.map(|t| t.distance)
    }

    pub fn distance_to(&self, position: Position) -> i32 {
        chebyshev_distance(self.me.position, position)
    }

    /// Walkable and not held by anyone but the acting enemy.
    pub fn is_free(&self, position: Position) -> bool {
        self.grid.is_walkable(position)
            && !self.occupancy.is_occupied_by_other(position, self.me.id)
    }

    pub fn line_of_fire(&self, target: Position, range: i32) -> LineOfFireResult {
        los::check(self.grid(), self.me.position, target, range)
    }

    /// Free neighbouring tiles in compass order.
    pub fn free_neighbors(&self) -> Vec<Position> {
        Direction::ALL
            .iter()
            .map(|d| self.me.position + d.delta())
            .filter(|&p| self.is_free(p))
            .collect()
    }

    // ------------------------------------------------------------------
    // Movement planning
    // ------------------------------------------------------------------

    /// Next tile toward `destination`, preferring the cached route, then a
    /// fresh A* route, then a greedy step. `None` when already there or no
    /// free step makes progress.
    ///
    /// A returned step is assumed to be taken: the route cache is advanced.
    pub fn step_toward(&mut self, destination: Position) -> Option<Position> {
        let here = self.me.position;
        if here == destination {
            return None;
        }

        if let Some(step) = self.memory.cached_step(here, destination) {
            if self.is_free(step) {
                self.memory.consume_step();
                return Some(step);
            }
            self.memory.invalidate_path();
        }

        let route = path::find_path(
            here,
            destination,
            |p| p == destination && self.grid.is_walkable(p) || self.is_free(p),
            true,
        );
        if let Some(route) = route {
            if let Some(&step) = route.get(1)
                && self.is_free(step)
            {
                self.memory.store_path(destination, route);
                self.memory.consume_step();
                return Some(step);
            }
        }
        self.memory.invalidate_path();
        self.greedy_step(destination)
    }

    /// Single step that reduces Chebyshev distance to `destination`.
    pub fn greedy_step(&self, destination: Position) -> Option<Position> {
        let here = self.me.position;
        let current = chebyshev_distance(here, destination);
        let dir = (destination - here).signum();
        [
            dir,
            Position::new(dir.x, 0),
            Position::new(0, dir.y),
        ]
        .into_iter()
        .filter(|d| !d.is_zero())
        .map(|d| here + d)
        .find(|&p| {
            p != destination && self.is_free(p) && chebyshev_distance(p, destination) < current
        })
    }

    // ------------------------------------------------------------------
    // Decisions
    // ------------------------------------------------------------------

    pub fn move_cost(&self) -> u32 {
        self.costs.move_cost.max(0) as u32
    }

    pub fn attack_cost(&self) -> u32 {
        self.costs.attack_cost.max(0) as u32
    }

    pub fn wait_cost(&self) -> u32 {
        self.costs.wait_cost.max(0) as u32
    }

    pub fn move_to(&mut self, to: Position, description: impl Into<String>) -> Outcome {
        self.action = Some(AiAction::Move(to));
        Outcome::success(self.move_cost(), description)
    }

    pub fn attack(&mut self, target: EntityId, mode: AttackMode, description: impl Into<String>) -> Outcome {
        self.action = Some(AiAction::Attack { target, mode });
        Outcome::success(self.attack_cost(), description)
    }

    /// Spends the turn standing still. `status` lets a blocked move report failure.
    pub fn wait(&mut self, status: Status, description: impl Into<String>) -> Outcome {
        self.action = Some(AiAction::Wait);
        match status {
            Status::Success => Outcome::success(self.wait_cost(), description),
            Status::Failure => Outcome::failure(self.wait_cost(), description),
        }
    }

    pub fn emit(&mut self, signal: AiSignal) {
        self.signals.push(signal);
    }

    pub fn action(&self) -> Option<AiAction> {
        self.action
    }

    /// Hands the decision and signals to the runtime and returns the memory
    /// and RNG state to the caller.
    pub fn finish(self) -> (Option<AiAction>, Vec<AiSignal>, EnemyMemory, PcgRng) {
        (self.action, self.signals, self.memory, self.rng)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ironclad_core::TileGrid;

    /// Context for an enemy `#1` at `me` with the player at `target`.
    pub fn context(layout: &str, me: Position, target: Option<(Position, bool)>) -> BehaviorContext {
        let grid = TileGrid::from_ascii(layout);
        let mut occupancy = EntityGrid::new();
        occupancy.insert(EntityId(1), me);
        let target = target.map(|(position, visible)| {
            occupancy.insert(EntityId::PLAYER, position);
            TargetView {
                id: EntityId::PLAYER,
                position,
                distance: chebyshev_distance(me, position),
                visible,
                noise: 0,
            }
        });
        BehaviorContext::new(
            SelfView {
                id: EntityId(1),
                position: me,
                health_percent: 100,
                can_hear: true,
                loadout: Loadout::default(),
            },
            target,
            EnemyMemory::new(me),
            PcgRng::seeded(7),
            AiConfig::default(),
            SchedulerConfig::default(),
            Arc::new(grid),
            Arc::new(occupancy),
        )
    }

    pub fn open(width: usize, height: usize) -> String {
        vec![".".repeat(width); height].join("\n")
    }
}
