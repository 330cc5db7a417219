use ironclad_behavior::{Behavior, Outcome, PriorityBand, Status};
use ironclad_core::{Position, RngOracle};
use serde::Serialize;

use crate::ai::context::BehaviorContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PatrolMode {
    /// Cycle through the waypoints stored in memory.
    Waypoint,
    /// Walk to random spots near home.
    Random,
    /// Go home and stay there.
    ReturnHome,
}

/// Routine movement while nothing is going on.
#[derive(Clone, Copy, Debug)]
pub struct Patrol {
    pub priority: i32,
    pub mode: PatrolMode,
    /// How far from home random patrol targets may be.
    pub radius: i32,
}

impl Patrol {
    /// Above this alert level the enemy is too agitated for routine.
    pub const MAX_ALERT: i32 = 50;
    const TARGET_ATTEMPTS: usize = 8;

    pub fn new(mode: PatrolMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    fn pick_random_target(&self, ctx: &mut BehaviorContext) -> Option<Position> {
        let home = ctx.memory.home;
        for _ in 0..Self::TARGET_ATTEMPTS {
            let dx = ctx.rng.range_inclusive(-self.radius, self.radius);
            let dy = ctx.rng.range_inclusive(-self.radius, self.radius);
            let candidate = home + Position::new(dx, dy);
            if candidate != ctx.me.position && ctx.is_free(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn waypoint(&self, ctx: &mut BehaviorContext) -> Outcome {
        if ctx.memory.current_waypoint() == Some(ctx.me.position) {
            ctx.memory.advance_waypoint();
        }
        let Some(waypoint) = ctx.memory.current_waypoint() else {
            return ctx.wait(Status::Failure, "No waypoints");
        };
        match ctx.step_toward(waypoint) {
            Some(step) => ctx.move_to(step, format!("Patrolling to {waypoint}")),
            None => {
                ctx.memory.advance_waypoint();
                ctx.wait(Status::Failure, format!("Waypoint {waypoint} blocked"))
            }
        }
    }

    fn random(&self, ctx: &mut BehaviorContext) -> Outcome {
        let target = match ctx.memory.patrol_target.filter(|&t| t != ctx.me.position) {
            Some(t) => Some(t),
            None => self.pick_random_target(ctx),
        };
        ctx.memory.patrol_target = target;
        let Some(target) = target else {
            return ctx.wait(Status::Failure, "Nowhere to patrol");
        };
        match ctx.step_toward(target) {
            Some(step) => ctx.move_to(step, format!("Patrolling to {target}")),
            None => {
                ctx.memory.patrol_target = None;
                ctx.wait(Status::Failure, format!("Patrol target {target} blocked"))
            }
        }
    }

    fn return_home(&self, ctx: &mut BehaviorContext) -> Outcome {
        let home = ctx.memory.home;
        match ctx.step_toward(home) {
            Some(step) => ctx.move_to(step, format!("Returning home to {home}")),
            None => ctx.wait(Status::Failure, "Way home blocked"),
        }
    }
}

impl Default for Patrol {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Default.at(0),
            mode: PatrolMode::Waypoint,
            radius: 5,
        }
    }
}

impl Behavior<BehaviorContext> for Patrol {
    fn name(&self) -> &str {
        "Patrol"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        if ctx.target_visible() || ctx.memory.alert_level() > Self::MAX_ALERT {
            return false;
        }
        match self.mode {
            PatrolMode::Waypoint => ctx.memory.current_waypoint().is_some(),
            PatrolMode::Random => true,
            PatrolMode::ReturnHome => ctx.me.position != ctx.memory.home,
        }
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        match self.mode {
            PatrolMode::Waypoint => self.waypoint(ctx),
            PatrolMode::Random => self.random(ctx),
            PatrolMode::ReturnHome => self.return_home(ctx),
        }
    }
}

/// Fallback: drift in a random free direction now and then.
#[derive(Clone, Copy, Debug)]
pub struct Wander {
    pub priority: i32,
    /// Percent chance of moving on a given turn.
    pub move_chance: u32,
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Default.at(15),
            move_chance: 50,
        }
    }
}

impl Behavior<BehaviorContext> for Wander {
    fn name(&self) -> &str {
        "Wander"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, _ctx: &BehaviorContext) -> bool {
        true
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        if ctx.rng.roll_percent() >= self.move_chance {
            return ctx.wait(Status::Success, "Standing still");
        }
        let options = ctx.free_neighbors();
        if options.is_empty() {
            return ctx.wait(Status::Failure, "Boxed in");
        }
        let to = options[ctx.rng.index(options.len())];
        ctx.memory.invalidate_path();
        ctx.move_to(to, format!("Wandering to {to}"))
    }
}
