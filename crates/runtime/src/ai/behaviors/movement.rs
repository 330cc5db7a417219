use ironclad_behavior::{Behavior, Outcome, PriorityBand, Status};
use ironclad_core::{Position, chebyshev_distance, path};

use crate::ai::context::BehaviorContext;

/// Closes on the target, or on where it was last seen if that was recent.
#[derive(Clone, Copy, Debug)]
pub struct Chase {
    pub priority: i32,
}

impl Default for Chase {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Pursuit.at(5),
        }
    }
}

impl Chase {
    fn destination(ctx: &BehaviorContext) -> Option<Position> {
        match ctx.target {
            Some(t) if t.visible => Some(t.position),
            _ => ctx
                .memory
                .last_known_target
                .filter(|_| ctx.memory.turns_since_target_seen <= ctx.ai.chase_persistence),
        }
    }
}

impl Behavior<BehaviorContext> for Chase {
    fn name(&self) -> &str {
        "Chase"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        Self::destination(ctx).is_some()
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(destination) = Self::destination(ctx) else {
            return ctx.wait(Status::Failure, "Nothing to chase");
        };

        if ctx.me.position == destination {
            // Reached the last sighting without finding anyone.
            ctx.memory.last_known_target = None;
            return ctx.wait(Status::Failure, "Trail went cold");
        }

        match ctx.step_toward(destination) {
            Some(step) => ctx.move_to(step, format!("Chasing toward {destination}")),
            None => ctx.wait(Status::Failure, "Chase blocked"),
        }
    }
}

/// Backs away from a nearby threat once badly damaged.
#[derive(Clone, Copy, Debug)]
pub struct Flee {
    pub priority: i32,
    /// Health percentage at or below which fleeing starts.
    pub health_threshold: u32,
    /// Flee only while the threat is closer than this.
    pub flee_distance: i32,
}

impl Default for Flee {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Emergency.at(0),
            health_threshold: 25,
            flee_distance: 6,
        }
    }
}

impl Behavior<BehaviorContext> for Flee {
    fn name(&self) -> &str {
        "Flee"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        ctx.me.health_percent <= self.health_threshold
            && ctx.target.is_some_and(|t| t.distance < self.flee_distance)
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(threat) = ctx.target.map(|t| t.position) else {
            return ctx.wait(Status::Failure, "No threat");
        };
        let here = ctx.me.position;
        let current = chebyshev_distance(here, threat);

        let step = path::flee_direction(here, threat, |p| ctx.is_free(p));
        if step.is_zero() {
            return ctx.wait(Status::Failure, "Cornered");
        }

        let mut destination = here + step;
        if chebyshev_distance(destination, threat) < current {
            // The best open tile closes distance; try sidestepping instead.
            let sidestep = [Position::new(-step.y, step.x), Position::new(step.y, -step.x)]
                .into_iter()
                .map(|offset| here + offset)
                .find(|&p| ctx.is_free(p) && chebyshev_distance(p, threat) >= current);
            match sidestep {
                Some(p) => destination = p,
                None => return ctx.wait(Status::Failure, "Cornered"),
            }
        }

        ctx.memory.invalidate_path();
        ctx.move_to(destination, format!("Fleeing from {threat}"))
    }
}
