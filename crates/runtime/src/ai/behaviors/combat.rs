use ironclad_behavior::{Behavior, Outcome, PriorityBand, Status};

use crate::ai::context::{AiSignal, AttackMode, BehaviorContext};

/// Strikes an adjacent target.
#[derive(Clone, Copy, Debug)]
pub struct MeleeAttack {
    pub priority: i32,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Combat.at(5),
        }
    }
}

impl Behavior<BehaviorContext> for MeleeAttack {
    fn name(&self) -> &str {
        "MeleeAttack"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        ctx.target.is_some_and(|t| t.distance <= 1)
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(target) = ctx.target else {
            return ctx.wait(Status::Failure, "No target");
        };
        ctx.attack(target.id, AttackMode::Melee, format!("Melee attack on {}", target.id))
    }
}

/// Fires the ranged weapon at a visible target with a usable line of fire.
#[derive(Clone, Copy, Debug)]
pub struct RangedAttack {
    pub priority: i32,
}

impl Default for RangedAttack {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Combat.at(10),
        }
    }
}

impl Behavior<BehaviorContext> for RangedAttack {
    fn name(&self) -> &str {
        "RangedAttack"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        let (Some(weapon), Some(target)) = (ctx.me.loadout.ranged, ctx.target) else {
            return false;
        };
        target.visible
            && target.distance <= weapon.range
            && ctx.line_of_fire(target.position, weapon.range).can_fire()
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(target) = ctx.target else {
            return ctx.wait(Status::Failure, "No target");
        };
        ctx.attack(target.id, AttackMode::Ranged, format!("Firing at {}", target.id))
    }
}

/// Sensor: asks nearby allies to converge on a visible target, then lets
/// the scan continue.
#[derive(Clone, Copy, Debug)]
pub struct CallForHelp {
    pub priority: i32,
    /// Turns between calls.
    pub cooldown: u32,
    pub radius: i32,
}

impl Default for CallForHelp {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Combat.at(0),
            cooldown: 10,
            radius: 8,
        }
    }
}

impl Behavior<BehaviorContext> for CallForHelp {
    fn name(&self) -> &str {
        "CallForHelp"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        ctx.target_visible() && ctx.memory.turns_since_reinforcements >= self.cooldown
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(target) = ctx.target else {
            return Outcome::pass(Status::Failure, "No target");
        };
        ctx.memory.turns_since_reinforcements = 0;
        ctx.emit(AiSignal::CallForHelp {
            position: target.position,
            radius: self.radius,
        });
        Outcome::pass(Status::Success, "Called for help")
    }
}
