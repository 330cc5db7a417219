//! Behaviors driven by the alert level: lying in wait, reacting to sound,
//! and checking out a reported position.

use ironclad_behavior::{Behavior, Outcome, PriorityBand, Status};
use ironclad_core::{Position, RngOracle};

use crate::ai::context::{AiSignal, AlertCause, BehaviorContext};
use crate::ai::memory::MAX_ALERT;

/// Holds still at a fixed spot until the target walks into range.
///
/// The spot is wherever the enemy stands the first time this runs. Once
/// sprung the alert level jumps to maximum and the scan continues, so an
/// attack behavior can act in the same turn.
#[derive(Clone, Copy, Debug)]
pub struct Ambush {
    pub priority: i32,
    pub trigger_range: i32,
    pub require_visibility: bool,
    /// Turns before the ambush is abandoned; `None` waits forever.
    pub duration: Option<u32>,
}

impl Ambush {
    /// Highest alert level at which the enemy keeps waiting.
    pub const MAX_CALM_ALERT: i32 = 30;
}

impl Default for Ambush {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Emergency.at(10),
            trigger_range: 3,
            require_visibility: true,
            duration: None,
        }
    }
}

impl Behavior<BehaviorContext> for Ambush {
    fn name(&self) -> &str {
        "Ambush"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        if ctx.memory.alert_level() > Self::MAX_CALM_ALERT {
            return false;
        }
        if !ctx.memory.ambush_established {
            return true;
        }
        ctx.memory.ambush_position == Some(ctx.me.position)
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        if !ctx.memory.ambush_established {
            ctx.memory.establish_ambush(ctx.me.position, self.duration);
        }

        let sprung = ctx.target.filter(|t| {
            t.distance <= self.trigger_range && (t.visible || !self.require_visibility)
        });
        match sprung {
            Some(target) => {
                ctx.memory.set_alert(MAX_ALERT);
                ctx.memory.last_known_target = Some(target.position);
                ctx.emit(AiSignal::AmbushSprung { target: target.id });
                ctx.emit(AiSignal::AlertRaised {
                    level: MAX_ALERT,
                    cause: AlertCause::Ambush,
                });
                Outcome::pass(Status::Failure, "Ambush sprung")
            }
            None => ctx.wait(Status::Success, "Lying in ambush"),
        }
    }
}

/// Turns a loud target into an investigation lead.
///
/// Detection range scales with the target's noise, and the reported
/// position drifts further from the truth the quieter the noise was.
#[derive(Clone, Copy, Debug)]
pub struct AlertOnNoise {
    pub priority: i32,
    /// Noise must exceed this to be noticed.
    pub threshold: i32,
    /// Hearing range at noise level 100.
    pub base_range: i32,
    pub alert_boost: i32,
    pub investigate_turns: u32,
}

impl Default for AlertOnNoise {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Pursuit.at(0),
            threshold: 20,
            base_range: 10,
            alert_boost: 30,
            investigate_turns: 10,
        }
    }
}

impl AlertOnNoise {
    fn hearing_range(&self, noise: i32) -> i32 {
        self.base_range * noise / 100
    }
}

impl Behavior<BehaviorContext> for AlertOnNoise {
    fn name(&self) -> &str {
        "AlertOnNoise"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        ctx.me.can_hear
            && ctx.memory.alert_level() < MAX_ALERT
            && ctx.target.is_some_and(|t| {
                !t.visible && t.noise > self.threshold && t.distance <= self.hearing_range(t.noise)
            })
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(target) = ctx.target else {
            return Outcome::pass(Status::Failure, "Nothing heard");
        };

        let spread = (100 - target.noise.clamp(0, 100)) / 25;
        let dx = ctx.rng.range_inclusive(-spread, spread);
        let dy = ctx.rng.range_inclusive(-spread, spread);
        let heard = target.position + Position::new(dx, dy);

        ctx.memory.raise_alert(self.alert_boost);
        // An ally's sighting is exact; a guess from noise does not replace it.
        let keep_report = ctx.memory.alerted_by_ally && ctx.memory.investigate_position.is_some();
        if !keep_report {
            ctx.memory.investigate_position = Some(heard);
            ctx.memory.investigate_turns = self.investigate_turns;
        }
        ctx.emit(AiSignal::AlertRaised {
            level: ctx.memory.alert_level(),
            cause: AlertCause::Noise,
        });
        Outcome::pass(Status::Success, format!("Heard noise near {heard}"))
    }
}

/// Walks to a reported or recently lost position and looks around.
#[derive(Clone, Copy, Debug)]
pub struct Investigate {
    pub priority: i32,
    /// How long after losing sight the last known position stays worth checking.
    pub memory_window: u32,
}

impl Default for Investigate {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Tactical.at(0),
            memory_window: 10,
        }
    }
}

impl Investigate {
    fn lead(&self, ctx: &BehaviorContext) -> Option<Position> {
        ctx.memory.investigate_position.or_else(|| {
            ctx.memory
                .last_known_target
                .filter(|_| ctx.memory.turns_since_target_seen <= self.memory_window)
        })
    }

    fn clear(ctx: &mut BehaviorContext, lead: Position) {
        if ctx.memory.investigate_position == Some(lead) {
            ctx.memory.clear_investigation();
        }
        if ctx.memory.last_known_target == Some(lead) {
            ctx.memory.last_known_target = None;
        }
    }
}

impl Behavior<BehaviorContext> for Investigate {
    fn name(&self) -> &str {
        "Investigate"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        !ctx.target_visible() && self.lead(ctx).is_some()
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(lead) = self.lead(ctx) else {
            return ctx.wait(Status::Failure, "Nothing to investigate");
        };

        if ctx.me.position == lead {
            Self::clear(ctx, lead);
            return ctx.wait(Status::Success, format!("Searched {lead}"));
        }

        let verb = if ctx.memory.alerted_by_ally && ctx.memory.investigate_position == Some(lead) {
            "Answering call at"
        } else {
            "Investigating"
        };
        match ctx.step_toward(lead) {
            Some(step) => ctx.move_to(step, format!("{verb} {lead}")),
            None => {
                Self::clear(ctx, lead);
                ctx.wait(Status::Failure, format!("Cannot reach {lead}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::context::AiAction;
    use crate::ai::context::test_support::{context, open};
    use ironclad_core::EntityId;

    #[test]
    fn ambush_establishes_spot_and_waits() {
        let mut ctx = context(&open(10, 10), Position::new(2, 2), Some((Position::new(9, 9), true)));
        let ambush = Ambush::default();
        assert!(ambush.can_execute(&ctx));

        let outcome = ambush.execute(&mut ctx);
        assert_eq!(outcome.cost, 100);
        assert!(!outcome.fallthrough);
        assert_eq!(ctx.memory.ambush_position, Some(Position::new(2, 2)));

        // Displaced from the spot: the ambush no longer applies.
        ctx.me.position = Position::new(3, 2);
        assert!(!ambush.can_execute(&ctx));
    }

    #[test]
    fn ambush_springs_in_range_and_falls_through() {
        let mut ctx = context(&open(10, 10), Position::new(2, 2), Some((Position::new(4, 4), true)));
        let outcome = Ambush::default().execute(&mut ctx);

        assert!(outcome.fallthrough);
        assert_eq!(outcome.status, Status::Failure);
        assert_eq!(outcome.cost, 0);
        assert_eq!(ctx.memory.alert_level(), MAX_ALERT);
        assert!(!Ambush::default().can_execute(&ctx));

        let (action, signals, _, _) = ctx.finish();
        assert_eq!(action, None);
        assert!(signals.contains(&AiSignal::AmbushSprung {
            target: EntityId::PLAYER
        }));
    }

    #[test]
    fn hidden_target_does_not_spring_a_sight_ambush() {
        let mut ctx = context(&open(10, 10), Position::new(2, 2), Some((Position::new(3, 3), false)));
        let outcome = Ambush::default().execute(&mut ctx);
        assert!(!outcome.fallthrough);

        let blind = Ambush {
            require_visibility: false,
            ..Ambush::default()
        };
        assert!(blind.execute(&mut ctx).fallthrough);
    }

    #[test]
    fn loud_noise_sets_exact_investigate_position() {
        let mut ctx = context(&open(12, 12), Position::new(0, 0), Some((Position::new(6, 0), false)));
        if let Some(t) = ctx.target.as_mut() {
            t.noise = 100;
        }
        let noise = AlertOnNoise::default();
        assert!(noise.can_execute(&ctx));

        let outcome = noise.execute(&mut ctx);
        assert!(outcome.fallthrough);
        assert_eq!(ctx.memory.investigate_position, Some(Position::new(6, 0)));
        assert_eq!(ctx.memory.alert_level(), 30);
    }

    #[test]
    fn noise_does_not_replace_an_ally_report() {
        let mut ctx = context(&open(12, 12), Position::new(0, 0), Some((Position::new(6, 0), false)));
        if let Some(t) = ctx.target.as_mut() {
            t.noise = 100;
        }
        ctx.memory.alert_to_position(Position::new(0, 9), 6);

        let outcome = AlertOnNoise::default().execute(&mut ctx);
        assert!(outcome.fallthrough);
        assert_eq!(ctx.memory.investigate_position, Some(Position::new(0, 9)));
        assert_eq!(ctx.memory.investigate_turns, 6);
        assert_eq!(ctx.memory.alert_level(), 80);
        assert!(ctx.memory.alerted_by_ally);

        // Once the report is searched, noise sets the lead again.
        ctx.memory.clear_investigation();
        AlertOnNoise::default().execute(&mut ctx);
        assert_eq!(ctx.memory.investigate_position, Some(Position::new(6, 0)));
        assert!(!ctx.memory.alerted_by_ally);
    }

    #[test]
    fn reported_lead_is_answered_then_forgotten() {
        let mut ctx = context(&open(8, 8), Position::new(0, 0), None);
        ctx.memory.alert_to_position(Position::new(2, 0), 5);
        let investigate = Investigate::default();

        let outcome = investigate.execute(&mut ctx);
        assert_eq!(outcome.description, "Answering call at (2, 0)");

        ctx.me.position = Position::new(2, 0);
        investigate.execute(&mut ctx);
        assert_eq!(ctx.memory.investigate_position, None);
        assert!(!ctx.memory.alerted_by_ally);
    }

    #[test]
    fn quiet_or_distant_noise_is_ignored() {
        let mut ctx = context(&open(12, 12), Position::new(0, 0), Some((Position::new(6, 0), false)));
        if let Some(t) = ctx.target.as_mut() {
            t.noise = 50;
        }
        // Range at noise 50 is five tiles.
        assert!(!AlertOnNoise::default().can_execute(&ctx));

        if let Some(t) = ctx.target.as_mut() {
            t.noise = 15;
        }
        if let Some(t) = ctx.target.as_mut() {
            t.distance = 1;
        }
        assert!(!AlertOnNoise::default().can_execute(&ctx));

        if let Some(t) = ctx.target.as_mut() {
            t.noise = 100;
        }
        ctx.me.can_hear = false;
        assert!(!AlertOnNoise::default().can_execute(&ctx));
    }

    #[test]
    fn muffled_noise_lands_near_the_source() {
        let mut ctx = context(&open(12, 12), Position::new(0, 0), Some((Position::new(3, 3), false)));
        if let Some(t) = ctx.target.as_mut() {
            t.noise = 40;
        }
        AlertOnNoise::default().execute(&mut ctx);
        let heard = ctx.memory.investigate_position.expect("position recorded");
        // (100 - 40) / 25 = 2 tiles of spread.
        assert!((heard.x - 3).abs() <= 2 && (heard.y - 3).abs() <= 2);
    }

    #[test]
    fn investigate_walks_then_clears_on_arrival() {
        let mut ctx = context(&open(8, 8), Position::new(0, 0), None);
        ctx.memory.investigate_position = Some(Position::new(2, 0));
        ctx.memory.investigate_turns = 5;
        let investigate = Investigate::default();
        assert!(investigate.can_execute(&ctx));

        investigate.execute(&mut ctx);
        assert_eq!(ctx.action(), Some(AiAction::Move(Position::new(1, 0))));

        ctx.me.position = Position::new(2, 0);
        let outcome = investigate.execute(&mut ctx);
        assert!(outcome.is_success());
        assert_eq!(ctx.memory.investigate_position, None);
        assert!(!investigate.can_execute(&ctx));
    }

    #[test]
    fn unreachable_lead_is_dropped() {
        let layout = "..#.\n..#.\n..#.";
        let mut ctx = context(layout, Position::new(1, 1), None);
        ctx.memory.investigate_position = Some(Position::new(3, 1));
        let outcome = Investigate::default().execute(&mut ctx);
        assert_eq!(outcome.status, Status::Failure);
        assert_eq!(ctx.memory.investigate_position, None);
    }
}
