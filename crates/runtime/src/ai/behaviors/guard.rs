use ironclad_behavior::{Behavior, Outcome, PriorityBand, Status};
use ironclad_core::chebyshev_distance;

use crate::ai::context::BehaviorContext;

/// Holds a post. Steps aside for combat behaviors when an intruder comes
/// close to the post or to the guard, otherwise returns to the post.
#[derive(Clone, Copy, Debug)]
pub struct Guard {
    pub priority: i32,
    /// Intruders this close to the post are engaged.
    pub guard_radius: i32,
    /// Intruders this close to the guard are engaged.
    pub chase_radius: i32,
}

impl Default for Guard {
    fn default() -> Self {
        Self {
            priority: PriorityBand::Combat.at(18),
            guard_radius: 3,
            chase_radius: 5,
        }
    }
}

impl Behavior<BehaviorContext> for Guard {
    fn name(&self) -> &str {
        "Guard"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &BehaviorContext) -> bool {
        ctx.memory.guard_position.is_some()
    }

    fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
        let Some(post) = ctx.memory.guard_position else {
            return Outcome::pass(Status::Failure, "No post");
        };

        let intruder = ctx.target.is_some_and(|t| {
            t.visible
                && (chebyshev_distance(t.position, post) <= self.guard_radius
                    || t.distance <= self.chase_radius)
        });
        if intruder {
            return Outcome::pass(Status::Failure, "Intruder near post");
        }

        if ctx.me.position == post {
            return ctx.wait(Status::Success, format!("Guarding {post}"));
        }
        match ctx.step_toward(post) {
            Some(step) => ctx.move_to(step, format!("Returning to post {post}")),
            None => ctx.wait(Status::Failure, "Post unreachable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::context::AiAction;
    use crate::ai::context::test_support::{context, open};
    use ironclad_core::Position;

    #[test]
    fn needs_a_post() {
        let mut ctx = context(&open(8, 8), Position::new(2, 2), None);
        assert!(!Guard::default().can_execute(&ctx));
        ctx.memory.guard_position = Some(Position::new(2, 2));
        assert!(Guard::default().can_execute(&ctx));
        let outcome = Guard::default().execute(&mut ctx);
        assert!(outcome.is_success());
        assert_eq!(ctx.action(), Some(AiAction::Wait));
    }

    #[test]
    fn steps_aside_for_intruders() {
        let mut ctx = context(&open(12, 12), Position::new(2, 2), Some((Position::new(6, 2), true)));
        ctx.memory.guard_position = Some(Position::new(2, 2));
        let outcome = Guard::default().execute(&mut ctx);
        assert!(outcome.fallthrough);
        assert_eq!(ctx.action(), None);
    }

    #[test]
    fn walks_back_to_post_when_clear() {
        let mut ctx = context(&open(12, 12), Position::new(5, 2), Some((Position::new(11, 11), true)));
        ctx.memory.guard_position = Some(Position::new(2, 2));
        let outcome = Guard::default().execute(&mut ctx);
        assert!(!outcome.fallthrough);
        assert_eq!(ctx.action(), Some(AiAction::Move(Position::new(4, 2))));
    }
}
