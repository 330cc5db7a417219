use ironclad_behavior::{Behavior, PrioritySelector, Selection};

use super::context::BehaviorContext;

/// Per-enemy behavior list with the far-and-calm short circuit.
///
/// An enemy that is far from its target, barely alert and has nowhere
/// remembered to go cannot do anything meaningful, so evaluation returns
/// an idle selection without consulting a single behavior.
pub struct BehaviorSelector {
    behaviors: PrioritySelector<BehaviorContext>,
}

impl Default for BehaviorSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<PrioritySelector<BehaviorContext>> for BehaviorSelector {
    fn from(behaviors: PrioritySelector<BehaviorContext>) -> Self {
        Self { behaviors }
    }
}

impl BehaviorSelector {
    pub fn new() -> Self {
        Self {
            behaviors: PrioritySelector::new(),
        }
    }

    pub fn add(&mut self, behavior: impl Behavior<BehaviorContext> + 'static) {
        self.behaviors.add(Box::new(behavior));
    }

    pub fn remove(&mut self, name: &str) -> usize {
        self.behaviors.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.contains(name)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn priorities(&mut self) -> Vec<(String, i32)> {
        self.behaviors.priorities()
    }

    /// A missing target counts as infinitely far away.
    pub fn should_skip(ctx: &BehaviorContext) -> bool {
        let distance = ctx.target_distance().unwrap_or(i32::MAX);
        distance > ctx.ai.early_exit_distance
            && ctx.memory.alert_level() < ctx.ai.min_alert_for_evaluation
            && ctx.memory.last_known_target.is_none()
    }

    pub fn evaluate(&mut self, ctx: &mut BehaviorContext) -> Selection {
        if Self::should_skip(ctx) {
            return Selection::idle();
        }
        self.behaviors.evaluate(ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ironclad_behavior::{Outcome, Status};
    use ironclad_core::Position;

    use super::*;
    use crate::ai::behaviors::{MeleeAttack, Wander};
    use crate::ai::context::AiAction;
    use crate::ai::context::test_support::{context, open};

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl Behavior<BehaviorContext> for Counting {
        fn name(&self) -> &str {
            "Counting"
        }
        fn priority(&self) -> i32 {
            50
        }
        fn can_execute(&self, _ctx: &BehaviorContext) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }
        fn execute(&self, ctx: &mut BehaviorContext) -> Outcome {
            ctx.wait(Status::Success, "counted")
        }
    }

    fn counting_selector() -> (BehaviorSelector, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut selector = BehaviorSelector::new();
        selector.add(Counting {
            calls: Arc::clone(&calls),
        });
        (selector, calls)
    }

    #[test]
    fn far_calm_enemy_short_circuits_to_idle() {
        let (mut selector, calls) = counting_selector();
        let mut ctx = context(&open(30, 5), Position::new(0, 0), Some((Position::new(20, 0), true)));

        let selection = selector.evaluate(&mut ctx);
        assert!(selection.is_idle());
        assert_eq!(selection.outcome.cost, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.action(), None);
    }

    #[test]
    fn alert_or_memory_disables_the_short_circuit() {
        let (mut selector, calls) = counting_selector();
        let mut ctx = context(&open(30, 5), Position::new(0, 0), Some((Position::new(20, 0), true)));
        ctx.memory.set_alert(5);
        assert!(!selector.evaluate(&mut ctx).is_idle());

        let mut ctx = context(&open(30, 5), Position::new(0, 0), None);
        ctx.memory.last_known_target = Some(Position::new(3, 3));
        assert!(!selector.evaluate(&mut ctx).is_idle());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn no_target_and_calm_is_idle() {
        let (mut selector, calls) = counting_selector();
        let mut ctx = context(&open(5, 5), Position::new(0, 0), None);
        assert!(selector.evaluate(&mut ctx).is_idle());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn picks_highest_priority_applicable_behavior() {
        let mut selector = BehaviorSelector::new();
        selector.add(Wander::default());
        selector.add(MeleeAttack::default());
        let mut ctx = context(&open(5, 5), Position::new(1, 1), Some((Position::new(2, 1), true)));

        let selection = selector.evaluate(&mut ctx);
        assert_eq!(selection.executed.as_deref(), Some("MeleeAttack"));
        assert!(matches!(ctx.action(), Some(AiAction::Attack { .. })));
        assert_eq!(
            selector.priorities(),
            vec![("MeleeAttack".to_string(), 25), ("Wander".to_string(), 95)]
        );
    }
}
