//! Decorator behaviors.
//!
//! Decorators wrap a single behavior and adjust how the selector sees it.
//! [`Reprioritized`] moves a behavior to a different slot in the ordering;
//! [`Guarded`] adds an extra precondition in front of the wrapped one.

use crate::{Behavior, Outcome};

/// Overrides the priority of its child.
pub struct Reprioritized<C> {
    child: Box<dyn Behavior<C>>,
    priority: i32,
}

impl<C> Reprioritized<C> {
    pub fn new(child: Box<dyn Behavior<C>>, priority: i32) -> Self {
        Self { child, priority }
    }
}

impl<C> Behavior<C> for Reprioritized<C> {
    fn name(&self) -> &str {
        self.child.name()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_execute(&self, ctx: &C) -> bool {
        self.child.can_execute(ctx)
    }

    fn execute(&self, ctx: &mut C) -> Outcome {
        self.child.execute(ctx)
    }
}

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// Runs its child only when both the guard and the child's own
/// precondition hold. The guard is checked first.
pub struct Guarded<C> {
    child: Box<dyn Behavior<C>>,
    guard: Predicate<C>,
}

impl<C> Guarded<C> {
    pub fn new(
        child: Box<dyn Behavior<C>>,
        guard: impl Fn(&C) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            child,
            guard: Box::new(guard),
        }
    }
}

impl<C> Behavior<C> for Guarded<C> {
    fn name(&self) -> &str {
        self.child.name()
    }

    fn priority(&self) -> i32 {
        self.child.priority()
    }

    fn can_execute(&self, ctx: &C) -> bool {
        (self.guard)(ctx) && self.child.can_execute(ctx)
    }

    fn execute(&self, ctx: &mut C) -> Outcome {
        self.child.execute(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn name(&self) -> &str {
            "increment"
        }

        fn priority(&self) -> i32 {
            50
        }

        fn can_execute(&self, ctx: &TestContext) -> bool {
            ctx.value < 10
        }

        fn execute(&self, ctx: &mut TestContext) -> Outcome {
            ctx.value += 1;
            Outcome::success(100, "incremented")
        }
    }

    #[test]
    fn reprioritized_keeps_name_and_behavior() {
        let b = Reprioritized::new(Box::new(Increment), 5);
        assert_eq!(b.priority(), 5);
        assert_eq!(b.name(), "increment");

        let mut ctx = TestContext { value: 0 };
        assert!(b.execute(&mut ctx).is_success());
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn guard_and_child_precondition_both_required() {
        let b = Guarded::new(Box::new(Increment), |ctx: &TestContext| ctx.value % 2 == 0);
        assert!(b.can_execute(&TestContext { value: 4 }));
        assert!(!b.can_execute(&TestContext { value: 3 }));
        assert!(!b.can_execute(&TestContext { value: 12 }));
        assert_eq!(b.priority(), 50);
    }
}
