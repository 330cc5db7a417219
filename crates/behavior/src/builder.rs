//! Builder utilities for ergonomic selector construction.
//!
//! Instead of boxing and wrapping every behavior by hand, chain calls on a
//! [`PrioritySelectorBuilder`]:
//!
//! ```rust,ignore
//! let selector = PrioritySelectorBuilder::new()
//!     .with(MeleeAttack::default())
//!     .with_priority(Chase::default(), 35)
//!     .guarded(Flee::default(), |ctx| ctx.is_wounded())
//!     .build();
//! ```

use crate::{Behavior, Guarded, PrioritySelector, Reprioritized};

pub struct PrioritySelectorBuilder<C> {
    behaviors: Vec<Box<dyn Behavior<C>>>,
}

impl<C: 'static> Default for PrioritySelectorBuilder<C> {
    fn default() -> Self {
        Self {
            behaviors: Vec::new(),
        }
    }
}

impl<C: 'static> PrioritySelectorBuilder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, behavior: impl Behavior<C> + 'static) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    pub fn with_boxed(mut self, behavior: Box<dyn Behavior<C>>) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Adds `behavior` at `priority` instead of its own.
    pub fn with_priority(mut self, behavior: impl Behavior<C> + 'static, priority: i32) -> Self {
        self.behaviors
            .push(Box::new(Reprioritized::new(Box::new(behavior), priority)));
        self
    }

    /// Adds `behavior` behind an extra precondition.
    pub fn guarded(
        mut self,
        behavior: impl Behavior<C> + 'static,
        guard: impl Fn(&C) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.behaviors
            .push(Box::new(Guarded::new(Box::new(behavior), guard)));
        self
    }

    pub fn build(self) -> PrioritySelector<C> {
        let mut selector = PrioritySelector::new();
        for behavior in self.behaviors {
            selector.add(behavior);
        }
        selector
    }
}
