//! Priority-ordered first-match selection.

use crate::{Behavior, Outcome};

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The behavior whose outcome ended the scan, if any.
    pub executed: Option<String>,
    /// Fall-through behaviors that ran before the decisive one, in order.
    pub passed: Vec<String>,
    pub outcome: Outcome,
}

impl Selection {
    pub fn idle() -> Self {
        Self {
            executed: None,
            passed: Vec::new(),
            outcome: Outcome::idle(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.executed.is_none()
    }
}

/// Holds behaviors sorted ascending by priority and executes the first whose
/// precondition holds.
///
/// # Semantics
///
/// - Sorting is lazy: adding or removing marks the list dirty, and the next
///   evaluation re-sorts. The sort is stable, so equal priorities keep
///   insertion order.
/// - The first behavior whose `can_execute` holds is executed and its
///   outcome is returned, whatever its status.
/// - An outcome marked `fallthrough` does not end the scan; evaluation
///   continues with the next behavior.
/// - If nothing executes decisively the result is [`Selection::idle`] (with
///   any fall-through behaviors recorded in `passed`).
pub struct PrioritySelector<C> {
    behaviors: Vec<Box<dyn Behavior<C>>>,
    dirty: bool,
}

impl<C> Default for PrioritySelector<C> {
    fn default() -> Self {
        Self {
            behaviors: Vec::new(),
            dirty: false,
        }
    }
}

impl<C> PrioritySelector<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, behavior: Box<dyn Behavior<C>>) {
        self.behaviors.push(behavior);
        self.dirty = true;
    }

    /// Removes every behavior called `name`. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.behaviors.len();
        self.behaviors.retain(|b| b.name() != name);
        let removed = before - self.behaviors.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.iter().any(|b| b.name() == name)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    fn ensure_sorted(&mut self) {
        if self.dirty {
            self.behaviors.sort_by_key(|b| b.priority());
            self.dirty = false;
        }
    }

    /// `(name, priority)` pairs in evaluation order.
    pub fn priorities(&mut self) -> Vec<(String, i32)> {
        self.ensure_sorted();
        self.behaviors
            .iter()
            .map(|b| (b.name().to_string(), b.priority()))
            .collect()
    }

    pub fn evaluate(&mut self, ctx: &mut C) -> Selection {
        self.ensure_sorted();

        let mut passed = Vec::new();
        for behavior in &self.behaviors {
            if !behavior.can_execute(ctx) {
                continue;
            }
            let outcome = behavior.execute(ctx);
            if outcome.fallthrough {
                passed.push(behavior.name().to_string());
                continue;
            }
            return Selection {
                executed: Some(behavior.name().to_string()),
                passed,
                outcome,
            };
        }

        Selection {
            passed,
            ..Selection::idle()
        }
    }
}
