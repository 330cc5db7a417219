//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, the unit of decision logic a
//! [`PrioritySelector`](crate::PrioritySelector) chooses between. The trait is
//! generic over a context type `C`, allowing behaviors to read game state and
//! mutate the acting entity's memory.

use std::ops::Range;

use crate::Outcome;

/// A named, prioritized unit of decision logic.
pub trait Behavior<C>: Send + Sync {
    /// Stable identifier used in logs and debug views.
    fn name(&self) -> &str;

    /// Lower values are evaluated first.
    fn priority(&self) -> i32;

    /// Fast precondition check. Must not mutate anything.
    fn can_execute(&self, ctx: &C) -> bool;

    /// Performs the behavior. Only called after `can_execute` returned true
    /// for the same context.
    fn execute(&self, ctx: &mut C) -> Outcome;
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// so decorators can wrap either concrete or boxed behaviors.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn priority(&self) -> i32 {
        (**self).priority()
    }

    #[inline]
    fn can_execute(&self, ctx: &C) -> bool {
        (**self).can_execute(ctx)
    }

    #[inline]
    fn execute(&self, ctx: &mut C) -> Outcome {
        (**self).execute(ctx)
    }
}

/// Conventional priority ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityBand {
    /// Survival reactions such as fleeing.
    Emergency,
    Combat,
    Pursuit,
    Tactical,
    /// Idle fallbacks such as wandering.
    Default,
}

impl PriorityBand {
    pub const fn range(self) -> Range<i32> {
        match self {
            PriorityBand::Emergency => 0..20,
            PriorityBand::Combat => 20..40,
            PriorityBand::Pursuit => 40..60,
            PriorityBand::Tactical => 60..80,
            PriorityBand::Default => 80..100,
        }
    }

    /// Priority at `offset` inside the band.
    pub const fn at(self, offset: i32) -> i32 {
        self.range().start + offset
    }

    pub fn of(priority: i32) -> Option<Self> {
        [
            PriorityBand::Emergency,
            PriorityBand::Combat,
            PriorityBand::Pursuit,
            PriorityBand::Tactical,
            PriorityBand::Default,
        ]
        .into_iter()
        .find(|band| band.range().contains(&priority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_zero_to_ninety_nine() {
        assert_eq!(PriorityBand::of(0), Some(PriorityBand::Emergency));
        assert_eq!(PriorityBand::of(25), Some(PriorityBand::Combat));
        assert_eq!(PriorityBand::of(59), Some(PriorityBand::Pursuit));
        assert_eq!(PriorityBand::of(60), Some(PriorityBand::Tactical));
        assert_eq!(PriorityBand::of(99), Some(PriorityBand::Default));
        assert_eq!(PriorityBand::of(100), None);
        assert_eq!(PriorityBand::Pursuit.at(5), 45);
    }
}
