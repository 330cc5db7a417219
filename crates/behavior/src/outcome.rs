//! Result of executing a behavior.

use crate::Status;

/// What a behavior did this turn.
///
/// `cost` is in scheduler energy units; zero means no time was spent.
/// `fallthrough` marks sensor-style behaviors that only update state and
/// let the selector keep scanning so a lower-priority behavior can still
/// act in the same turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    pub cost: u32,
    pub description: String,
    pub fallthrough: bool,
}

impl Outcome {
    pub fn success(cost: u32, description: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            cost,
            description: description.into(),
            fallthrough: false,
        }
    }

    /// The behavior was chosen but could not do anything useful. Still ends
    /// the scan; `cost` is what the failed attempt consumed.
    pub fn failure(cost: u32, description: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            cost,
            description: description.into(),
            fallthrough: false,
        }
    }

    /// Zero-cost result that lets the selector continue to the next behavior.
    pub fn pass(status: Status, description: impl Into<String>) -> Self {
        Self {
            status,
            cost: 0,
            description: description.into(),
            fallthrough: true,
        }
    }

    /// Result when nothing applied.
    pub fn idle() -> Self {
        Self::success(0, "Idle")
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_is_free_and_falls_through() {
        let o = Outcome::pass(Status::Failure, "ambush sprung");
        assert_eq!(o.cost, 0);
        assert!(o.fallthrough);
        assert!(!o.is_success());
    }

    #[test]
    fn idle_costs_nothing() {
        let o = Outcome::idle();
        assert!(o.is_success());
        assert_eq!(o.cost, 0);
        assert!(!o.fallthrough);
    }
}
