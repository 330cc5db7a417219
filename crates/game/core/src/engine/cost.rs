use crate::config::SchedulerConfig;

/// Energy price of a completed turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCost {
    Move,
    Attack,
    Wait,
    /// Explicit energy amount, e.g. from an inventory or targeting screen.
    Custom(i32),
}

impl ActionCost {
    /// Energy spent, before the idle floor is applied.
    pub fn energy(self, config: &SchedulerConfig) -> i32 {
        match self {
            ActionCost::Move => config.move_cost,
            ActionCost::Attack => config.attack_cost,
            ActionCost::Wait => config.wait_cost,
            ActionCost::Custom(amount) => amount,
        }
    }

    /// Energy actually charged. A turn that would cost nothing is charged
    /// the wait cost so the actor cannot act forever without time passing;
    /// anything above `max_action_cost` is charged the ceiling.
    pub fn charged(self, config: &SchedulerConfig) -> i32 {
        let energy = self.energy(config);
        if energy <= 0 {
            config.wait_cost
        } else {
            energy.min(config.max_action_cost)
        }
    }
}

/// Energy gained per scheduler tick for a given speed.
///
/// Speed is clamped into `[min_speed, max_speed]`, so every registered actor
/// eventually acts and a runaway speed value cannot starve everyone else.
#[inline]
pub fn energy_per_tick(speed: i32, config: &SchedulerConfig) -> i32 {
    speed.clamp(config.min_speed, config.max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_costs() {
        let config = SchedulerConfig::default();
        assert_eq!(ActionCost::Move.energy(&config), 100);
        assert_eq!(ActionCost::Attack.energy(&config), 120);
        assert_eq!(ActionCost::Wait.energy(&config), 100);
        assert_eq!(ActionCost::Custom(35).energy(&config), 35);
    }

    #[test]
    fn zero_cost_is_charged_idle_floor() {
        let config = SchedulerConfig::default();
        assert_eq!(ActionCost::Custom(0).charged(&config), 100);
        assert_eq!(ActionCost::Custom(-5).charged(&config), 100);
        assert_eq!(ActionCost::Custom(40).charged(&config), 40);
    }

    #[test]
    fn huge_cost_is_capped() {
        let config = SchedulerConfig::default();
        assert_eq!(ActionCost::Custom(i32::MAX).charged(&config), SchedulerConfig::MAX_ACTION_COST);
        assert_eq!(ActionCost::Custom(10_000).charged(&config), 10_000);
    }

    #[test]
    fn speed_is_clamped() {
        let config = SchedulerConfig::default();
        assert_eq!(energy_per_tick(0, &config), 1);
        assert_eq!(energy_per_tick(150, &config), 150);
        assert_eq!(energy_per_tick(9000, &config), 400);
    }
}
