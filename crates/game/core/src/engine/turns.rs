use std::fmt::Write as _;

use crate::config::SchedulerConfig;
use crate::state::EntityId;

use super::cost::{ActionCost, energy_per_tick};
use super::errors::SchedulerError;

/// One actor's slot in the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerEntry {
    pub actor: EntityId,
    pub speed: i32,
    pub energy: i32,
    /// Registration order; breaks energy ties (earlier wins).
    pub sequence: u64,
}

/// Energy scheduler.
///
/// Every tick each entry gains [`energy_per_tick`] energy. Entries holding at
/// least `action_threshold` are ready; the ready entry with the most energy
/// acts, ties going to the earlier registration. Acting spends the charged
/// cost of the action taken, so faster actors act proportionally more often.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
    entries: Vec<SchedulerEntry>,
    next_sequence: u64,
    turn_number: u64,
    ticks: u64,
    current: Option<EntityId>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Adds an actor with zero energy.
    pub fn register(&mut self, actor: EntityId, speed: i32) -> Result<(), SchedulerError> {
        if self.is_registered(actor) {
            return Err(SchedulerError::AlreadyRegistered(actor));
        }
        self.entries.push(SchedulerEntry {
            actor,
            speed,
            energy: 0,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        Ok(())
    }

    pub fn unregister(&mut self, actor: EntityId) -> Result<SchedulerEntry, SchedulerError> {
        let index = self.index_of(actor)?;
        if self.current == Some(actor) {
            self.current = None;
        }
        Ok(self.entries.remove(index))
    }

    /// Drops every entry whose actor is no longer active. Returns the removed ids.
    pub fn prune_inactive(&mut self, is_active: impl Fn(EntityId) -> bool) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.entries.retain(|entry| {
            let keep = is_active(entry.actor);
            if !keep {
                removed.push(entry.actor);
            }
            keep
        });
        if self.current.is_some_and(|c| removed.contains(&c)) {
            self.current = None;
        }
        removed
    }

    pub fn set_speed(&mut self, actor: EntityId, speed: i32) -> Result<(), SchedulerError> {
        let index = self.index_of(actor)?;
        self.entries[index].speed = speed;
        Ok(())
    }

    pub fn is_registered(&self, actor: EntityId) -> bool {
        self.entries.iter().any(|e| e.actor == actor)
    }

    pub fn entry(&self, actor: EntityId) -> Option<&SchedulerEntry> {
        self.entries.iter().find(|e| e.actor == actor)
    }

    pub fn energy(&self, actor: EntityId) -> Option<i32> {
        self.entry(actor).map(|e| e.energy)
    }

    pub fn entries(&self) -> &[SchedulerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of turns granted so far.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Energy ticks elapsed; the scheduler's notion of game time.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Actor granted the turn that has not yet been ended.
    pub fn current_actor(&self) -> Option<EntityId> {
        self.current
    }

    /// Advances time by one tick, granting energy to every entry.
    pub fn tick(&mut self) {
        self.advance(1);
    }

    fn advance(&mut self, ticks: i32) {
        if ticks <= 0 {
            return;
        }
        for entry in &mut self.entries {
            let rate = energy_per_tick(entry.speed, &self.config).max(1);
            entry.energy = entry.energy.saturating_add(rate.saturating_mul(ticks));
        }
        self.ticks += ticks as u64;
    }

    /// Ticks until the first entry becomes ready.
    fn ticks_until_ready(&self) -> Option<i32> {
        let threshold = self.config.action_threshold;
        self.entries
            .iter()
            .map(|e| {
                let missing = threshold.saturating_sub(e.energy);
                if missing <= 0 {
                    0
                } else {
                    let rate = energy_per_tick(e.speed, &self.config).max(1);
                    missing.saturating_add(rate - 1) / rate
                }
            })
            .min()
    }

    fn select_ready(&self) -> Option<&SchedulerEntry> {
        let threshold = self.config.action_threshold;
        self.entries
            .iter()
            .filter(|e| e.energy >= threshold)
            .min_by_key(|e| (std::cmp::Reverse(e.energy), e.sequence))
    }

    /// Grants the next turn, advancing time as far as needed for someone to
    /// become ready.
    pub fn next_actor(&mut self) -> Result<EntityId, SchedulerError> {
        let wait = self
            .ticks_until_ready()
            .ok_or(SchedulerError::NoActiveActors)?;
        self.advance(wait);

        let actor = self
            .select_ready()
            .map(|e| e.actor)
            .ok_or(SchedulerError::NoActiveActors)?;

        self.turn_number += 1;
        self.current = Some(actor);
        Ok(actor)
    }

    /// Charges `cost` to `actor` and closes its turn. Returns the energy spent.
    pub fn end_turn(&mut self, actor: EntityId, cost: ActionCost) -> Result<i32, SchedulerError> {
        let index = self.index_of(actor)?;
        let spent = cost.charged(&self.config);
        let entry = &mut self.entries[index];
        entry.energy = entry.energy.saturating_sub(spent);
        if self.current == Some(actor) {
            self.current = None;
        }
        Ok(spent)
    }

    /// Multi-line dump of the turn order, one entry per line.
    pub fn debug_state(&self) -> String {
        let mut out = format!(
            "turn {} tick {} current {}\n",
            self.turn_number,
            self.ticks,
            self.current
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        let mut ordered: Vec<&SchedulerEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|e| (std::cmp::Reverse(e.energy), e.sequence));
        for e in ordered {
            let _ = writeln!(
                out,
                "  {} speed={} energy={} seq={}",
                e.actor, e.speed, e.energy, e.sequence
            );
        }
        out
    }

    fn index_of(&self, actor: EntityId) -> Result<usize, SchedulerError> {
        self.entries
            .iter()
            .position(|e| e.actor == actor)
            .ok_or(SchedulerError::UnknownActor(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scheduler(actors: &[(u32, i32)]) -> Scheduler {
        let mut s = Scheduler::new(SchedulerConfig::default());
        for &(id, speed) in actors {
            s.register(EntityId(id), speed).expect("fresh id");
        }
        s
    }

    fn take_turns(s: &mut Scheduler, n: usize, cost: ActionCost) -> Vec<u32> {
        (0..n)
            .map(|_| {
                let id = s.next_actor().expect("actors registered");
                s.end_turn(id, cost).expect("registered");
                id.0
            })
            .collect()
    }

    #[test]
    fn empty_scheduler_has_no_actor() {
        let mut s = Scheduler::default();
        assert_eq!(s.next_actor(), Err(SchedulerError::NoActiveActors));
    }

    #[test]
    fn equal_energy_breaks_ties_by_registration() {
        let mut s = scheduler(&[(7, 100), (3, 100)]);
        assert_eq!(take_turns(&mut s, 4, ActionCost::Move), vec![7, 3, 7, 3]);
    }

    #[test]
    fn double_speed_acts_twice_as_often() {
        let mut s = scheduler(&[(1, 100), (2, 200)]);
        let order = take_turns(&mut s, 30, ActionCost::Wait);
        assert_eq!(&order[..3], &[2, 1, 2]);
        assert_eq!(order.iter().filter(|&&id| id == 2).count(), 20);
        assert_eq!(order.iter().filter(|&&id| id == 1).count(), 10);
    }

    #[test]
    fn expensive_actions_delay_next_turn() {
        let mut s = scheduler(&[(1, 100), (2, 100)]);
        let first = s.next_actor().expect("ready");
        assert_eq!(first, EntityId(1));
        s.end_turn(first, ActionCost::Attack).expect("registered");
        assert_eq!(s.energy(first), Some(-20));
        let order = take_turns(&mut s, 3, ActionCost::Move);
        assert_eq!(order, vec![2, 2, 1]);
    }

    #[test]
    fn zero_cost_turn_still_spends_energy() {
        let mut s = scheduler(&[(1, 100)]);
        let id = s.next_actor().expect("ready");
        assert_eq!(s.end_turn(id, ActionCost::Custom(0)), Ok(100));
        assert_eq!(s.energy(id), Some(0));
    }

    #[test]
    fn huge_custom_cost_is_capped_and_scheduling_continues() {
        let mut s = scheduler(&[(1, 100), (2, 100)]);
        let first = s.next_actor().expect("ready");
        assert_eq!(first, EntityId(1));
        assert_eq!(
            s.end_turn(first, ActionCost::Custom(i32::MAX)),
            Ok(SchedulerConfig::MAX_ACTION_COST)
        );
        assert_eq!(s.energy(first), Some(100 - SchedulerConfig::MAX_ACTION_COST));

        let second = s.next_actor().expect("ready");
        assert_eq!(second, EntityId(2));
        s.end_turn(second, ActionCost::Wait).expect("registered");
        assert_eq!(s.next_actor(), Ok(EntityId(2)));
    }

    #[test]
    fn extreme_energy_saturates_instead_of_overflowing() {
        let config = SchedulerConfig {
            max_action_cost: i32::MAX,
            ..SchedulerConfig::default()
        };
        let mut s = Scheduler::new(config);
        s.register(EntityId(1), 100).expect("fresh id");
        s.register(EntityId(2), 400).expect("fresh id");
        let id = s.next_actor().expect("ready");
        s.end_turn(id, ActionCost::Custom(i32::MAX)).expect("registered");
        s.end_turn(id, ActionCost::Custom(i32::MAX)).expect("registered");
        assert_eq!(s.energy(id), Some(i32::MIN));

        let next = s.next_actor().expect("ready");
        assert_ne!(next, id);
    }

    #[test]
    fn registration_errors() {
        let mut s = scheduler(&[(1, 100)]);
        assert_eq!(
            s.register(EntityId(1), 50),
            Err(SchedulerError::AlreadyRegistered(EntityId(1)))
        );
        assert_eq!(
            s.set_speed(EntityId(9), 50),
            Err(SchedulerError::UnknownActor(EntityId(9)))
        );
        assert!(s.unregister(EntityId(1)).is_ok());
        assert!(s.is_empty());
    }

    #[test]
    fn prune_removes_inactive_entries() {
        let mut s = scheduler(&[(0, 100), (1, 100), (2, 100)]);
        let removed = s.prune_inactive(|id| id != EntityId(1));
        assert_eq!(removed, vec![EntityId(1)]);
        assert_eq!(s.len(), 2);
        assert_eq!(take_turns(&mut s, 2, ActionCost::Move), vec![0, 2]);
    }

    #[test]
    fn turn_number_and_debug_state() {
        let mut s = scheduler(&[(0, 100), (4, 150)]);
        let id = s.next_actor().expect("ready");
        assert_eq!(s.turn_number(), 1);
        assert_eq!(s.current_actor(), Some(id));
        let dump = s.debug_state();
        assert!(dump.starts_with("turn 1"));
        assert!(dump.contains("#4 speed=150"));
        assert_eq!(dump.lines().count(), 3);
    }

    proptest! {
        #[test]
        fn faster_never_acts_less_often(slow in 20i32..200, extra in 0i32..200) {
            let fast = slow + extra;
            let mut s = scheduler(&[(1, slow), (2, fast)]);
            let order = take_turns(&mut s, 200, ActionCost::Move);
            let slow_turns = order.iter().filter(|&&id| id == 1).count();
            let fast_turns = order.iter().filter(|&&id| id == 2).count();
            prop_assert!(fast_turns + 1 >= slow_turns);
        }
    }
}
