//! Per-enemy persistent memory.
//!
//! Each hostile owns exactly one [`EnemyMemory`]. It is mutated by that
//! enemy's own behavior evaluation and by perception or damage events that
//! target it, never by anyone else's behaviors.

use ironclad_core::Position;
use serde::Serialize;

/// Saturation point for the turn counters.
pub const COUNTER_CAP: u32 = u32::MAX - 1;

pub const MAX_ALERT: i32 = 100;

/// Alert raised by [`EnemyMemory::alert_to_position`].
pub const ALLY_ALERT_BOOST: i32 = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct PathCache {
    destination: Position,
    /// Remaining route; `steps[0]` is where the enemy was when it was stored.
    steps: Vec<Position>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
struct SightCache {
    from: Position,
    to: Position,
    visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnemyMemory {
    pub last_known_target: Option<Position>,
    pub turns_since_target_seen: u32,
    pub turns_since_reinforcements: u32,
    alert_level: i32,
    pub home: Position,
    pub guard_position: Option<Position>,
    pub ambush_position: Option<Position>,
    /// `None` while an ambush is set means it never expires.
    pub ambush_turns: Option<u32>,
    /// Set once the ambush spot has been chosen, so an expired ambush is not
    /// re-established elsewhere.
    pub ambush_established: bool,
    pub investigate_position: Option<Position>,
    pub investigate_turns: u32,
    pub patrol_waypoints: Vec<Position>,
    pub patrol_index: usize,
    /// Current destination of a random patrol.
    pub patrol_target: Option<Position>,
    /// The current investigate position was reported by an ally rather than
    /// heard. Cleared together with that position.
    pub alerted_by_ally: bool,
    /// Whether the target was in view at the last perception update.
    pub target_in_view: bool,
    path: Option<PathCache>,
    sight: Option<SightCache>,
}

impl EnemyMemory {
    pub fn new(home: Position) -> Self {
        Self {
            last_known_target: None,
            turns_since_target_seen: 0,
            turns_since_reinforcements: COUNTER_CAP,
            alert_level: 0,
            home,
            guard_position: None,
            ambush_position: None,
            ambush_turns: None,
            ambush_established: false,
            investigate_position: None,
            investigate_turns: 0,
            patrol_waypoints: Vec::new(),
            patrol_index: 0,
            patrol_target: None,
            alerted_by_ally: false,
            target_in_view: false,
            path: None,
            sight: None,
        }
    }

    pub fn alert_level(&self) -> i32 {
        self.alert_level
    }

    pub fn set_alert(&mut self, level: i32) {
        self.alert_level = level.clamp(0, MAX_ALERT);
    }

    pub fn raise_alert(&mut self, amount: i32) {
        self.set_alert(self.alert_level.saturating_add(amount));
    }

    pub fn lower_alert(&mut self, amount: i32) {
        self.set_alert(self.alert_level.saturating_sub(amount));
    }

    /// Start-of-turn bookkeeping: age counters and run down timers.
    pub fn on_turn_start(&mut self) {
        self.turns_since_target_seen = (self.turns_since_target_seen + 1).min(COUNTER_CAP);
        self.turns_since_reinforcements = (self.turns_since_reinforcements + 1).min(COUNTER_CAP);

        if self.investigate_position.is_some() {
            self.investigate_turns = self.investigate_turns.saturating_sub(1);
            if self.investigate_turns == 0 {
                self.clear_investigation();
            }
        }

        if let Some(turns) = self.ambush_turns {
            let left = turns.saturating_sub(1);
            if left == 0 {
                self.ambush_position = None;
                self.ambush_turns = None;
            } else {
                self.ambush_turns = Some(left);
            }
        }
    }

    pub fn clear_investigation(&mut self) {
        self.investigate_position = None;
        self.investigate_turns = 0;
        self.alerted_by_ally = false;
    }

    /// An ally reported the target near `position`.
    pub fn alert_to_position(&mut self, position: Position, duration: u32) {
        self.investigate_position = Some(position);
        self.investigate_turns = duration;
        self.alerted_by_ally = true;
        self.raise_alert(ALLY_ALERT_BOOST);
    }

    /// Took a hit from an attacker standing at `from`.
    pub fn on_damaged(&mut self, from: Position) {
        self.set_alert(MAX_ALERT);
        self.last_known_target = Some(from);
        self.turns_since_target_seen = 0;
    }

    /// Records a sighting. The alert level is untouched: it tracks indirect
    /// evidence, so a lurking ambusher stays calm until its trigger fires.
    pub fn on_target_seen(&mut self, position: Position) {
        self.last_known_target = Some(position);
        self.turns_since_target_seen = 0;
        self.target_in_view = true;
    }

    pub fn on_target_lost(&mut self) {
        self.target_in_view = false;
    }

    /// Starts an ambush at `position`.
    pub fn establish_ambush(&mut self, position: Position, duration: Option<u32>) {
        self.ambush_position = Some(position);
        self.ambush_turns = duration;
        self.ambush_established = true;
    }

    pub fn current_waypoint(&self) -> Option<Position> {
        if self.patrol_waypoints.is_empty() {
            return None;
        }
        self.patrol_waypoints
            .get(self.patrol_index % self.patrol_waypoints.len())
            .copied()
    }

    pub fn advance_waypoint(&mut self) {
        if !self.patrol_waypoints.is_empty() {
            self.patrol_index = (self.patrol_index + 1) % self.patrol_waypoints.len();
        }
    }

    // ------------------------------------------------------------------
    // Path cache
    // ------------------------------------------------------------------

    /// Next step of the cached route to `destination`, if the cache was
    /// computed for that destination and the enemy is where the route
    /// expects it to be.
    pub fn cached_step(&self, current: Position, destination: Position) -> Option<Position> {
        let cache = self.path.as_ref()?;
        if cache.destination != destination || cache.steps.first() != Some(&current) {
            return None;
        }
        cache.steps.get(1).copied()
    }

    /// Stores a route whose first element is the current position.
    pub fn store_path(&mut self, destination: Position, steps: Vec<Position>) {
        self.path = Some(PathCache { destination, steps });
    }

    /// Drops the first step after the enemy moved along the route.
    pub fn consume_step(&mut self) {
        if let Some(cache) = self.path.as_mut() {
            if !cache.steps.is_empty() {
                cache.steps.remove(0);
            }
            if cache.steps.len() < 2 {
                self.path = None;
            }
        }
    }

    pub fn invalidate_path(&mut self) {
        self.path = None;
    }

    pub fn cached_destination(&self) -> Option<Position> {
        self.path.as_ref().map(|c| c.destination)
    }

    // ------------------------------------------------------------------
    // Sight cache
    // ------------------------------------------------------------------

    /// Cached visibility, only if computed for exactly this position pair.
    pub fn cached_sight(&self, from: Position, to: Position) -> Option<bool> {
        self.sight
            .filter(|c| c.from == from && c.to == to)
            .map(|c| c.visible)
    }

    pub fn store_sight(&mut self, from: Position, to: Position, visible: bool) {
        self.sight = Some(SightCache { from, to, visible });
    }

    pub fn invalidate_sight(&mut self) {
        self.sight = None;
    }
}

impl Default for EnemyMemory {
    fn default() -> Self {
        Self::new(Position::ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn turn_start_ages_and_expires() {
        let mut m = EnemyMemory::new(Position::ORIGIN);
        m.investigate_position = Some(Position::new(3, 3));
        m.investigate_turns = 2;
        m.establish_ambush(Position::new(1, 1), Some(1));
        m.alerted_by_ally = true;

        m.on_turn_start();
        assert_eq!(m.turns_since_target_seen, 1);
        assert_eq!(m.investigate_position, Some(Position::new(3, 3)));
        assert_eq!(m.ambush_position, None);
        assert!(m.ambush_established);
        assert!(m.alerted_by_ally);

        m.on_turn_start();
        assert_eq!(m.investigate_position, None);
        assert!(!m.alerted_by_ally);
    }

    #[test]
    fn counters_saturate() {
        let mut m = EnemyMemory::default();
        m.turns_since_target_seen = COUNTER_CAP;
        m.on_turn_start();
        assert_eq!(m.turns_since_target_seen, COUNTER_CAP);
        assert_eq!(m.turns_since_reinforcements, COUNTER_CAP);
    }

    #[test]
    fn ally_alert_raises_and_caps() {
        let mut m = EnemyMemory::default();
        m.set_alert(70);
        m.alert_to_position(Position::new(5, 5), 8);
        assert_eq!(m.alert_level(), 100);
        assert!(m.alerted_by_ally);
        assert_eq!(m.investigate_position, Some(Position::new(5, 5)));
        assert_eq!(m.investigate_turns, 8);
    }

    #[test]
    fn damage_and_sight_events() {
        let mut m = EnemyMemory::default();
        m.on_damaged(Position::new(4, 0));
        assert_eq!(m.alert_level(), 100);
        assert_eq!(m.last_known_target, Some(Position::new(4, 0)));
        m.on_target_seen(Position::new(5, 0));
        assert!(m.target_in_view);
        m.on_target_lost();
        assert!(!m.target_in_view);
        assert_eq!(m.last_known_target, Some(Position::new(5, 0)));
    }

    #[test]
    fn path_cache_is_keyed_on_destination_and_position() {
        let mut m = EnemyMemory::default();
        let route = vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];
        m.store_path(Position::new(2, 0), route);

        assert_eq!(
            m.cached_step(Position::new(0, 0), Position::new(2, 0)),
            Some(Position::new(1, 0))
        );
        assert_eq!(m.cached_step(Position::new(0, 0), Position::new(3, 0)), None);
        assert_eq!(m.cached_step(Position::new(0, 1), Position::new(2, 0)), None);

        m.consume_step();
        assert_eq!(
            m.cached_step(Position::new(1, 0), Position::new(2, 0)),
            Some(Position::new(2, 0))
        );
        m.consume_step();
        assert_eq!(m.cached_destination(), None);
    }

    #[test]
    fn sight_cache_is_keyed_on_both_positions() {
        let mut m = EnemyMemory::default();
        m.store_sight(Position::new(0, 0), Position::new(4, 4), true);
        assert_eq!(m.cached_sight(Position::new(0, 0), Position::new(4, 4)), Some(true));
        assert_eq!(m.cached_sight(Position::new(0, 0), Position::new(4, 5)), None);
        assert_eq!(m.cached_sight(Position::new(1, 0), Position::new(4, 4)), None);
        m.invalidate_sight();
        assert_eq!(m.cached_sight(Position::new(0, 0), Position::new(4, 4)), None);
    }

    #[test]
    fn waypoints_cycle() {
        let mut m = EnemyMemory::default();
        assert_eq!(m.current_waypoint(), None);
        m.patrol_waypoints = vec![Position::new(1, 1), Position::new(2, 2)];
        assert_eq!(m.current_waypoint(), Some(Position::new(1, 1)));
        m.advance_waypoint();
        m.advance_waypoint();
        assert_eq!(m.current_waypoint(), Some(Position::new(1, 1)));
    }

    proptest! {
        #[test]
        fn alert_stays_in_bounds(ops in prop::collection::vec((any::<bool>(), -500i32..500), 0..40)) {
            let mut m = EnemyMemory::default();
            for (raise, amount) in ops {
                if raise {
                    m.raise_alert(amount);
                } else {
                    m.lower_alert(amount);
                }
                prop_assert!((0..=MAX_ALERT).contains(&m.alert_level()));
            }
        }

        #[test]
        fn investigation_never_outlives_its_timer(turns in 0u32..20) {
            let mut m = EnemyMemory::default();
            m.investigate_position = Some(Position::new(2, 2));
            m.investigate_turns = turns;
            for _ in 0..turns.max(1) {
                m.on_turn_start();
            }
            prop_assert_eq!(m.investigate_position, None);
        }
    }
}
