use ironclad_core::{EntityId, Position};

use super::debug::EnemyDebugInfo;
use super::memory::EnemyMemory;
use super::selector::BehaviorSelector;

/// Everything an enemy carries between turns: its behaviors, its memory,
/// and which behavior acted last.
pub struct EnemyBrain {
    pub archetype: &'static str,
    pub selector: BehaviorSelector,
    pub memory: EnemyMemory,
    pub last_executed: Option<String>,
}

impl EnemyBrain {
    pub fn new(archetype: &'static str, selector: BehaviorSelector, home: Position) -> Self {
        Self {
            archetype,
            selector,
            memory: EnemyMemory::new(home),
            last_executed: None,
        }
    }

    pub fn with_memory(mut self, configure: impl FnOnce(&mut EnemyMemory)) -> Self {
        configure(&mut self.memory);
        self
    }

    pub fn debug_info(&mut self, id: EntityId) -> EnemyDebugInfo {
        EnemyDebugInfo {
            id,
            archetype: self.archetype,
            behaviors: self.selector.priorities(),
            last_executed: self.last_executed.clone(),
            alert_level: self.memory.alert_level(),
            last_known_target: self.memory.last_known_target,
            turns_since_target_seen: self.memory.turns_since_target_seen,
            investigate_position: self.memory.investigate_position,
            alerted_by_ally: self.memory.alerted_by_ally,
            guard_position: self.memory.guard_position,
            ambush_position: self.memory.ambush_position,
            patrol_target: self.memory.patrol_target.or(self.memory.current_waypoint()),
            home: self.memory.home,
        }
    }
}
