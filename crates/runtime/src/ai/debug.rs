use std::fmt;

use ironclad_core::{EntityId, Position};
use serde::Serialize;

/// Snapshot of one enemy's decision state for overlays and logs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnemyDebugInfo {
    pub id: EntityId,
    pub archetype: &'static str,
    /// `(name, priority)` in evaluation order.
    pub behaviors: Vec<(String, i32)>,
    pub last_executed: Option<String>,
    pub alert_level: i32,
    pub last_known_target: Option<Position>,
    pub turns_since_target_seen: u32,
    pub investigate_position: Option<Position>,
    /// The investigate position came from an ally's call.
    pub alerted_by_ally: bool,
    pub guard_position: Option<Position>,
    pub ambush_position: Option<Position>,
    pub patrol_target: Option<Position>,
    pub home: Position,
}

fn opt(position: Option<Position>) -> String {
    position.map_or_else(|| "-".to_string(), |p| p.to_string())
}

impl fmt::Display for EnemyDebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{}] alert={} last={}",
            self.id,
            self.archetype,
            self.alert_level,
            self.last_executed.as_deref().unwrap_or("-")
        )?;
        let behaviors: Vec<String> = self
            .behaviors
            .iter()
            .map(|(name, priority)| format!("{name}:{priority}"))
            .collect();
        writeln!(f, "  behaviors {}", behaviors.join(" "))?;
        write!(
            f,
            "  target={} seen {} ago investigate={}{} guard={} ambush={} patrol={} home={}",
            opt(self.last_known_target),
            self.turns_since_target_seen,
            opt(self.investigate_position),
            if self.alerted_by_ally { "(ally)" } else { "" },
            opt(self.guard_position),
            opt(self.ambush_position),
            opt(self.patrol_target),
            self.home
        )
    }
}
