//! Topic-based event bus implementation.

use serde::Serialize;
use tokio::sync::broadcast;

use super::types::{AiEvent, CombatEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub enum Topic {
    /// Scheduler turn boundaries
    Turn,
    /// Attacks, area effects and destruction
    Combat,
    /// Enemy decisions and alerts
    Ai,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    Turn(TurnEvent),
    Combat(CombatEvent),
    Ai(AiEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Combat(_) => Topic::Combat,
            Event::Ai(_) => Topic::Ai,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<TurnEvent> for Event {
    fn from(event: TurnEvent) -> Self {
        Event::Turn(event)
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<AiEvent> for Event {
    fn from(event: AiEvent) -> Self {
        Event::Ai(event)
    }
}

/// Topic-based event bus
///
/// Each topic has its own broadcast channel, so a consumer only receives
/// the events it subscribed to. Publishing never blocks; slow subscribers
/// lag and drop the oldest events.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    ai: broadcast::Sender<Event>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a bus with `capacity` buffered events per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turn: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
            ai: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Ai => &self.ai,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironclad_core::EntityId;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(TurnEvent::TurnStarted {
            turn: 1,
            tick: 1,
            actor: EntityId::PLAYER,
        });
        bus.publish(CombatEvent::ActorDestroyed {
            actor: EntityId(2),
            by: EntityId::PLAYER,
        });

        assert_eq!(turns.recv().await.unwrap().topic(), Topic::Turn);
        assert_eq!(combat.recv().await.unwrap().topic(), Topic::Combat);
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(Topic::Ai), 0);
        bus.publish(AiEvent::AmbushSprung {
            actor: EntityId(1),
            target: EntityId::PLAYER,
        });
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::from(CombatEvent::ActorDestroyed {
            actor: EntityId(4),
            by: EntityId::PLAYER,
        });
        let json = event.to_json().unwrap();
        assert_eq!(json, r#"{"Combat":{"ActorDestroyed":{"actor":4,"by":0}}}"#);
    }
}
