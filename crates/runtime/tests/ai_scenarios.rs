use ironclad_core::{Direction, EntityId, Position, TileGrid};
use ironclad_runtime::ai::AlertCause;
use ironclad_runtime::events::AiEvent;
use ironclad_runtime::{
    Actor, Event, Faction, PlayerAction, Runtime, ScriptedProvider, Topic, presets,
};
use tokio::sync::broadcast;

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<AiEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let Event::Ai(ai) = event {
            out.push(ai);
        }
    }
    out
}

fn hostile(id: u32, x: i32, y: i32) -> Actor {
    Actor::new(EntityId(id), format!("unit-{id}"), Faction::Hostile, Position::new(x, y))
}

fn walking_west() -> ScriptedProvider {
    ScriptedProvider::new([PlayerAction::Move(Direction::West)])
        .with_fallback(PlayerAction::Move(Direction::West))
}

async fn steps(runtime: &mut Runtime, n: usize) {
    for _ in 0..n {
        runtime.step().await.unwrap();
    }
}

#[tokio::test]
async fn call_for_help_reaches_allies_behind_walls() {
    let grid = TileGrid::from_ascii(
        "............\n............\n............\n............\n############\n............\n............",
    );
    let mut runtime = Runtime::builder(grid)
        .player(Actor::player(Position::new(8, 2)))
        .enemy(hostile(1, 5, 2), presets::grunt(Position::new(5, 2)))
        .enemy(hostile(2, 5, 6), presets::grunt(Position::new(5, 6)))
        .player_provider(ScriptedProvider::new([PlayerAction::Wait]))
        .build()
        .unwrap();
    let mut ai = runtime.subscribe(Topic::Ai);

    steps(&mut runtime, 2).await;

    let events = drain(&mut ai);
    assert!(events.contains(&AiEvent::CallForHelp {
        actor: EntityId(1),
        position: Position::new(8, 2),
        responders: vec![EntityId(2)],
    }));
    let ally = runtime.memory(EntityId(2)).unwrap();
    assert_eq!(ally.investigate_position, Some(Position::new(8, 2)));
    assert_eq!(ally.alert_level(), 50);
    assert!(ally.alerted_by_ally);
    assert!(runtime.enemy_debug(EntityId(2)).unwrap().alerted_by_ally);

    let caller = runtime.memory(EntityId(1)).unwrap();
    assert_eq!(caller.turns_since_reinforcements, 0);
}

#[tokio::test]
async fn ambusher_waits_then_springs_and_chases() {
    let mut runtime = Runtime::builder(TileGrid::open(12, 5))
        .player(Actor::player(Position::new(11, 2)))
        .enemy(hostile(1, 5, 2), presets::ambusher(Position::new(5, 2)))
        .player_provider(walking_west())
        .build()
        .unwrap();
    let mut ai = runtime.subscribe(Topic::Ai);

    steps(&mut runtime, 4).await;
    let debug = runtime.enemy_debug(EntityId(1)).unwrap();
    assert_eq!(debug.last_executed.as_deref(), Some("Ambush"));
    assert_eq!(debug.ambush_position, Some(Position::new(5, 2)));
    assert_eq!(debug.alert_level, 0);
    assert_eq!(runtime.world().actor(EntityId(1)).unwrap().position, Position::new(5, 2));

    steps(&mut runtime, 2).await;
    let events = drain(&mut ai);
    assert!(events.contains(&AiEvent::AmbushSprung {
        actor: EntityId(1),
        target: EntityId::PLAYER,
    }));
    let debug = runtime.enemy_debug(EntityId(1)).unwrap();
    assert_eq!(debug.alert_level, 100);
    assert_eq!(debug.last_executed.as_deref(), Some("Chase"));
    assert_eq!(runtime.world().actor(EntityId(1)).unwrap().position, Position::new(6, 2));
}

#[tokio::test]
async fn sentry_holds_post_until_intruder_closes_in() {
    let mut runtime = Runtime::builder(TileGrid::open(16, 5))
        .player(Actor::player(Position::new(10, 2)))
        .enemy(hostile(1, 2, 2), presets::sentry(Position::new(2, 2)))
        .player_provider(walking_west())
        .build()
        .unwrap();

    steps(&mut runtime, 4).await;
    let debug = runtime.enemy_debug(EntityId(1)).unwrap();
    assert_eq!(debug.last_executed.as_deref(), Some("Guard"));
    assert_eq!(runtime.world().actor(EntityId(1)).unwrap().position, Position::new(2, 2));

    steps(&mut runtime, 2).await;
    let debug = runtime.enemy_debug(EntityId(1)).unwrap();
    assert_eq!(debug.last_executed.as_deref(), Some("Chase"));
    assert_eq!(runtime.world().actor(EntityId(1)).unwrap().position, Position::new(3, 2));
    assert!(debug.behaviors.iter().any(|(name, p)| name == "Guard" && *p == 38));
}

#[tokio::test]
async fn footsteps_behind_a_wall_raise_alert() {
    let grid = TileGrid::from_ascii("......\n######\n......");
    let mut runtime = Runtime::builder(grid)
        .player(Actor::player(Position::new(2, 0)))
        .enemy(hostile(1, 2, 2), presets::grunt(Position::new(2, 2)))
        .player_provider(ScriptedProvider::new([PlayerAction::Move(Direction::East)]))
        .build()
        .unwrap();
    let mut ai = runtime.subscribe(Topic::Ai);

    steps(&mut runtime, 2).await;

    let events = drain(&mut ai);
    assert!(events.iter().any(|e| matches!(
        e,
        AiEvent::AlertRaised { actor, cause: AlertCause::Noise, level: 30 } if *actor == EntityId(1)
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        AiEvent::BehaviorExecuted { passed, .. } if passed.iter().any(|p| p == "AlertOnNoise")
    )));
    assert_eq!(runtime.memory(EntityId(1)).unwrap().alert_level(), 30);
}
