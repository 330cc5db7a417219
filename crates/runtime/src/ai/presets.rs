//! Ready-made enemy archetypes.

use ironclad_behavior::{PriorityBand, PrioritySelectorBuilder};
use ironclad_core::Position;

use super::behaviors::{
    AlertOnNoise, Ambush, CallForHelp, Chase, Flee, Guard, Investigate, MeleeAttack, Patrol,
    PatrolMode, RangedAttack, Wander,
};
use super::brain::EnemyBrain;
use super::context::BehaviorContext;

type Builder = PrioritySelectorBuilder<BehaviorContext>;

fn fighter() -> Builder {
    Builder::new()
        .with(MeleeAttack::default())
        .with(RangedAttack::default())
}

/// Line infantry: fights, chases, calls for help, roams near home.
pub fn grunt(home: Position) -> EnemyBrain {
    let selector = fighter()
        .with(CallForHelp::default())
        .with(AlertOnNoise::default())
        .with(Chase::default())
        .with(Investigate::default())
        .with(Patrol::new(PatrolMode::Random))
        .with(Wander::default())
        .build();
    EnemyBrain::new("grunt", selector.into(), home)
}

/// Holds its spawn point and only engages what comes close.
pub fn sentry(home: Position) -> EnemyBrain {
    let guard = Guard::default();
    let leash = guard.guard_radius + guard.chase_radius;
    let selector = fighter()
        .with(guard)
        .with(AlertOnNoise::default())
        .guarded(Chase::default(), move |ctx: &BehaviorContext| {
            ctx.distance_to(ctx.memory.home) <= leash
        })
        .build();
    EnemyBrain::new("sentry", selector.into(), home)
        .with_memory(|memory| memory.guard_position = Some(home))
}

/// Waits motionless at its spawn point until the target walks into range.
pub fn ambusher(home: Position) -> EnemyBrain {
    let selector = fighter()
        .with(Ambush::default())
        .with(Chase::default())
        .with(Investigate::default())
        .with(Patrol::new(PatrolMode::ReturnHome))
        .build();
    EnemyBrain::new("ambusher", selector.into(), home)
}

/// Walks a fixed route, raising the alarm on contact.
pub fn patroller(home: Position, waypoints: Vec<Position>) -> EnemyBrain {
    let selector = fighter()
        .with(CallForHelp::default())
        .with(AlertOnNoise::default())
        .with(Chase::default())
        .with(Investigate::default())
        .with(Patrol::new(PatrolMode::Waypoint))
        .with(Wander::default())
        .build();
    EnemyBrain::new("patroller", selector.into(), home)
        .with_memory(|memory| memory.patrol_waypoints = waypoints)
}

/// Calls for help early and runs once hurt; only presses the attack while healthy.
pub fn coward(home: Position) -> EnemyBrain {
    let flee = Flee {
        health_threshold: 50,
        ..Flee::default()
    };
    let selector = fighter()
        .with(flee)
        .with_priority(CallForHelp::default(), PriorityBand::Emergency.at(5))
        .guarded(Chase::default(), |ctx: &BehaviorContext| {
            ctx.me.health_percent > 50
        })
        .with(Investigate::default())
        .with(Wander::default())
        .build();
    EnemyBrain::new("coward", selector.into(), home)
}
