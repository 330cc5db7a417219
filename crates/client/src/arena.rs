//! Demo skirmish map and roster.
use ironclad_core::{DamageType, EntityId, Position, TileGrid, WeaponStats};
use ironclad_runtime::{Actor, EnemyBrain, Faction, Loadout, Runtime, RuntimeBuilder, presets};

const LAYOUT: &str = "\
####################
#..................#
#..####.......=....#
#..#..........=....#
#..#....\"\"....=....#
#.......\"\".........#
#..................#
#....=====.....#...#
#..............#...#
#..####........#...#
#..................#
####################";

pub const PLAYER_START: Position = Position::new(2, 1);

fn rifle() -> WeaponStats {
    WeaponStats::new(5, 9, DamageType::Kinetic).with_accuracy(70)
}

/// Builder preloaded with the arena, a rifle-armed player and one of each
/// enemy archetype.
pub fn builder() -> RuntimeBuilder {
    let player = Actor::player(PLAYER_START)
        .with_integrity(60)
        .with_shield(10)
        .with_ranged(rifle());

    let mut builder = Runtime::builder(TileGrid::from_ascii(LAYOUT)).player(player);

    let patrol_route = vec![
        Position::new(12, 10),
        Position::new(4, 10),
        Position::new(4, 6),
        Position::new(12, 6),
    ];
    let roster = [
        ("grunt", Position::new(10, 5), presets::grunt as fn(Position) -> EnemyBrain),
        ("sentry", Position::new(17, 3), presets::sentry),
        ("ambusher", Position::new(5, 8), presets::ambusher),
    ];
    for (name, home, brain) in roster {
        let id = builder.next_enemy_id();
        builder = builder.enemy(hostile(id, name, home), brain(home));
    }

    let id = builder.next_enemy_id();
    let home = Position::new(12, 10);
    builder = builder.enemy(hostile(id, "patroller", home), presets::patroller(home, patrol_route));

    let id = builder.next_enemy_id();
    let home = Position::new(17, 9);
    let mut coward = hostile(id, "spotter", home).with_speed(120);
    coward.loadout = Loadout {
        ranged: Some(WeaponStats::new(3, 6, DamageType::Thermal)),
        ..Loadout::default()
    };
    builder.enemy(coward, presets::coward(home))
}

fn hostile(id: EntityId, name: &str, position: Position) -> Actor {
    Actor::new(id, name, Faction::Hostile, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironclad_core::GridOracle;

    #[test]
    fn roster_spawns_on_floor() {
        let runtime = builder().build().unwrap();
        let world = runtime.world();
        assert_eq!(world.hostiles().count(), 5);
        for actor in world.actors() {
            assert!(world.grid().is_walkable(actor.position), "{} on a wall", actor.name);
        }
        assert_eq!(runtime.scheduler().len(), 6);
    }

    #[test]
    fn enemies_report_their_archetypes() {
        let mut runtime = builder().build().unwrap();
        let mut archetypes: Vec<_> = runtime
            .enemy_debug_all()
            .into_iter()
            .map(|info| info.archetype)
            .collect();
        archetypes.sort_unstable();
        assert_eq!(archetypes, ["ambusher", "coward", "grunt", "patroller", "sentry"]);
    }
}
