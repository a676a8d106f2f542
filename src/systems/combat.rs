//! Player melee attack against chasers.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::debug;

use crate::components::{Chaser, Position};
use crate::constants::PLAYER_ATTACK_DISTANCE;
use crate::events::{EventQueue, GameEvent};

/// Defeat every active chaser closer than `PLAYER_ATTACK_DISTANCE` on the floor
/// plane. Emits `ChaserDefeated` per hit, then `AllChasersDefeated` if the
/// attack took out the last active chaser. Returns the number defeated.
pub fn player_attack(world: &mut World, player: Entity, events: &mut EventQueue) -> usize {
    puffin::profile_function!();

    let Ok(player_pos) = world.get::<&Position>(player).map(|p| p.0) else {
        return 0;
    };
    let target = Vec2::new(player_pos.x, player_pos.z);

    let mut defeated = 0;
    for (entity, (pos, chaser)) in world.query_mut::<(&Position, &mut Chaser)>() {
        if !chaser.active {
            continue;
        }
        if Vec2::new(pos.0.x, pos.0.z).distance(target) < PLAYER_ATTACK_DISTANCE {
            chaser.active = false;
            defeated += 1;
            events.push(GameEvent::ChaserDefeated { chaser: entity });
        }
    }

    if defeated > 0 {
        let remaining = living_chasers(world);
        debug!(defeated, remaining, "player_attack_hit");
        if remaining == 0 {
            events.push(GameEvent::AllChasersDefeated);
        }
    }
    defeated
}

/// Chasers that have not been defeated.
pub fn living_chasers(world: &World) -> usize {
    world.query::<&Chaser>().iter().filter(|(_, chaser)| chaser.active).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Player;
    use glam::Vec3;

    fn spawn_chaser(world: &mut World, x: f32, z: f32) -> Entity {
        world.spawn((Position(Vec3::new(x, 0.5, z)), Chaser::default()))
    }

    fn setup() -> (World, Entity) {
        let mut world = World::new();
        let player = world.spawn((Player, Position(Vec3::new(0.0, 1.8, 0.0))));
        (world, player)
    }

    #[test]
    fn test_attack_defeats_chaser_in_range() {
        let (mut world, player) = setup();
        let near = spawn_chaser(&mut world, 3.9, 0.0);
        let far = spawn_chaser(&mut world, 0.0, 4.1);
        let mut events = EventQueue::new();

        assert_eq!(player_attack(&mut world, player, &mut events), 1);

        assert!(!world.get::<&Chaser>(near).unwrap().active);
        assert!(world.get::<&Chaser>(far).unwrap().active);
        assert_eq!(events.drain().collect::<Vec<_>>(), vec![GameEvent::ChaserDefeated { chaser: near }]);
        assert_eq!(living_chasers(&world), 1);
    }

    #[test]
    fn test_attack_range_is_strict() {
        let (mut world, player) = setup();
        let edge = spawn_chaser(&mut world, 4.0, 0.0);
        let mut events = EventQueue::new();

        assert_eq!(player_attack(&mut world, player, &mut events), 0);
        assert!(world.get::<&Chaser>(edge).unwrap().active);
        assert!(events.is_empty());
    }

    #[test]
    fn test_last_chaser_defeated_wins() {
        let (mut world, player) = setup();
        let first = spawn_chaser(&mut world, 2.0, 0.0);
        let second = spawn_chaser(&mut world, 10.0, 0.0);
        let mut events = EventQueue::new();

        player_attack(&mut world, player, &mut events);
        assert!(!events.drain().any(|e| e == GameEvent::AllChasersDefeated));

        world.get::<&mut Position>(player).unwrap().0 = Vec3::new(9.0, 1.8, 0.0);
        assert_eq!(player_attack(&mut world, player, &mut events), 1);
        assert_eq!(
            events.drain().collect::<Vec<_>>(),
            vec![GameEvent::ChaserDefeated { chaser: second }, GameEvent::AllChasersDefeated]
        );
        assert!(!world.get::<&Chaser>(first).unwrap().active);
        assert_eq!(living_chasers(&world), 0);
    }

    #[test]
    fn test_defeated_chaser_not_hit_twice() {
        let (mut world, player) = setup();
        spawn_chaser(&mut world, 1.0, 1.0);
        let mut events = EventQueue::new();

        assert_eq!(player_attack(&mut world, player, &mut events), 1);
        events.drain().for_each(drop);
        assert_eq!(player_attack(&mut world, player, &mut events), 0);
        assert!(events.is_empty());
    }
}
