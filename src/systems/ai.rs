//! Chaser behavior: walk straight at the player once they are in sight.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use crate::components::{Chaser, Collider, Position};
use crate::events::{EventQueue, GameEvent};
use crate::level::Level;
use crate::systems::movement::resolve;

/// Step every active chaser toward the player and report catches.
///
/// Distance is measured on the floor plane before the step. A chaser closer
/// than its own collider radius has caught the player. Returns the number of
/// chasers still active, or 0 when the player entity is gone.
pub fn update_chasers(world: &mut World, level: &Level, player: Entity, dt: f32, events: &mut EventQueue) -> usize {
    puffin::profile_function!();

    let Ok(player_pos) = world.get::<&Position>(player).map(|p| p.0) else {
        return 0;
    };
    let target = Vec2::new(player_pos.x, player_pos.z);

    let mut living = 0;
    for (entity, (pos, collider, chaser)) in world.query_mut::<(&mut Position, &Collider, &Chaser)>() {
        if entity == player || !chaser.active {
            continue;
        }
        living += 1;

        let to_player = target - Vec2::new(pos.0.x, pos.0.z);
        let distance = to_player.length();

        if distance < chaser.sight && distance > f32::EPSILON {
            let step = to_player / distance * chaser.speed * dt;
            pos.0 = resolve(level, pos.0, Vec3::new(step.x, 0.0, step.y), collider.radius);
        }

        if distance < collider.radius {
            events.push(GameEvent::PlayerCaught { chaser: entity });
        }
    }
    living
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Player;
    use crate::grid::Grid;
    use crate::tile::tile_codes::*;
    use crate::tile::WallFlagTable;

    fn open_room() -> Level {
        let grid = Grid::from_rows(&[&[OPEN; 6], &[OPEN; 6], &[OPEN; 6], &[OPEN; 6], &[OPEN; 6], &[OPEN; 6]]);
        Level::from_parts(grid, WallFlagTable::default(), 3.0)
    }

    fn spawn_player(world: &mut World, x: f32, z: f32) -> Entity {
        world.spawn((Player, Position(Vec3::new(x, 0.0, z)), Collider::player()))
    }

    #[test]
    fn test_chaser_steps_toward_player() {
        let level = open_room();
        let mut world = World::new();
        let player = spawn_player(&mut world, 4.5, 4.5);
        let chaser = world.spawn((Position(Vec3::new(10.5, 0.0, 4.5)), Collider::chaser(), Chaser::default()));
        let mut events = EventQueue::new();

        let living = update_chasers(&mut world, &level, player, 0.5, &mut events);

        assert_eq!(living, 1);
        let pos = world.get::<&Position>(chaser).unwrap().0;
        assert!((pos.x - 9.5).abs() < 1e-5);
        assert_eq!(pos.z, 4.5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_chaser_out_of_sight_stays_put() {
        let level = open_room();
        let mut world = World::new();
        let player = spawn_player(&mut world, 1.5, 1.5);
        let chaser = world.spawn((
            Position(Vec3::new(16.5, 0.0, 16.5)),
            Collider::chaser(),
            Chaser::new(5.0, 2.0),
        ));
        let mut events = EventQueue::new();

        update_chasers(&mut world, &level, player, 1.0, &mut events);

        assert_eq!(world.get::<&Position>(chaser).unwrap().0, Vec3::new(16.5, 0.0, 16.5));
    }

    #[test]
    fn test_chaser_catches_player() {
        let level = open_room();
        let mut world = World::new();
        let player = spawn_player(&mut world, 4.5, 4.5);
        let chaser = world.spawn((Position(Vec3::new(4.8, 0.0, 4.5)), Collider::chaser(), Chaser::default()));
        let mut events = EventQueue::new();

        update_chasers(&mut world, &level, player, 0.01, &mut events);

        assert_eq!(events.drain().collect::<Vec<_>>(), vec![GameEvent::PlayerCaught { chaser }]);
    }

    #[test]
    fn test_chaser_stopped_by_wall() {
        // Chaser stands in a tile walled on its left, player beyond the wall
        let grid = Grid::from_rows(&[&[OPEN, OPEN, WALL_LEFT, OPEN]]);
        let level = Level::from_parts(grid, WallFlagTable::default(), 3.0);
        let mut world = World::new();
        let player = spawn_player(&mut world, 1.5, 1.5);
        let chaser = world.spawn((Position(Vec3::new(6.6, 0.0, 1.5)), Collider::chaser(), Chaser::default()));
        let mut events = EventQueue::new();

        for _ in 0..10 {
            update_chasers(&mut world, &level, player, 0.1, &mut events);
        }

        let pos = world.get::<&Position>(chaser).unwrap().0;
        assert!(pos.x >= 6.5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_missing_player_is_noop() {
        let level = open_room();
        let mut world = World::new();
        let player = spawn_player(&mut world, 1.5, 1.5);
        let chaser = world.spawn((Position(Vec3::new(4.5, 0.0, 1.5)), Collider::chaser(), Chaser::default()));
        world.despawn(player).unwrap();
        let mut events = EventQueue::new();

        assert_eq!(update_chasers(&mut world, &level, player, 1.0, &mut events), 0);

        assert_eq!(world.get::<&Position>(chaser).unwrap().0.x, 4.5);
    }

    #[test]
    fn test_inactive_chaser_is_ignored() {
        let level = open_room();
        let mut world = World::new();
        let player = spawn_player(&mut world, 4.5, 4.5);
        let mut defeated = Chaser::default();
        defeated.active = false;
        let chaser = world.spawn((Position(Vec3::new(4.7, 0.0, 4.5)), Collider::chaser(), defeated));
        world.spawn((Position(Vec3::new(16.5, 0.0, 16.5)), Collider::chaser(), Chaser::default()));
        let mut events = EventQueue::new();

        let living = update_chasers(&mut world, &level, player, 0.5, &mut events);

        assert_eq!(living, 1);
        assert!(events.is_empty());
        assert_eq!(world.get::<&Position>(chaser).unwrap().0.x, 4.7);
    }
}
