//! Axis-separated movement resolution and the player walk system.

use glam::Vec3;
use hecs::{Entity, World};

use crate::collision::is_blocked;
use crate::components::{Collider, PlayerController, Position};
use crate::level::Level;

/// Held movement keys for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Apply `delta` to `current`, testing x then z against the level.
///
/// Each axis is committed independently so an actor pushing diagonally into a
/// wall slides along it. The z test starts from the x-updated position.
/// Long deltas are split into sub-steps of at most `cell_size - radius` per
/// axis (a quarter cell for very large radii) so a single step never skips
/// past a wall edge. Vertical motion is never collision-tested.
pub fn resolve(level: &Level, current: Vec3, delta: Vec3, radius: f32) -> Vec3 {
    puffin::profile_function!();
    let max_step = (level.cell_size - radius).max(level.cell_size * 0.25);
    let longest = delta.x.abs().max(delta.z.abs());
    let steps = (longest / max_step).ceil().max(1.0) as u32;
    let step = Vec3::new(delta.x, 0.0, delta.z) / steps as f32;

    let mut pos = current;
    for _ in 0..steps {
        pos = resolve_step(level, pos, step, radius);
    }

    pos.y += delta.y;
    pos
}

fn resolve_step(level: &Level, current: Vec3, step: Vec3, radius: f32) -> Vec3 {
    let mut pos = current;

    if step.x != 0.0 {
        let candidate = Vec3::new(pos.x + step.x, pos.y, pos.z);
        if !is_blocked(level, pos, candidate, radius) {
            pos.x = candidate.x;
        }
    }

    if step.z != 0.0 {
        let candidate = Vec3::new(pos.x, pos.y, pos.z + step.z);
        if !is_blocked(level, pos, candidate, radius) {
            pos.z = candidate.z;
        }
    }

    pos
}

impl PlayerController {
    /// Horizontal facing vectors `(front, right)` for the current yaw.
    pub fn facing(&self) -> (Vec3, Vec3) {
        let yaw = self.yaw_degrees.to_radians();
        let front = Vec3::new(yaw.cos(), 0.0, yaw.sin());
        let right = front.cross(Vec3::Y).normalize_or_zero();
        (front, right)
    }

    /// Desired displacement for this frame, before collision.
    pub fn desired_delta(&self, input: MoveInput, dt: f32) -> Vec3 {
        let (front, right) = self.facing();

        let mut horizontal = Vec3::ZERO;
        if input.forward {
            horizontal += front;
        }
        if input.back {
            horizontal -= front;
        }
        if input.right {
            horizontal += right;
        }
        if input.left {
            horizontal -= right;
        }
        horizontal.y = 0.0;

        let mut movement = horizontal.normalize_or_zero();
        if input.up {
            movement.y += 1.0;
        }
        if input.down {
            movement.y -= 1.0;
        }

        movement * self.speed * dt
    }
}

/// Walk the player entity by its controller and input. Returns the new position,
/// or `None` when the entity is missing a required component.
pub fn move_player(world: &mut World, level: &Level, player: Entity, input: MoveInput, dt: f32) -> Option<Vec3> {
    let (pos, collider, controller) = world
        .query_one_mut::<(&mut Position, &Collider, &PlayerController)>(player)
        .ok()?;

    let delta = controller.desired_delta(input, dt);
    pos.0 = resolve(level, pos.0, delta, collider.radius);
    Some(pos.0)
}
