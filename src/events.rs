//! Game event queue.
//!
//! Systems push events during an update; the host drains them at the end of
//! the frame and decides what to do (restart, show win/lose, play a sound).

use hecs::Entity;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A chaser got within its collider radius of the player
    PlayerCaught { chaser: Entity },
    /// A player attack defeated a chaser
    ChaserDefeated { chaser: Entity },
    /// The last active chaser was defeated
    AllChasersDefeated,
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_drain_empties_queue() {
        let mut world = World::new();
        let chaser = world.spawn(());
        let mut events = EventQueue::new();
        events.push(GameEvent::PlayerCaught { chaser });
        assert_eq!(events.len(), 1);

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(drained, vec![GameEvent::PlayerCaught { chaser }]);
        assert!(events.is_empty());
    }
}
