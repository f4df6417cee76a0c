use std::collections::VecDeque;

use tracing::warn;

use super::Action;
use crate::config::CombatConfig;

/// FIFO backlog of pending actions. Insertion order is execution order and
/// exactly one action is dequeued per [`progress`] cycle.
///
/// The queue is unbounded by contract, but a backlog deeper than
/// [`CombatConfig::QUEUE_PRESSURE`] is logged once per crossing since a
/// combat script that outruns it is almost always enqueueing in a loop.
///
/// [`progress`]: crate::engine::CombatEngine::progress_combat
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
    pressure_logged: bool,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action to the tail. Never rejects.
    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
        if self.actions.len() > CombatConfig::QUEUE_PRESSURE {
            if !self.pressure_logged {
                warn!(
                    depth = self.actions.len(),
                    "action queue backlog is unusually deep"
                );
                self.pressure_logged = true;
            }
        } else {
            self.pressure_logged = false;
        }
    }

    /// Removes and returns the head action.
    pub fn dequeue(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Drops every pending action. Used when combat exits.
    pub fn clear(&mut self) {
        self.actions.clear();
        self.pressure_logged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EndTurnAction;

    #[test]
    fn dequeues_in_insertion_order() {
        let mut queue = ActionQueue::new();
        queue.enqueue(EndTurnAction.into());
        queue.enqueue(EndTurnAction.into());
        assert_eq!(queue.len(), 2);
        assert!(queue.dequeue().is_some());
        assert_eq!(queue.len(), 1);
        assert!(queue.dequeue().is_some());
        assert!(queue.dequeue().is_none());
    }
}
