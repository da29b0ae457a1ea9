//! Deferred actions on the simulation clock.
//!
//! Staggered spawns, inter-wave delays and highlight timeouts all go
//! through one queue drained by the tick driver. Due times are simulation
//! seconds, so nothing fires while the game is paused.

use hecs::Entity;

use rampart_core::constants::TIMER_EPSILON;

/// Handle for cancelling a scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledAction {
    /// Materialise one enemy of a staggered wave.
    SpawnEnemy { wave: u32, base_health: f64 },
    /// Run the spawn controller for the current wave number.
    StartWave,
    /// Drop a tower's range highlight.
    ClearHighlight { tower: Entity },
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    due_at: f64,
    action: ScheduledAction,
}

/// Fire-once timer queue, ordered by due time then insertion.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire once the clock reaches `due_at`.
    pub fn schedule(&mut self, due_at: f64, action: ScheduledAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Equal due times keep insertion order.
        let index = self.entries.partition_point(|e| e.due_at <= due_at);
        self.entries.insert(index, Entry { id, due_at, action });
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return every action due at or before `now`, in order.
    pub fn drain_due(&mut self, now: f64) -> Vec<(TimerId, ScheduledAction)> {
        let split = self
            .entries
            .partition_point(|e| e.due_at <= now + TIMER_EPSILON);
        self.entries
            .drain(..split)
            .map(|e| (e.id, e.action))
            .collect()
    }

    pub fn pending_spawns(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.action, ScheduledAction::SpawnEnemy { .. }))
            .count()
    }

    pub fn wave_start_pending(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.action, ScheduledAction::StartWave))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(2.0, ScheduledAction::StartWave);
        s.schedule(
            1.0,
            ScheduledAction::SpawnEnemy {
                wave: 1,
                base_health: 1.0,
            },
        );
        s.schedule(
            0.0,
            ScheduledAction::SpawnEnemy {
                wave: 1,
                base_health: 2.0,
            },
        );

        let due: Vec<_> = s.drain_due(1.0).into_iter().map(|(_, a)| a).collect();
        assert_eq!(
            due,
            vec![
                ScheduledAction::SpawnEnemy {
                    wave: 1,
                    base_health: 2.0
                },
                ScheduledAction::SpawnEnemy {
                    wave: 1,
                    base_health: 1.0
                },
            ]
        );
        assert_eq!(s.len(), 1);
        assert!(s.wave_start_pending());
        assert_eq!(s.pending_spawns(), 0);
    }

    #[test]
    fn test_equal_due_times_keep_insertion_order() {
        let mut s = Scheduler::new();
        let first = s.schedule(1.0, ScheduledAction::StartWave);
        let second = s.schedule(
            1.0,
            ScheduledAction::SpawnEnemy {
                wave: 4,
                base_health: 2.0,
            },
        );
        let ids: Vec<_> = s.drain_due(1.0).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_float_drift_still_fires() {
        let mut s = Scheduler::new();
        s.schedule(1.0, ScheduledAction::StartWave);
        let mut now = 0.0;
        for _ in 0..60 {
            now += 1.0 / 60.0;
        }
        assert_eq!(s.drain_due(now).len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let id = s.schedule(5.0, ScheduledAction::StartWave);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.is_empty());
        assert!(s.drain_due(10.0).is_empty());
    }
}
