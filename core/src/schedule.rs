use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Something the engine has asked to be woken up for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    SpawnBomb,
    Detonate(BombId),
    Clear(BombId),
}

impl TimerEvent {
    const fn is_bomb_timer(self) -> bool {
        matches!(self, Self::Detonate(_) | Self::Clear(_))
    }
}

/// Handle to a scheduled timer, ordered by due time and then by scheduling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId {
    due: Millis,
    seq: u64,
}

impl TimerId {
    pub fn due(&self) -> Millis {
        self.due
    }
}

/// Logical clock with a queue of one-shot timers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    now: Millis,
    next_seq: u64,
    pending: BTreeMap<TimerId, TimerEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.pending.keys().next().map(TimerId::due)
    }

    pub fn schedule(&mut self, delay: Millis, event: TimerEvent) -> TimerId {
        let id = TimerId {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(id, event);
        log::trace!("scheduled {:?} at {}ms", event, id.due);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> Option<TimerEvent> {
        self.pending.remove(&id)
    }

    /// Drops every pending detonation and clear, keeping the spawn tick.
    pub fn cancel_bomb_timers(&mut self) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, event| !event.is_bomb_timer());
        before - self.pending.len()
    }

    /// Removes the earliest timer due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<TimerEvent> {
        let entry = self.pending.first_entry()?;
        let due = entry.key().due;
        if due > until {
            return None;
        }
        let event = entry.remove();
        self.now = self.now.max(due);
        Some(event)
    }

    /// Moves the clock forward without firing anything; never moves it backwards.
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

/// Cancellable recurring task that keeps one pending tick on a [`Timeline`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PeriodicTask {
    period: Millis,
    event: TimerEvent,
    pending: Option<TimerId>,
}

impl PeriodicTask {
    pub fn new(period: Millis, event: TimerEvent) -> Self {
        Self {
            period,
            event,
            pending: None,
        }
    }

    pub fn period(&self) -> Millis {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules the next tick one period from now, replacing any pending tick.
    pub fn start(&mut self, timeline: &mut Timeline) {
        self.stop(timeline);
        self.pending = Some(timeline.schedule(self.period, self.event));
    }

    pub fn stop(&mut self, timeline: &mut Timeline) {
        if let Some(id) = self.pending.take() {
            timeline.cancel(id);
        }
    }

    /// Called after the task's tick fired; queues the following one.
    pub fn rearm(&mut self, timeline: &mut Timeline) {
        if self.pending.take().is_some() {
            self.pending = Some(timeline.schedule(self.period, self.event));
        }
    }
}
