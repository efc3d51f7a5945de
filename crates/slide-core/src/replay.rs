//! Debounced, completion-driven replay of the move history.
//!
//! A layout change (the host resized, tiles were re-homed) schedules a
//! replay of every recorded move so the rendered positions walk back to
//! the logical arrangement under the new geometry. Bursts of layout
//! signals coalesce into one scheduled replay; once a replay is running,
//! further layout signals are ignored until the final animation reports
//! completion.
//!
//! Two buffers keep live play and replay apart: `pending` accumulates
//! moves as they are made, `queue` is the snapshot currently being
//! replayed. A record is never in both at once.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::board::MoveRecord;

/// Delay between the last layout-change signal and the replay starting.
pub const REPLAY_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where the scheduler currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No replay scheduled or running.
    Idle,
    /// A replay is scheduled; the delay restarts on every new signal.
    Debouncing,
    /// A replayed move's animation is in flight.
    Replaying,
}

#[derive(Debug, Default)]
pub(crate) struct ReplayScheduler {
    /// Moves recorded since the last snapshot, oldest first.
    pending: Vec<MoveRecord>,
    /// Snapshot being replayed, consumed front to back.
    queue: VecDeque<MoveRecord>,
    /// At most one scheduled replay; rescheduling overwrites it.
    deadline: Option<Instant>,
    /// Held from the debounce firing until the final completion signal.
    replaying: bool,
}

impl ReplayScheduler {
    pub(crate) fn state(&self) -> ReplayState {
        if self.replaying {
            ReplayState::Replaying
        } else if self.deadline.is_some() {
            ReplayState::Debouncing
        } else {
            ReplayState::Idle
        }
    }

    pub(crate) fn record(&mut self, record: MoveRecord) {
        self.pending.push(record);
    }

    pub(crate) fn pending(&self) -> &[MoveRecord] {
        &self.pending
    }

    #[cfg(test)]
    pub(crate) fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Handle a layout-change signal.
    ///
    /// Returns true when a replay was (re)scheduled, i.e. the caller
    /// should re-home its state. Signals are ignored while a replay is in
    /// flight, and when there is no history to resynchronize.
    pub(crate) fn on_layout_change(&mut self, now: Instant) -> bool {
        if self.replaying {
            return false;
        }
        if self.pending.is_empty() || !self.queue.is_empty() {
            return false;
        }
        // Overwriting the deadline cancels any earlier unfired timer, so
        // a burst of signals coalesces into one replay.
        self.deadline = Some(now + REPLAY_DEBOUNCE);
        true
    }

    /// Fire the debounce timer if it is due: snapshot `pending` into the
    /// queue and enter `Replaying`. Returns true when the caller should
    /// issue the first replay step.
    pub(crate) fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.replaying = true;
                if self.queue.is_empty() {
                    self.queue = self.pending.drain(..).collect();
                }
                true
            }
            _ => false,
        }
    }

    /// Pop the next queued record, or transition back to `Idle` when the
    /// queue has drained.
    pub(crate) fn next_step(&mut self) -> Option<MoveRecord> {
        let record = self.queue.pop_front();
        if record.is_none() {
            self.replaying = false;
        }
        record
    }
}
