// SPDX-License-Identifier: MPL-2.0
//! Cooperative frame scheduler.
//!
//! Everything in the sheet runs on one thread, one animation frame at a
//! time. The scheduler holds keyed tasks that fire on a later frame:
//!
//! - [`FrameScheduler::schedule_if_absent`] coalesces: while a task for a
//!   key is pending, further requests are no-ops and the caller just
//!   updates whatever value the task will read when it fires.
//! - [`FrameScheduler::schedule_after`] is a delayed single-shot that
//!   supersedes any pending task with the same key.
//!
//! Tasks are plain keys; the owner keeps the payloads and decides what a
//! key means when [`FrameScheduler::advance`] hands it back.

#[derive(Debug, Clone)]
struct Pending<K> {
    key: K,
    frames_left: u32,
}

/// Keyed single-thread task queue driven by frame ticks.
#[derive(Debug, Clone)]
pub struct FrameScheduler<K> {
    // Insertion order is firing order within a frame.
    pending: Vec<Pending<K>>,
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> FrameScheduler<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` for the next frame unless it is already pending.
    ///
    /// Returns true if a new task was queued.
    pub fn schedule_if_absent(&mut self, key: K) -> bool {
        if self.is_pending(&key) {
            return false;
        }
        self.pending.push(Pending {
            key,
            frames_left: 1,
        });
        true
    }

    /// Schedules `key` to fire after `frames` frames, replacing any pending
    /// task with the same key.
    pub fn schedule_after(&mut self, key: K, frames: u32) {
        self.cancel(&key);
        self.pending.push(Pending {
            key,
            frames_left: frames.max(1),
        });
    }

    /// Drops the pending task for `key`. Returns true if there was one.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.key != *key);
        self.pending.len() != before
    }

    /// Drops every pending task matching `predicate`.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) {
        self.pending.retain(|p| !predicate(&p.key));
    }

    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.iter().any(|p| p.key == *key)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Ticks one frame and returns the keys that are now due, in the
    /// order they were scheduled.
    pub fn advance(&mut self) -> Vec<K> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            if p.frames_left <= 1 {
                due.push(p.key.clone());
                false
            } else {
                p.frames_left -= 1;
                true
            }
        });
        due
    }

    /// Removes and returns every pending key regardless of delay.
    pub fn drain_all(&mut self) -> Vec<K> {
        self.pending.drain(..).map(|p| p.key).collect()
    }
}
