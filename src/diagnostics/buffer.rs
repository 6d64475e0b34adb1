// SPDX-License-Identifier: MPL-2.0
//! Bounded event history.

use std::collections::VecDeque;

pub use crate::domain::tuning::EventCapacity;

/// Keeps the most recent events, oldest first, and counts what it had to
/// throw away to stay within capacity.
#[derive(Debug, Clone)]
pub struct EventRing<T> {
    events: VecDeque<T>,
    limit: usize,
    evicted: u64,
}

impl<T> EventRing<T> {
    #[must_use]
    pub fn new(capacity: EventCapacity) -> Self {
        let limit = capacity.value().max(1);
        Self {
            events: VecDeque::with_capacity(limit),
            limit,
            evicted: 0,
        }
    }

    /// Appends `event`, returning the oldest one if it had to make room.
    pub fn push(&mut self, event: T) -> Option<T> {
        let evicted = if self.events.len() == self.limit {
            self.evicted += 1;
            self.events.pop_front()
        } else {
            None
        };
        self.events.push_back(event);
        evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// Events dropped since creation or the last [`clear`](Self::clear).
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.evicted = 0;
    }
}
