use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

use crate::error::{Result, SimError};
use crate::traits::SimTime;

/// Returned by [`Scheduler::to_expire`] when nothing is pending.
pub const NEVER_EXPIRE: SimTime = f64::INFINITY;

struct Item<A> {
    due: SimTime,
    seq: u64,
    action: A,
}

// Ordered by due time, ties broken by insertion sequence.
impl<A> PartialEq for Item<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<A> Eq for Item<A> {}
impl<A> PartialOrd for Item<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<A> Ord for Item<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Virtual-time priority timer.
///
/// Items fire in non-decreasing due time, equal due times in insertion
/// order. While an item fires, [`time`](Self::time) reports that item's own
/// due time so reentrant scheduling lands at the right instant.
pub struct Scheduler<A> {
    last: SimTime,
    ongoing: Option<SimTime>,
    items: BinaryHeap<Reverse<Item<A>>>,
    next_seq: u64,
    fired: u64,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            last: 0.0,
            ongoing: None,
            items: BinaryHeap::new(),
            next_seq: 0,
            fired: 0,
        }
    }

    pub fn time(&self) -> SimTime {
        self.ongoing.unwrap_or(self.last)
    }

    /// Schedules `action` at absolute time `at`, which must lie strictly in
    /// the future.
    pub fn add(&mut self, at: SimTime, action: A) -> Result<()> {
        let now = self.time();
        // written this way round so NaN is rejected too
        if !(at > now) {
            return Err(SimError::ScheduleInPast { at, now });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.push(Reverse(Item { due: at, seq, action }));
        Ok(())
    }

    pub fn after(&mut self, delay: SimTime, action: A) -> Result<()> {
        self.add(self.time() + delay, action)
    }

    /// Moves the clock forward by `duration`, firing every item due within
    /// the new window through `fire`.
    ///
    /// `fire` receives the scheduler itself, so it may add items; those are
    /// considered before `advance` returns. On error the clock stays at the
    /// due time of the failing item.
    pub fn advance<F>(&mut self, duration: SimTime, fire: F) -> Result<()>
    where
        F: FnMut(&mut Self, A) -> Result<()>,
    {
        let from = self.time();
        let to = self.last + duration;
        if !(duration >= 0.0) {
            return Err(SimError::BackwardAdvance { from, to });
        }
        self.fire_until(to, fire)
    }

    /// Like [`advance`](Self::advance), to an absolute time strictly after
    /// the current one.
    pub fn advance_to<F>(&mut self, to: SimTime, fire: F) -> Result<()>
    where
        F: FnMut(&mut Self, A) -> Result<()>,
    {
        let from = self.time();
        if !(from < to) {
            return Err(SimError::BackwardAdvance { from, to });
        }
        self.fire_until(to, fire)
    }

    fn fire_until<F>(&mut self, to: SimTime, mut fire: F) -> Result<()>
    where
        F: FnMut(&mut Self, A) -> Result<()>,
    {
        while self.items.peek().map_or(false, |Reverse(item)| item.due <= to) {
            let Some(Reverse(item)) = self.items.pop() else { break };
            self.ongoing = Some(item.due);
            self.fired += 1;
            trace!(due = item.due, seq = item.seq, "firing");
            if let Err(e) = fire(self, item.action) {
                self.last = item.due;
                self.ongoing = None;
                return Err(e);
            }
        }

        self.ongoing = None;
        self.last = to;
        Ok(())
    }

    /// Earliest pending due time, or [`NEVER_EXPIRE`].
    pub fn to_expire(&self) -> SimTime {
        self.items
            .peek()
            .map_or(NEVER_EXPIRE, |Reverse(item)| item.due)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of items fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
