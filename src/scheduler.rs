//! Virtual-clock task queue.
//!
//! Staggered animations, overlay dismissal and simulated data ticks are all
//! expressed as tasks with a deadline in milliseconds. The queue never reads
//! a clock: callers pass the current time to [`TaskQueue::drain_due`], which
//! makes timed behavior testable without waiting.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Milliseconds since the start of the session.
pub type Millis = u64;

#[derive(Debug)]
struct Entry<T> {
    at: Millis,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.at, self.seq) == (other.at, other.seq)
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

/// Tasks ordered by deadline; equal deadlines run in scheduling order.
#[derive(Debug)]
pub struct TaskQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Run `task` at `at`.
    pub fn schedule_at(&mut self, at: Millis, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { at, seq, task }));
    }

    /// Run `task` `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, now: Millis, delay: Millis, task: T) {
        self.schedule_at(now.saturating_add(delay), task);
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: Millis) -> Vec<T> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|Reverse(e)| e.at <= now) {
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.task);
            }
        }
        due
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.heap.peek().map(|Reverse(e)| e.at)
    }

    /// Drop tasks that fail the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.heap.retain(|Reverse(e)| keep(&e.task));
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_deadline_order() {
        let mut q = TaskQueue::new();
        q.schedule_at(300, "c");
        q.schedule_at(100, "a");
        q.schedule_at(200, "b");

        assert_eq!(q.next_deadline(), Some(100));
        assert!(q.drain_due(99).is_empty());
        assert_eq!(q.drain_due(250), vec!["a", "b"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(10_000), vec!["c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut q = TaskQueue::new();
        for i in 0..5 {
            q.schedule_at(50, i);
        }
        assert_eq!(q.drain_due(50), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_schedule_after_and_retain() {
        let mut q = TaskQueue::new();
        q.schedule_after(1000, 3000, 1);
        q.schedule_after(1000, 10, 2);
        q.retain(|t| *t != 2);
        assert_eq!(q.next_deadline(), Some(4000));
        q.schedule_after(u64::MAX, 5, 3);
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
    }
}
