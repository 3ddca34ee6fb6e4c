// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred tasks on a virtual clock.
//!
//! The scheduler stands in for `setTimeout`: tasks are one-shot closures over the
//! document, due at `now + delay`. Time only moves when the owner calls
//! [`Scheduler::advance`] or [`Scheduler::run_until_idle`], which keeps transitions
//! reproducible in tests.
//!
//! There is no cancellation. Scheduling a second task for the same element while
//! the first is pending leaves both queued; whichever is due last decides the final
//! state.

use std::collections::BTreeMap;
use std::time::Duration;

use vitrine_dom::Document;

/// A deferred document mutation.
pub type Task = Box<dyn FnOnce(&mut Document)>;

/// Virtual-clock task queue.
#[derive(Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    // Keyed by (due time, scheduling order) so equal due times run FIFO.
    queue: BTreeMap<(Duration, u64), Task>,
}

impl core::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest queued task.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Queue `task` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: impl FnOnce(&mut Document) + 'static) {
        let key = (self.now.saturating_add(delay), self.next_seq);
        self.next_seq += 1;
        self.queue.insert(key, Box::new(task));
    }

    /// Move the clock forward by `by`, running every task that falls due on the way.
    ///
    /// Tasks run in due order; the clock reads each task's due time while it runs.
    /// Returns the number of tasks run.
    pub fn advance(&mut self, by: Duration, doc: &mut Document) -> usize {
        let until = self.now.saturating_add(by);
        let mut ran = 0;
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > until {
                break;
            }
            let ((due, _), task) = entry.remove_entry();
            self.now = due;
            task(doc);
            ran += 1;
        }
        self.now = until;
        ran
    }

    /// Run every queued task, advancing the clock to the last due time.
    pub fn run_until_idle(&mut self, doc: &mut Document) -> usize {
        match self.queue.keys().next_back() {
            Some(&(last, _)) => {
                let by = last.saturating_sub(self.now);
                self.advance(by, doc)
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_dom::ElementDesc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn tasks_run_only_once_due() {
        let mut doc = Document::new();
        let el = doc.insert(Some(doc.root()), ElementDesc::new("div"));
        let mut s = Scheduler::new();
        s.schedule(ms(50), move |d| d.add_class(el, "late"));
        assert_eq!(s.advance(ms(49), &mut doc), 0);
        assert!(!doc.has_class(el, "late"));
        assert_eq!(s.advance(ms(1), &mut doc), 1);
        assert!(doc.has_class(el, "late"));
        assert_eq!(s.now(), ms(50));
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn due_order_then_fifo() {
        let mut doc = Document::new();
        let el = doc.insert(Some(doc.root()), ElementDesc::new("div"));
        let mut s = Scheduler::new();
        s.schedule(ms(300), move |d| d.set_attribute(el, "data-step", "c"));
        s.schedule(ms(50), move |d| d.set_attribute(el, "data-step", "a"));
        s.schedule(ms(50), move |d| d.set_attribute(el, "data-step", "b"));
        assert_eq!(s.next_due(), Some(ms(50)));
        assert_eq!(s.advance(ms(100), &mut doc), 2);
        assert_eq!(doc.attribute(el, "data-step"), Some("b"), "FIFO among equal due times");
        assert_eq!(s.run_until_idle(&mut doc), 1);
        assert_eq!(doc.attribute(el, "data-step"), Some("c"));
        assert_eq!(s.now(), ms(300));
        assert_eq!(s.run_until_idle(&mut doc), 0);
    }

    #[test]
    fn delays_are_relative_to_schedule_time() {
        let mut doc = Document::new();
        let el = doc.insert(Some(doc.root()), ElementDesc::new("div"));
        let mut s = Scheduler::new();
        s.advance(ms(1000), &mut doc);
        s.schedule(ms(10), move |d| d.add_class(el, "x"));
        assert_eq!(s.next_due(), Some(ms(1010)));
        assert_eq!(s.run_until_idle(&mut doc), 1);
        assert!(doc.has_class(el, "x"));
    }
}
