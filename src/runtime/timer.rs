//! Repeating timers driven by the event loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use playbar::{PollHandle, Scheduler};

#[derive(Debug)]
struct Timer {
    handle: PollHandle,
    interval: Duration,
    due: Instant,
}

#[derive(Debug, Default)]
struct TimerTable {
    next_id: u64,
    timers: Vec<Timer>,
}

/// A `Scheduler` that only records deadlines. The event loop asks it when
/// the next tick is due and fires the ticks itself.
///
/// Clones share one table, so the loop keeps a clone while the controller
/// owns the other.
#[derive(Debug, Default, Clone)]
pub struct IntervalScheduler {
    table: Rc<RefCell<TimerTable>>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest deadline among live timers.
    pub fn next_due(&self) -> Option<Instant> {
        self.table.borrow().timers.iter().map(|t| t.due).min()
    }

    /// Number of live timers.
    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.table.borrow().timers.len()
    }

    /// Advance every timer that is due at `now` and return how many fired.
    /// A timer that fell several intervals behind fires once.
    pub fn take_due(&self, now: Instant) -> usize {
        let mut table = self.table.borrow_mut();
        let mut fired = 0;
        for timer in table.timers.iter_mut().filter(|t| t.due <= now) {
            timer.due = now + timer.interval;
            fired += 1;
        }
        fired
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> PollHandle {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let handle = PollHandle(table.next_id);
        table.timers.push(Timer {
            handle,
            interval,
            due: Instant::now() + interval,
        });
        handle
    }

    fn cancel(&mut self, handle: PollHandle) {
        self.table.borrow_mut().timers.retain(|t| t.handle != handle);
    }
}
