//! Virtual-clock timer queue
//!
//! Everything in a page runs on one thread: event handlers mutate state
//! synchronously and delayed work (the pulse reset) is queued here. The
//! host decides how time passes: the dev server feeds it wall-clock time,
//! tests and scripts advance it by hand.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Deferred unit of work
pub type Task = Box<dyn FnOnce() + Send>;

/// Handle returned by [`Scheduler::schedule`], used to cancel a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Single-threaded timer queue driven by an explicit clock
#[derive(Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), Task>,
    deadlines: HashMap<u64, Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired or been cancelled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run `task` once `delay` has elapsed on this scheduler's clock
    pub fn schedule<F: FnOnce() + Send + 'static>(&mut self, delay: Duration, task: F) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;

        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, seq), Box::new(task));
        self.deadlines.insert(seq, deadline);
        TimerHandle(seq)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.queue.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    /// Move the clock forward by `by`, running every timer that comes due
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now.saturating_add(by);
        self.advance_to(target)
    }

    /// Move the clock to `target`. Returns how many timers fired.
    ///
    /// The clock never runs backwards; an earlier `target` is ignored.
    pub fn advance_to(&mut self, target: Duration) -> usize {
        if target < self.now {
            return 0;
        }

        let mut fired = 0;
        while let Some(entry) = self.queue.first_entry() {
            let (deadline, seq) = *entry.key();
            if deadline > target {
                break;
            }
            let task = entry.remove();
            self.deadlines.remove(&seq);
            self.now = deadline;
            task();
            fired += 1;
        }

        self.now = target;
        fired
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_task = Arc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let log = Arc::clone(&log_task);
            Box::new(move || log.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_fires_only_when_due() {
        let (log, task) = recorder();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(500), task("reset"));

        assert_eq!(scheduler.advance(Duration::from_millis(499)), 0);
        assert!(log.lock().unwrap().is_empty());

        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["reset"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_deadline_then_schedule_order() {
        let (log, task) = recorder();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(30), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("first"));
        scheduler.schedule(Duration::from_millis(10), task("second"));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let (log, task) = recorder();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(500), task("reset"));

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        scheduler.advance(Duration::from_secs(1));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let (_log, task) = recorder();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(Duration::ZERO, task("now"));
        scheduler.advance(Duration::ZERO);
        assert!(!scheduler.cancel(handle));
    }

    #[test]
    fn test_clock_does_not_run_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(Duration::from_millis(200));
        assert_eq!(scheduler.advance_to(Duration::from_millis(100)), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(200));
    }
}
