//! Deadline-based debouncing for search input.
//!
//! The event loop owns the clock: callers pass `Instant`s in, so the
//! debouncer itself never sleeps or spawns anything.

use std::time::{Duration, Instant};

/// Holds at most one pending value until its deadline passes.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, superseding anything still pending and restarting the timer.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due { self.cancel() } else { None }
    }

    /// Time left before the pending value is due (zero if overdue).
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(150);

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule("a", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(149)), None);
        assert_eq!(debouncer.poll(start + DELAY), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + DELAY * 2), None);
    }

    #[test]
    fn test_later_edit_supersedes_and_restarts() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule("w", start);
        debouncer.schedule("we", start + Duration::from_millis(100));
        // first deadline passed, but it was superseded
        assert_eq!(debouncer.poll(start + Duration::from_millis(200)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(250)),
            Some("we")
        );
    }

    #[test]
    fn test_cancel_and_time_until_due() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        assert_eq!(debouncer.time_until_due(start), None);
        debouncer.schedule(1, start);
        assert_eq!(
            debouncer.time_until_due(start + Duration::from_millis(50)),
            Some(Duration::from_millis(100))
        );
        assert_eq!(
            debouncer.time_until_due(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.poll(start + DELAY), None);
    }
}
