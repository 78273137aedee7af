//! Quiet-interval debouncing for typed search input.
//!
//! Each keystroke replaces the pending text and restarts the interval. A tick
//! at or past the deadline releases the text exactly once.

use std::time::{Duration, Instant};

/// Default quiet interval before a typed query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Records `text` typed at `at`, superseding anything pending.
    pub fn input(&mut self, text: impl Into<String>, at: Instant) {
        self.pending = Some((text.into(), at));
    }

    /// When the pending text becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.interval)
    }

    /// Releases the pending text if the quiet interval has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self.deadline().is_some_and(|deadline| now >= deadline);
        if due {
            self.pending.take().map(|(text, _)| text)
        } else {
            None
        }
    }

    /// Drops the pending text without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_interval() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.input("a", start);
        debouncer.input("al", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(700)),
            Some("al".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn cancel_discards_pending_text() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.input("heat", start);
        debouncer.cancel();
        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }
}
