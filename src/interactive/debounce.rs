use std::time::{Duration, Instant};

/// Cancellable one-shot timer. Scheduling while a deadline is pending
/// replaces it, so at most one fire happens per quiet period.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    pub fn schedule(&mut self, delay_ms: u64) {
        self.deadline = Some(Instant::now() + Duration::from_millis(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; the timer clears
    /// itself on firing.
    pub fn fire_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timer = DebounceTimer::new();
        timer.schedule(0);

        assert!(timer.fire_due());
        assert!(!timer.fire_due());
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_not_due_before_deadline() {
        let mut timer = DebounceTimer::new();
        timer.schedule(10_000);

        assert!(!timer.fire_due());
        assert!(timer.is_pending());
    }

    #[test]
    fn test_cancel_suppresses_fire() {
        let mut timer = DebounceTimer::new();
        timer.schedule(0);
        timer.cancel();

        assert!(!timer.fire_due());
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut timer = DebounceTimer::new();
        timer.schedule(0);
        timer.schedule(10_000);

        // The earlier deadline no longer exists.
        assert!(!timer.fire_due());

        timer.schedule(0);
        assert!(timer.fire_due());
        assert!(!timer.fire_due());
    }

    #[test]
    fn test_unscheduled_timer_never_fires() {
        let mut timer = DebounceTimer::new();
        assert!(!timer.fire_due());
    }
}
