//! Answer countdown driven by explicit ticks.
//!
//! There is no wall clock in here: whoever owns the engine calls `tick()`
//! once per second (a clock thread, a UI frame callback, or a test loop).

/// Result of advancing the countdown by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerStatus {
    /// No countdown is running.
    Inactive,
    /// Still running, with this many seconds left.
    Running(u32),
    /// The countdown went below zero.
    Expired,
}

/// Single countdown. Starting it again replaces the running one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    remaining: Option<i64>,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `seconds`, cancelling any running countdown.
    ///
    /// Returns `true` if a countdown was replaced.
    pub fn start(&mut self, seconds: u32) -> bool {
        self.remaining.replace(i64::from(seconds)).is_some()
    }

    /// Stop the countdown. Safe to call when nothing is running.
    pub fn stop(&mut self) {
        self.remaining = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, or `None` when stopped.
    #[must_use]
    pub fn seconds_left(&self) -> Option<u32> {
        self.remaining.and_then(|s| u32::try_from(s).ok())
    }

    /// Count one second down.
    pub fn tick(&mut self) -> TimerStatus {
        let Some(remaining) = self.remaining.as_mut() else {
            return TimerStatus::Inactive;
        };
        *remaining -= 1;
        match u32::try_from(*remaining) {
            Ok(left) => TimerStatus::Running(left),
            Err(_) => TimerStatus::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_through_zero_then_expires() {
        let mut timer = Timer::new();
        timer.start(2);

        assert_eq!(timer.tick(), TimerStatus::Running(1));
        assert_eq!(timer.tick(), TimerStatus::Running(0));
        assert_eq!(timer.tick(), TimerStatus::Expired);
    }

    #[test]
    fn test_inactive_timer_ignores_ticks() {
        let mut timer = Timer::new();
        assert_eq!(timer.tick(), TimerStatus::Inactive);
        assert_eq!(timer.seconds_left(), None);
    }

    #[test]
    fn test_restart_replaces_running_countdown() {
        let mut timer = Timer::new();
        assert!(!timer.start(15));
        timer.tick();
        timer.tick();

        assert!(timer.start(15));
        assert_eq!(timer.seconds_left(), Some(15));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = Timer::new();
        timer.start(5);

        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), TimerStatus::Inactive);
    }
}
