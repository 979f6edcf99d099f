use std::time::{Duration, Instant};

/// Cadence of the countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A cancellable repeating timer polled from the event loop.
///
/// Deadlines sit at `armed_at + k * interval`, so a late wake-up reports
/// every tick it missed and does not shift the ones after it. Once
/// [`RepeatingSchedule::cancel`] returns, [`RepeatingSchedule::take_due`]
/// reports nothing until the schedule is armed again.
#[derive(Debug, Clone)]
pub struct RepeatingSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            // a zero interval would report unbounded ticks
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Count the ticks due at `now` and advance past them
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            fired += 1;
            self.next_due = Some(due + self.interval);
        }
        fired
    }

    /// Time left before the next tick; `Some(ZERO)` if one is already due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for RepeatingSchedule {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_idle_schedule_reports_nothing() {
        let mut s = RepeatingSchedule::default();
        let now = Instant::now();
        assert!(!s.is_armed());
        assert_eq!(s.take_due(now + SEC * 10), 0);
        assert_eq!(s.time_until_due(now), None);
    }

    #[test]
    fn test_first_tick_after_one_interval() {
        let mut s = RepeatingSchedule::default();
        let t0 = Instant::now();
        s.arm(t0);

        assert_eq!(s.take_due(t0 + Duration::from_millis(999)), 0);
        assert_eq!(s.take_due(t0 + SEC), 1);
        assert_eq!(s.take_due(t0 + SEC), 0);
        assert_eq!(s.time_until_due(t0 + SEC), Some(SEC));
    }

    #[test]
    fn test_late_wakeup_catches_up_without_drift() {
        let mut s = RepeatingSchedule::default();
        let t0 = Instant::now();
        s.arm(t0);

        assert_eq!(s.take_due(t0 + Duration::from_millis(3_500)), 3);
        // next deadline stays on the 1s grid
        assert_eq!(
            s.time_until_due(t0 + Duration::from_millis(3_500)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_cancel_stops_further_ticks() {
        let mut s = RepeatingSchedule::default();
        let t0 = Instant::now();
        s.arm(t0);
        s.cancel();
        assert!(!s.is_armed());
        assert_eq!(s.take_due(t0 + SEC * 100), 0);

        // idempotent
        s.cancel();
        assert!(!s.is_armed());
    }

    #[test]
    fn test_rearm_restarts_grid() {
        let mut s = RepeatingSchedule::default();
        let t0 = Instant::now();
        s.arm(t0);
        let t1 = t0 + Duration::from_millis(400);
        s.arm(t1);
        assert_eq!(s.take_due(t0 + SEC), 0);
        assert_eq!(s.take_due(t1 + SEC), 1);
    }

    #[test]
    fn test_time_until_due_saturates() {
        let mut s = RepeatingSchedule::default();
        let t0 = Instant::now();
        s.arm(t0);
        assert_eq!(s.time_until_due(t0 + SEC * 5), Some(Duration::ZERO));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let s = RepeatingSchedule::new(Duration::ZERO);
        assert_eq!(s.interval(), Duration::from_millis(1));
    }
}
