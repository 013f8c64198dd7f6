use std::time::{Duration, Instant};

/// A cancellable repeating timer.  At most one tick is ever scheduled.
///
/// The ticker doesn't sleep or spawn anything; the event loop asks for the
/// [`deadline()`][Ticker::deadline], waits for input until then, and calls
/// [`fire()`][Ticker::fire] once the time is up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// Create a ticker that is not yet running
    pub(crate) fn new(interval: Duration) -> Ticker {
        Ticker {
            interval,
            next: None,
        }
    }

    /// Cancel any scheduled tick, then start ticking every `interval`
    /// starting from `now`
    pub(crate) fn reschedule(&mut self, interval: Duration, now: Instant) {
        self.cancel();
        self.interval = interval;
        self.next = Some(now + interval);
    }

    pub(crate) fn cancel(&mut self) {
        self.next = None;
    }

    /// When the next tick is due, if one is scheduled
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Returns `true` if a tick is due at `now`, in which case the following
    /// tick is scheduled one interval after the one that just fired.  If that
    /// time has already passed, the missed ticks are skipped and the schedule
    /// restarts from `now`.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(when) if when <= now => {
                let next = when + self.interval;
                self.next = Some(if next > now { next } else { now + self.interval });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn new_is_idle() {
        let mut ticker = Ticker::new(PERIOD);
        assert_eq!(ticker.deadline(), None);
        assert!(!ticker.fire(Instant::now() + PERIOD * 10));
    }

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.reschedule(PERIOD, t0);
        assert_eq!(ticker.deadline(), Some(t0 + PERIOD));
        assert!(!ticker.fire(t0 + PERIOD / 2));
        assert!(ticker.fire(t0 + PERIOD));
        assert!(!ticker.fire(t0 + PERIOD));
        assert_eq!(ticker.deadline(), Some(t0 + PERIOD * 2));
    }

    #[test]
    fn slightly_late_tick_keeps_cadence() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.reschedule(PERIOD, t0);
        assert!(ticker.fire(t0 + PERIOD + Duration::from_millis(30)));
        assert_eq!(ticker.deadline(), Some(t0 + PERIOD * 2));
        assert!(ticker.fire(t0 + PERIOD * 2));
        assert_eq!(ticker.deadline(), Some(t0 + PERIOD * 3));
    }

    #[test]
    fn late_tick_does_not_burst() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.reschedule(PERIOD, t0);
        let late = t0 + PERIOD * 5;
        assert!(ticker.fire(late));
        assert!(!ticker.fire(late));
        assert_eq!(ticker.deadline(), Some(late + PERIOD));
    }

    #[test]
    fn reschedule_replaces_pending_tick() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.reschedule(PERIOD, t0);
        let t1 = t0 + PERIOD / 2;
        let faster = Duration::from_millis(95);
        ticker.reschedule(faster, t1);
        assert_eq!(ticker.deadline(), Some(t1 + faster));
        assert!(!ticker.fire(t0 + PERIOD));
    }

    #[test]
    fn cancel_stops_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.reschedule(PERIOD, t0);
        ticker.cancel();
        assert_eq!(ticker.deadline(), None);
        assert!(!ticker.fire(t0 + PERIOD * 2));
    }
}
