use std::time::{Duration, Instant};

/// Outcome of driving the countdown one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not started, or already stopped; the tick is a no-op.
    Inert,
    /// Still running; time left until the deadline.
    Remaining(Duration),
    /// The deadline passed on this tick. Fires at most once per start.
    Finished,
}

/// A cancellable countdown. It owns no timer thread; the event loop feeds
/// it ticks and it reports the edge when the deadline passes. `stop` is
/// idempotent, and any tick after `stop` is inert, so a stray timer event
/// can never finish a fresh session.
#[derive(Debug)]
pub struct Countdown {
    duration: Duration,
    deadline: Option<Instant>,
    running: bool,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
            running: false,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pin the deadline at `now + duration` and begin accepting ticks.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
        self.running = true;
    }

    /// Time left at `now`: the full duration before start, zero after the
    /// deadline.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => self.duration,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        if !self.running {
            return Tick::Inert;
        }
        let Some(deadline) = self.deadline else {
            return Tick::Remaining(self.duration);
        };
        if now >= deadline {
            self.stop();
            Tick::Finished
        } else {
            Tick::Remaining(deadline - now)
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn tick_before_start_is_inert() {
        let mut cd = Countdown::from_secs(30);
        assert_eq!(cd.tick(Instant::now()), Tick::Inert);
        assert_eq!(cd.remaining(Instant::now()), Duration::from_secs(30));
    }

    #[test]
    fn tick_reports_remaining_time() {
        let mut cd = Countdown::from_secs(30);
        let t0 = Instant::now();
        cd.start(t0);
        assert_matches!(
            cd.tick(t0 + Duration::from_secs(10)),
            Tick::Remaining(left) if left == Duration::from_secs(20)
        );
    }

    #[test]
    fn finished_fires_exactly_once() {
        let mut cd = Countdown::from_secs(1);
        let t0 = Instant::now();
        cd.start(t0);
        let past = t0 + Duration::from_secs(2);
        assert_eq!(cd.tick(past), Tick::Finished);
        assert_eq!(cd.tick(past), Tick::Inert);
        assert_eq!(cd.tick(past + Duration::from_secs(1)), Tick::Inert);
    }

    #[test]
    fn stop_is_idempotent_and_silences_ticks() {
        let mut cd = Countdown::from_secs(30);
        let t0 = Instant::now();
        cd.start(t0);
        cd.stop();
        cd.stop();
        assert!(!cd.is_running());
        assert_eq!(cd.tick(t0 + Duration::from_secs(60)), Tick::Inert);
    }

    #[test]
    fn remaining_clamps_to_zero_past_deadline() {
        let mut cd = Countdown::from_secs(1);
        let t0 = Instant::now();
        cd.start(t0);
        assert_eq!(cd.remaining(t0 + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn restartable_after_stop() {
        let mut cd = Countdown::from_secs(1);
        let t0 = Instant::now();
        cd.start(t0);
        assert_eq!(cd.tick(t0 + Duration::from_secs(2)), Tick::Finished);

        let t1 = t0 + Duration::from_secs(10);
        cd.start(t1);
        assert_matches!(cd.tick(t1 + Duration::from_millis(100)), Tick::Remaining(_));
    }
}
