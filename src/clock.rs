use std::{thread::sleep, time::{Duration, Instant}};

/// Blocks until the next tick boundary.
pub trait Clock {
    fn wait_next_tick(&mut self);
}

/// Sleeps off whatever is left of the tick interval since the previous call,
/// so time spent updating and drawing counts towards the tick.
pub struct FixedRateClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let interval = Duration::from_secs(1) / ticks_per_second.max(1);
        FixedRateClock { interval, last_tick: None }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Clock for FixedRateClock {
    fn wait_next_tick(&mut self) {
        let elapsed = self.last_tick.map_or(Duration::ZERO, |t| t.elapsed());
        if let Some(remaining) = self.interval.checked_sub(elapsed) {
            sleep(remaining);
        }
        self.last_tick = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_from_rate() {
        assert_eq!(FixedRateClock::new(30).interval(), Duration::from_secs(1) / 30);
        assert_eq!(FixedRateClock::new(1).interval(), Duration::from_secs(1));
    }

    #[test]
    fn waits_at_least_one_interval() {
        let mut clock = FixedRateClock::new(200);
        let start = Instant::now();
        clock.wait_next_tick();
        clock.wait_next_tick();
        assert!(start.elapsed() >= clock.interval() * 2);
    }
}
