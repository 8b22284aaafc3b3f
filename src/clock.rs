use std::time::Instant;

/// Minimal frame clock - just tracks elapsed time between ticks.
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Milliseconds since the last tick; advances the clock.
    pub fn tick_ms(&mut self) -> u64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_millis() as u64;
        self.last_tick = now;
        delta
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick_ms();

        assert!((9..=50).contains(&delta));
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let delta = clock.tick_ms();
        assert!(delta < 5);
    }
}
