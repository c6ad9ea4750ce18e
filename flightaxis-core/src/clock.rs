use std::time::Instant;

/// A wall-clock time source with microsecond resolution.
pub trait Clock {
    /// Current time in microseconds since an arbitrary fixed epoch.
    fn now_us(&mut self) -> u64;
}

impl Clock for Box<dyn Clock> {
    fn now_us(&mut self) -> u64 {
        self.as_mut().now_us()
    }
}

/// A clock backed by [`std::time::Instant`].
#[derive(Clone, Debug)]
pub struct StdClock {
    epoch: Instant,
}

impl StdClock {
    /// Creates a clock whose epoch is the moment of creation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_us(&mut self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_clock_is_monotonic() {
        let mut clock = StdClock::new();
        let a = clock.now_us();
        let b = clock.now_us();
        assert!(a <= b);
    }

    #[test]
    fn box_clock() {
        let mut clock: Box<dyn Clock> = Box::new(StdClock::default());
        let a = clock.now_us();
        assert!(a <= clock.now_us());
    }
}
