/// One discrete unit of simulated time.
pub type Tick = u64;

/// Simulation time, owned by the driver and handed to the scheduler as a
/// plain `now` value. There is no process-wide instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    current: Tick,
    end: Tick,
}

impl Clock {
    pub fn new(start: Tick, end: Tick) -> Self {
        Clock { current: start, end }
    }

    pub fn now(&self) -> Tick {
        self.current
    }

    pub fn end(&self) -> Tick {
        self.end
    }

    pub fn is_end(&self) -> bool {
        self.current >= self.end
    }

    pub fn advance(&mut self) {
        self.current += 1;
    }

    pub fn set_time(&mut self, time: Tick) {
        self.current = time;
    }

    pub fn set_end_time(&mut self, end: Tick) {
        self.end = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ends_once_current_reaches_end() {
        let mut clock = Clock::new(0, 2);
        assert!(!clock.is_end());
        clock.advance();
        assert_eq!(clock.now(), 1);
        assert!(!clock.is_end());
        clock.advance();
        assert!(clock.is_end());
    }

    #[test]
    fn empty_interval_is_already_ended() {
        let clock = Clock::new(5, 5);
        assert!(clock.is_end());
    }

    #[test]
    fn set_time_and_end_time() {
        let mut clock = Clock::new(0, 1);
        clock.set_end_time(10);
        clock.set_time(9);
        assert_eq!(clock.end(), 10);
        assert!(!clock.is_end());
        clock.advance();
        assert!(clock.is_end());
    }
}
