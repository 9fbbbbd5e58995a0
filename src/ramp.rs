//! Linear value ramps for animating a property over time

use std::time::Duration;

/// Evenly spaced values from `start` towards `end`, one per tick.
///
/// Yields `start + (end - start) * elapsed / duration` for every tick that
/// starts before `duration` has passed, then `end` exactly once. The values
/// do not depend on wall-clock time; pacing is left to the caller.
#[derive(Debug, Clone)]
pub struct LinearRamp {
    start: f64,
    end: f64,
    duration: Duration,
    tick: Duration,
    step: u32,
    done: bool,
}

impl LinearRamp {
    /// A zero `tick` is treated as one millisecond
    pub fn new(start: f64, end: f64, duration: Duration, tick: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            tick: tick.max(Duration::from_millis(1)),
            step: 0,
            done: false,
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Total number of values the ramp yields
    pub fn steps(&self) -> usize {
        let ticks = self.duration.as_nanos().div_ceil(self.tick.as_nanos());
        ticks as usize + 1
    }
}

impl Iterator for LinearRamp {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }

        let elapsed = self.tick * self.step;
        if elapsed < self.duration {
            self.step += 1;
            let fraction = elapsed.as_secs_f64() / self.duration.as_secs_f64();
            return Some(self.start + (self.end - self.start) * fraction);
        }

        self.done = true;
        Some(self.end)
    }
}
