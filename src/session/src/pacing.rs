use std::{
    thread,
    time::{Duration, Instant},
};

/// Something that can wait out the delay between two animation steps.
pub trait Pacer {
    fn wait(&mut self, delay: Duration);
}

/// Helper for accurate sleep intervals.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    now: Instant,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for Ticker {
    fn wait(&mut self, delay: Duration) {
        // Advance the expected next time and sleep until that instant, so
        // slow steps don't accumulate drift.
        self.now += delay;
        thread::sleep(self.now.saturating_duration_since(Instant::now()));
    }
}

/// Never waits. For tests and headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

impl Pacer for Unpaced {
    fn wait(&mut self, _: Duration) {}
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn wait(&mut self, delay: Duration) {
        (**self).wait(delay);
    }
}
