//! Tick-based stopwatch.
//!
//! The timer never reads a clock itself: every call that needs the current
//! time takes it as `now`, in whatever unit the caller counts ticks in
//! (milliseconds from SDL, frames, `u64` nanoseconds, ...).

use std::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timer<T> {
    start_ticks: T,
    paused_ticks: T,
    started: bool,
    paused: bool,
}

impl<T> Timer<T>
where
    T: Copy + Default + Sub<Output = T>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the timer at `now`. Clears any pause.
    pub fn start(&mut self, now: T) {
        self.started = true;
        self.paused = false;
        self.start_ticks = now;
        self.paused_ticks = T::default();
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Freeze the elapsed count. No-op unless running and not already paused.
    pub fn pause(&mut self, now: T) {
        if self.started && !self.paused {
            self.paused = true;
            self.paused_ticks = now - self.start_ticks;
            self.start_ticks = T::default();
        }
    }

    /// Resume counting from the frozen value. No-op unless paused.
    pub fn unpause(&mut self, now: T) {
        if self.started && self.paused {
            self.paused = false;
            self.start_ticks = now - self.paused_ticks;
            self.paused_ticks = T::default();
        }
    }

    /// Elapsed ticks at `now`; zero for a stopped timer.
    pub fn ticks(&self, now: T) -> T {
        if !self.started {
            T::default()
        } else if self.paused {
            self.paused_ticks
        } else {
            now - self.start_ticks
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.started && self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_timer() {
        let mut timer = Timer::<u32>::new();
        assert_eq!(timer.ticks(100), 0);

        timer.start(100);
        assert!(timer.is_started());
        assert_eq!(timer.ticks(160), 60);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = Timer::<u64>::new();
        timer.start(1_000);
        timer.pause(1_250);
        assert!(timer.is_paused());
        assert_eq!(timer.ticks(9_999), 250);

        timer.unpause(2_000);
        assert!(!timer.is_paused());
        assert_eq!(timer.ticks(2_100), 350);
    }

    #[test]
    fn test_pause_requires_started() {
        let mut timer = Timer::<u32>::new();
        timer.pause(10);
        assert!(!timer.is_paused());

        timer.start(10);
        timer.stop();
        assert!(!timer.is_started());
        assert_eq!(timer.ticks(50), 0);
    }
}
