/// Frame clock for input polling
///
/// Runs input ticks at a fixed rate regardless of how fast the window
/// redraws, and hands out the monotonic timestamps the repeat timers use.
use std::time::{Duration, Instant};

/// Input polling interval (60 ticks per second)
const TICK_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame, so a stalled frame does not replay a burst of input
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Frame timing state
pub struct FrameClock {
    /// Time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    /// Current frame number
    frame_count: u64,

    /// Total ticks handed out
    tick_count: u64,
}

impl FrameClock {
    /// Create a new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a new frame, returns the number of input ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;
        self.advance(frame_time)
    }

    fn advance(&mut self, frame_time: Duration) -> u32 {
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }
        // Drop whatever the cap left over
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Monotonic time since the clock started
    pub fn now(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.tick_count(), 0);
    }

    #[test]
    fn test_frame_counting() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        clock.begin_frame();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.advance(TICK_DURATION * 2), 2);
        assert_eq!(clock.tick_count(), 3);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Duration::from_millis(300)), MAX_TICKS_PER_FRAME);
        // The backlog is dropped rather than replayed
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_now_is_monotonic() {
        let clock = FrameClock::new();
        let first = clock.now();
        thread::sleep(Duration::from_millis(5));
        assert!(clock.now() >= first + Duration::from_millis(5));
    }
}
