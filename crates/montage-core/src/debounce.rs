//! Render coalescing for rapid input.
//!
//! Slider drags and pointer moves arrive far faster than full-frame renders
//! complete. The [`Debouncer`] throttles those paths to a fixed interval:
//! a request fires immediately when the interval has elapsed since the last
//! fire (leading edge), otherwise it is marked pending and the caller's next
//! [`poll`](Debouncer::poll) fires it once the interval passes (trailing
//! edge). Intermediate states are dropped - only the latest pending state
//! renders.
//!
//! This is a pure state machine over caller-supplied [`Instant`]s: no
//! threads, no timers, matching the single-threaded interaction model.

use std::time::{Duration, Instant};

/// Default coalescing interval, roughly one display frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A leading+trailing edge throttle shared by all rapid-input paths.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_fired: Option<Instant>,
    pending: bool,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: false,
        }
    }

    /// A debouncer at the ~16 ms frame interval.
    pub fn frame() -> Self {
        Self::new(FRAME_INTERVAL)
    }

    /// Register an input event at `now`. Returns true when the caller should
    /// render immediately; otherwise the event is held as pending.
    pub fn request(&mut self, now: Instant) -> bool {
        if self.interval_elapsed(now) {
            self.last_fired = Some(now);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Fire a held pending event once the interval has elapsed. Returns true
    /// when the caller should render the latest state now.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending && self.interval_elapsed(now) {
            self.last_fired = Some(now);
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Drop any pending event without firing.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Whether an event is waiting for the interval to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::frame()
    }
}
