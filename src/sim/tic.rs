use std::time::{Duration, Instant};

use crate::config::INPUT_INTERVAL;

/// Rate-limits intent application independently of rendering.
///
/// An update is due once strictly more than `interval` has passed since the
/// last due poll; the very first poll is always due.
#[derive(Clone, Copy, Debug)]
pub struct InputThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl Default for InputThrottle {
    fn default() -> Self {
        Self::new(INPUT_INTERVAL)
    }
}

impl InputThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` when an update is due at `now`; a due poll restarts the interval.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) <= self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
