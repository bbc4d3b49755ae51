use std::time::{Duration, Instant};

/// Cursor visibility toggled by periodic ticks.
#[derive(Debug, Clone)]
pub struct Blink {
    visible: bool,
    last_toggle: Instant,
    interval: Duration,
}

impl Blink {
    /// A zero interval disables blinking; the cursor then stays visible.
    pub fn new(interval: Duration) -> Self {
        Self {
            visible: true,
            last_toggle: Instant::now(),
            interval,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
    pub fn interval(&self) -> Duration {
        self.interval
    }
    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// Toggle if at least one interval elapsed since the last toggle.
    /// Returns true when visibility changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if now.saturating_duration_since(self.last_toggle) >= self.interval {
            self.visible = !self.visible;
            self.last_toggle = now;
            return true;
        }
        false
    }

    /// Show the cursor and restart the interval (called on key input).
    pub fn reset(&mut self, now: Instant) {
        self.visible = true;
        self.last_toggle = now;
    }
}
