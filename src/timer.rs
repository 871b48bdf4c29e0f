pub const ALERT_INTERVAL_MS: u32 = 5000; // Cooldown between chimes/beeps
pub const DASHBOARD_REFRESH_MS: u32 = 1000;
pub const LOOP_DELAY_MS: u32 = 300; // Sensor friendly
pub const MUTED_DELAY_MS: u32 = 500;
pub const SENSOR_SETTLE_MS: u32 = 2000;
pub const LONG_BEEP_MS: u32 = 5000;

/// Source of monotonic milliseconds since boot.
/// The counter is allowed to wrap; use [`elapsed_since`] to compare.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds between `earlier` and `now`, correct across a counter wrap.
pub fn elapsed_since(now_ms: u32, earlier_ms: u32) -> u32 {
    now_ms.wrapping_sub(earlier_ms)
}

/// Rate limiter for periodic work like the dashboard.
/// It is due immediately after creation, then once per interval.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_ms: Option<u32>,
}

impl IntervalTimer {
    pub fn new(interval_ms: u32) -> IntervalTimer {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last_ms {
            Some(last) => elapsed_since(now_ms, last) >= self.interval_ms,
            None => true,
        }
    }

    pub fn mark(&mut self, now_ms: u32) {
        self.last_ms = Some(now_ms);
    }

    pub fn last_ms(&self) -> Option<u32> {
        self.last_ms
    }
}
