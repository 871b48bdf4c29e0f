//! Alert scheduling
//!
//! Turns the current alert state into a sound event, gating the chime and
//! beep behind a cooldown shared with the long beep.

use crate::alert::AlertState;
use crate::timer::{elapsed_since, ALERT_INTERVAL_MS};

/// Sound event chosen for one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alert {
    /// Short high tone, optimal temperature
    Chime,
    /// Short low tone, exactly the close reading
    Beep,
    /// Long blocking tone, near the optimal band
    LongBeep,
    /// Stop any tone
    Silence,
}

/// Result of [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision {
    /// Event to play, if any
    pub alert: Option<Alert>,
    /// Updated timestamp of the last emitted tone alert
    pub last_alert_ms: Option<u32>,
}

/// Decide which alert to emit.
///
/// Rules are checked in order and the first match wins:
/// 1. Optimal, cooldown elapsed: chime
/// 2. Close, cooldown elapsed: beep
/// 3. Near: long beep, no cooldown
/// 4. Idle: silence, timer untouched
/// 5. Anything else: nothing
///
/// `last_alert_ms` of `None` means no alert has fired yet, so the cooldown
/// is open.
pub fn decide(
    state: AlertState,
    now_ms: u32,
    last_alert_ms: Option<u32>,
    interval_ms: u32,
) -> Decision {
    let cooled_down = match last_alert_ms {
        Some(last) => elapsed_since(now_ms, last) >= interval_ms,
        None => true,
    };

    let alert = match state {
        AlertState::Optimal if cooled_down => Some(Alert::Chime),
        AlertState::Close if cooled_down => Some(Alert::Beep),
        AlertState::Near => Some(Alert::LongBeep),
        AlertState::Idle => Some(Alert::Silence),
        _ => None,
    };

    let last_alert_ms = match alert {
        Some(Alert::Chime | Alert::Beep | Alert::LongBeep) => Some(now_ms),
        _ => last_alert_ms,
    };

    Decision {
        alert,
        last_alert_ms,
    }
}

/// Holds the alert timer between iterations.
#[derive(Debug, Clone)]
pub struct AlertScheduler {
    interval_ms: u32,
    last_alert_ms: Option<u32>,
}

impl Default for AlertScheduler {
    fn default() -> Self {
        Self::new(ALERT_INTERVAL_MS)
    }
}

impl AlertScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_alert_ms: None,
        }
    }

    /// Run [`decide`] against the stored timer without changing it.
    pub fn decide(&self, state: AlertState, now_ms: u32) -> Decision {
        decide(state, now_ms, self.last_alert_ms, self.interval_ms)
    }

    /// Keep the timer from a decision once its alert has actually played.
    pub fn commit(&mut self, decision: Decision) {
        self.last_alert_ms = decision.last_alert_ms;
    }

    /// Timestamp of the last chime, beep or long beep
    pub fn last_alert_ms(&self) -> Option<u32> {
        self.last_alert_ms
    }
}
