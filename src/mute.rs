//! Mute button latch
//!
//! One press silences the monitor until the next power cycle. The pin is
//! read once per loop iteration with no debounce, so a single bounce is
//! enough to latch.

/// Latch rule: once set, stays set.
pub fn poll(button_pressed: bool, latched: bool) -> bool {
    latched || button_pressed
}

/// Outcome of one latch update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuteStatus {
    Unmuted,
    /// The single false to true transition of this run
    JustMuted,
    Muted,
}

impl MuteStatus {
    pub fn is_muted(self) -> bool {
        self != MuteStatus::Unmuted
    }
}

#[derive(Debug, Clone, Default)]
pub struct MuteLatch {
    latched: bool,
}

impl MuteLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, button_pressed: bool) -> MuteStatus {
        let was_latched = self.latched;
        self.latched = poll(button_pressed, was_latched);
        match (was_latched, self.latched) {
            (false, true) => MuteStatus::JustMuted,
            (true, _) => MuteStatus::Muted,
            (false, false) => MuteStatus::Unmuted,
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}
