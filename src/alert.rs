//! Temperature bands and the classifier that sorts readings into them.

use crate::preferences::Preferences;

/// The monitor's current alert mode.
///
/// `Mute` is never produced by [`classify`]; it is set by the mute latch
/// and short-circuits classification entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertState {
    /// Outside every band, buzzer kept quiet
    #[default]
    Idle,
    /// Ideal sleeping temperature
    Optimal,
    /// Exactly the "close" reading
    Close,
    /// Within the outer band around optimal
    Near,
    /// Silenced by the user until restart
    Mute,
}

/// Classify a temperature using the factory bands.
pub fn classify(temp: f32) -> AlertState {
    Preferences::default().classify(temp)
}
