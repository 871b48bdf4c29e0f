use crate::alert::AlertState;

/// Preferences defines the compiled-in temperature bands, all in Celsius.
/// optimal: The inclusive range that is ideal for sleeping
/// near: The inclusive outer range that surrounds the optimal band
/// close: The single reading that counts as "close"
pub struct Preferences {
    pub optimal: (f32, f32),
    pub near: (f32, f32),
    pub close: f32,
}

pub const TEMP_OPTIMAL_LOW: f32 = 22.0;
pub const TEMP_OPTIMAL_HIGH: f32 = 24.0;
pub const TEMP_NEAR_LOW: f32 = 20.0;
pub const TEMP_NEAR_HIGH: f32 = 26.0;
pub const TEMP_CLOSE: f32 = 25.0;

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            optimal: (TEMP_OPTIMAL_LOW, TEMP_OPTIMAL_HIGH), // Ideal range is 22C - 24C
            near: (TEMP_NEAR_LOW, TEMP_NEAR_HIGH),          // Getting there between 20C - 26C
            close: TEMP_CLOSE,
        }
    }
}

impl Preferences {
    /// Sorts a temperature into one of the alert bands
    /// The checks run optimal, close, near, then idle; the first match wins.
    /// Close is an exact comparison, so 24.9 and 25.1 both land in near.
    /// NaN fails every comparison and ends up idle.
    /// param temp: temperature in Celsius
    /// returns the band; never AlertState::Mute
    pub fn classify(&self, temp: f32) -> AlertState {
        let (optimal_low, optimal_high) = self.optimal;
        let (near_low, near_high) = self.near;

        if temp >= optimal_low && temp <= optimal_high {
            AlertState::Optimal
        } else if temp == self.close {
            AlertState::Close
        } else if (temp >= near_low && temp < optimal_low)
            || (temp > optimal_high && temp <= near_high)
        {
            AlertState::Near
        } else {
            AlertState::Idle
        }
    }
}
