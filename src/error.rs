//! Error kinds
//!
//! A failed sensor read is the only domain error and is always recovered
//! inside the loop. The remaining kinds report collaborator I/O faults.

/// Reasons a sample could not be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The driver reported a bus or measurement failure
    ReadFailed,
    /// The driver answered, but with a non-numeric value
    InvalidReading,
}

/// Collaborator faults surfaced from the monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Reading the mute button failed
    Button,
    /// Driving the buzzer output failed
    Buzzer,
    /// Writing to the serial console failed
    Console,
}
