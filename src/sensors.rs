use crate::error::SensorError;

/// One temperature/humidity reading
/// temperature: degrees Celsius
/// humidity: relative humidity percentage
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub temperature: f32,
    pub humidity: f32,
}

impl Sample {
    /// Builds a sample, rejecting NaN in either field
    /// param temperature: degrees Celsius
    /// param humidity: relative humidity percentage
    /// returns the Sample or SensorError::InvalidReading
    pub fn new(temperature: f32, humidity: f32) -> Result<Sample, SensorError> {
        if temperature.is_nan() || humidity.is_nan() {
            return Err(SensorError::InvalidReading);
        }
        Ok(Sample {
            temperature,
            humidity,
        })
    }
}

/// Anything that can produce a Sample on demand.
/// Implementations should return Err rather than a NaN-filled Sample.
pub trait SensorSource {
    fn read_sample(&mut self) -> Result<Sample, SensorError>;
}
