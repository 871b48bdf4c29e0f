//! Buzzer tones for each alert.
//!
//! Chime and beep start a tone and return at once; the tone is silenced by
//! [`SoundDevice::service`] once its duration has run out. The long beep
//! blocks for its full 5 s, and the mute button is not read meanwhile.

use embedded_hal::delay::DelayNs;

use crate::scheduler::Alert;
use crate::timer::{elapsed_since, LONG_BEEP_MS};

pub const CHIME_HZ: u32 = 1500;
pub const BEEP_HZ: u32 = 1000;
pub const SHORT_TONE_MS: u32 = 200;

/// Something that can make noise.
pub trait SoundDevice {
    type Error;

    /// Start `frequency_hz` and return; it stops at the first `service`
    /// call at least `duration_ms` after `now_ms`
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32, now_ms: u32)
        -> Result<(), Self::Error>;

    /// Play `frequency_hz` for `duration_ms`, returning once it is over
    fn tone_blocking(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Self::Error>;

    /// Silence the output
    fn no_tone(&mut self) -> Result<(), Self::Error>;

    /// Silence a timed tone whose duration has elapsed
    fn service(&mut self, now_ms: u32) -> Result<(), Self::Error>;

    /// Play the pattern that belongs to `alert`
    fn play(&mut self, alert: Alert, now_ms: u32) -> Result<(), Self::Error> {
        match alert {
            Alert::Chime => self.tone(CHIME_HZ, SHORT_TONE_MS, now_ms),
            Alert::Beep => self.tone(BEEP_HZ, SHORT_TONE_MS, now_ms),
            Alert::LongBeep => self.tone_blocking(BEEP_HZ, LONG_BEEP_MS),
            Alert::Silence => self.no_tone(),
        }
    }
}

/// A free-running square wave generator, e.g. a PWM slice at 50% duty
pub trait ToneOutput {
    type Error;

    fn start(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;
    fn stop(&mut self) -> Result<(), Self::Error>;
}

/// Passive buzzer on a [`ToneOutput`], with a delay for blocking tones
pub struct Buzzer<T, D> {
    output: T,
    delay: D,
    /// Start time and duration of the tone awaiting `service`
    timed: Option<(u32, u32)>,
}

impl<T: ToneOutput, D: DelayNs> Buzzer<T, D> {
    pub fn new(output: T, delay: D) -> Self {
        Self {
            output,
            delay,
            timed: None,
        }
    }
}

impl<T: ToneOutput, D: DelayNs> SoundDevice for Buzzer<T, D> {
    type Error = T::Error;

    fn tone(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
        now_ms: u32,
    ) -> Result<(), Self::Error> {
        self.output.start(frequency_hz)?;
        self.timed = Some((now_ms, duration_ms));
        Ok(())
    }

    fn tone_blocking(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Self::Error> {
        self.timed = None;
        self.output.start(frequency_hz)?;
        self.delay.delay_ms(duration_ms);
        self.output.stop()
    }

    fn no_tone(&mut self) -> Result<(), Self::Error> {
        self.timed = None;
        self.output.stop()
    }

    fn service(&mut self, now_ms: u32) -> Result<(), Self::Error> {
        match self.timed {
            Some((started_ms, duration_ms)) if elapsed_since(now_ms, started_ms) >= duration_ms => {
                self.no_tone()
            }
            _ => Ok(()),
        }
    }
}
