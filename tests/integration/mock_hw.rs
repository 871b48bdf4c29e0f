//! Mock hardware for monitor integration tests.
//!
//! Records every buzzer call and console line so tests can assert on the
//! full history without a board attached. The console can be told to
//! refuse writes to exercise error paths.

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use sleeptemp_rs::error::SensorError;
use sleeptemp_rs::monitor::Monitor;
use sleeptemp_rs::preferences::Preferences;
use sleeptemp_rs::sensors::{Sample, SensorSource};
use sleeptemp_rs::sound::SoundDevice;
use sleeptemp_rs::timer::Clock;
use ufmt::uWrite;

// ── Sensor ────────────────────────────────────────────────────

/// Plays back queued readings; an empty queue reads as a bus failure.
#[derive(Default)]
pub struct ScriptedSensor {
    readings: VecDeque<Result<Sample, SensorError>>,
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn push_temp(&mut self, temperature: f32) {
        self.readings.push_back(Sample::new(temperature, 45.0));
    }

    pub fn push_error(&mut self, error: SensorError) {
        self.readings.push_back(Err(error));
    }

    pub fn pending(&self) -> usize {
        self.readings.len()
    }
}

impl SensorSource for ScriptedSensor {
    fn read_sample(&mut self) -> Result<Sample, SensorError> {
        self.reads += 1;
        self.readings
            .pop_front()
            .unwrap_or(Err(SensorError::ReadFailed))
    }
}

// ── Buzzer ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCall {
    /// Non-blocking tone, left running
    Tone { hz: u32, ms: u32 },
    /// Blocking tone, already over when the call returns
    Hold { hz: u32, ms: u32 },
    /// A running tone reached its deadline during `service`
    Expired,
    NoTone,
}

#[derive(Default)]
pub struct RecordingBuzzer {
    pub calls: Vec<SoundCall>,
    /// Start time and duration of the running tone
    pub pending: Option<(u32, u32)>,
}

impl SoundDevice for RecordingBuzzer {
    type Error = Infallible;

    fn tone(&mut self, frequency_hz: u32, duration_ms: u32, now_ms: u32) -> Result<(), Infallible> {
        self.calls.push(SoundCall::Tone {
            hz: frequency_hz,
            ms: duration_ms,
        });
        self.pending = Some((now_ms, duration_ms));
        Ok(())
    }

    fn tone_blocking(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Infallible> {
        self.calls.push(SoundCall::Hold {
            hz: frequency_hz,
            ms: duration_ms,
        });
        self.pending = None;
        Ok(())
    }

    fn no_tone(&mut self) -> Result<(), Infallible> {
        self.calls.push(SoundCall::NoTone);
        self.pending = None;
        Ok(())
    }

    fn service(&mut self, now_ms: u32) -> Result<(), Infallible> {
        if let Some((started, duration)) = self.pending {
            if now_ms.wrapping_sub(started) >= duration {
                self.calls.push(SoundCall::Expired);
                self.pending = None;
            }
        }
        Ok(())
    }
}

// ── Button ────────────────────────────────────────────────────

#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Active-low push button: pressed reads low.
#[derive(Default)]
pub struct MockButton {
    pub pressed: bool,
    pub faulty: bool,
}

impl ErrorType for MockButton {
    type Error = PinFault;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        if self.faulty {
            return Err(PinFault);
        }
        Ok(self.pressed)
    }
}

// ── Console ───────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub struct ConsoleFault;

/// Collects console output; any write containing `fail_on` is refused.
#[derive(Default)]
pub struct StringConsole {
    pub text: String,
    pub fail_on: Option<&'static str>,
}

#[allow(dead_code)]
impl StringConsole {
    pub fn lines(&self) -> Vec<&str> {
        self.text.split("\r\n").filter(|l| !l.is_empty()).collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.text.matches(needle).count()
    }
}

impl uWrite for StringConsole {
    type Error = ConsoleFault;

    fn write_str(&mut self, s: &str) -> Result<(), ConsoleFault> {
        if self.fail_on.is_some_and(|needle| s.contains(needle)) {
            return Err(ConsoleFault);
        }
        self.text.push_str(s);
        Ok(())
    }
}

// ── Clock ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeClock {
    now: Cell<u32>,
}

impl FakeClock {
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

pub type TestMonitor<'a> =
    Monitor<ScriptedSensor, RecordingBuzzer, MockButton, StringConsole, &'a FakeClock>;

pub fn make_monitor(clock: &FakeClock) -> TestMonitor<'_> {
    make_monitor_with(clock, Preferences::default())
}

pub fn make_monitor_with(clock: &FakeClock, preferences: Preferences) -> TestMonitor<'_> {
    Monitor::with_preferences(
        ScriptedSensor::default(),
        RecordingBuzzer::default(),
        MockButton::default(),
        StringConsole::default(),
        clock,
        preferences,
    )
}
