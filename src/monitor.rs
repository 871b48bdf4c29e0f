//! Monitor loop orchestration
//!
//! [`Monitor`] owns every collaborator plus the single mutable [`Context`].
//! Each call to [`Monitor::step`] runs one loop iteration to completion and
//! returns how long the caller should pause before the next one. The
//! monitor never sleeps on its own, apart from the long beep blocking
//! inside the sound device. Each step first lets the sound device silence
//! a chime or beep whose time is up.

use embedded_hal::digital::InputPin;
use ufmt::uWrite;

use crate::alert::AlertState;
use crate::error::SensorError;
use crate::mute::{MuteLatch, MuteStatus};
use crate::preferences::Preferences;
use crate::rendering;
use crate::scheduler::{Alert, AlertScheduler};
use crate::sensors::{Sample, SensorSource};
use crate::sound::SoundDevice;
use crate::timer::{
    Clock, IntervalTimer, ALERT_INTERVAL_MS, DASHBOARD_REFRESH_MS, LOOP_DELAY_MS, MUTED_DELAY_MS,
    SENSOR_SETTLE_MS,
};

pub use crate::error::Error;

/// All state that survives between iterations
#[derive(Debug, Clone)]
pub struct Context {
    pub state: AlertState,
    pub mute: MuteLatch,
    pub scheduler: AlertScheduler,
    pub dashboard: IntervalTimer,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            state: AlertState::Idle,
            mute: MuteLatch::new(),
            scheduler: AlertScheduler::new(ALERT_INTERVAL_MS),
            dashboard: IntervalTimer::new(DASHBOARD_REFRESH_MS),
        }
    }
}

/// What happened during one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Mute latch is set; classification skipped
    Muted(MuteStatus),
    /// Sample rejected; state and alert timer left as they were
    SensorFailure(SensorError),
    Evaluated {
        sample: Sample,
        state: AlertState,
        alert: Option<Alert>,
        dashboard_rendered: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub outcome: Outcome,
    /// How long to wait before the next `step`
    pub pause_ms: u32,
}

pub struct Monitor<S, B, P, W, C> {
    sensor: S,
    sound: B,
    button: P,
    console: W,
    clock: C,
    preferences: Preferences,
    context: Context,
}

impl<S, B, P, W, C> Monitor<S, B, P, W, C>
where
    S: SensorSource,
    B: SoundDevice,
    P: InputPin,
    W: uWrite,
    C: Clock,
{
    /// param sensor: temperature/humidity source
    /// param sound: buzzer
    /// param button: mute button, active low
    /// param console: serial text sink
    /// param clock: monotonic millisecond clock
    pub fn new(sensor: S, sound: B, button: P, console: W, clock: C) -> Self {
        Self::with_preferences(sensor, sound, button, console, clock, Preferences::default())
    }

    pub fn with_preferences(
        sensor: S,
        sound: B,
        button: P,
        console: W,
        clock: C,
        preferences: Preferences,
    ) -> Self {
        Self {
            sensor,
            sound,
            button,
            console,
            clock,
            preferences,
            context: Context::default(),
        }
    }

    /// Quiets the buzzer and prints the startup banner
    pub fn start(&mut self) -> Result<(), Error> {
        self.sound.no_tone().map_err(|_| Error::Buzzer)?;
        rendering::render_banner(&mut self.console).map_err(|_| Error::Console)
    }

    /// Runs one loop iteration
    pub fn step(&mut self) -> Result<Step, Error> {
        self.sound
            .service(self.clock.now_ms())
            .map_err(|_| Error::Buzzer)?;

        let pressed = self.button.is_low().map_err(|_| Error::Button)?;
        let mute = self.context.mute.update(pressed);
        if mute.is_muted() {
            return self.step_muted(mute);
        }

        let sample = match self.sensor.read_sample() {
            Ok(sample) => sample,
            Err(error) => {
                rendering::render_sensor_failure(&mut self.console, error)
                    .map_err(|_| Error::Console)?;
                return Ok(Step {
                    outcome: Outcome::SensorFailure(error),
                    pause_ms: SENSOR_SETTLE_MS,
                });
            }
        };

        let now_ms = self.clock.now_ms();

        let dashboard_rendered = self.context.dashboard.is_due(now_ms);
        if dashboard_rendered {
            rendering::render_dashboard(&mut self.console, &sample).map_err(|_| Error::Console)?;
            self.context.dashboard.mark(now_ms);
        }

        let state = self.preferences.classify(sample.temperature);
        self.context.state = state;

        // The alert timer only moves once the alert has been announced and played
        let decision = self.context.scheduler.decide(state, now_ms);
        if let Some(alert) = decision.alert {
            rendering::render_alert(&mut self.console, alert).map_err(|_| Error::Console)?;
            self.sound.play(alert, now_ms).map_err(|_| Error::Buzzer)?;
        }
        self.context.scheduler.commit(decision);
        let alert = decision.alert;

        Ok(Step {
            outcome: Outcome::Evaluated {
                sample,
                state,
                alert,
                dashboard_rendered,
            },
            pause_ms: LOOP_DELAY_MS,
        })
    }

    fn step_muted(&mut self, mute: MuteStatus) -> Result<Step, Error> {
        self.context.state = AlertState::Mute;
        if mute == MuteStatus::JustMuted {
            rendering::render_mute_triggered(&mut self.console).map_err(|_| Error::Console)?;
        }
        self.sound.no_tone().map_err(|_| Error::Buzzer)?;
        rendering::render_muted_notice(&mut self.console).map_err(|_| Error::Console)?;
        Ok(Step {
            outcome: Outcome::Muted(mute),
            pause_ms: MUTED_DELAY_MS,
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn state(&self) -> AlertState {
        self.context.state
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut W {
        &mut self.console
    }

    pub fn sound(&self) -> &B {
        &self.sound
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn button_mut(&mut self) -> &mut P {
        &mut self.button
    }
}
