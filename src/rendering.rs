use heapless::String;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::error::SensorError;
use crate::scheduler::Alert;
use crate::sensors::Sample;

pub const HEADER_RULE: &str = "==========================================";
pub const DIVIDER: &str = "------------------------------------------";
pub const TITLE: &str = "Sleep Temp & Humidity Monitor - v1.0";
pub const READY: &str = "System ready: monitoring sleep environment";
pub const MUTED_BY_USER: &str = "ALERTS MUTED BY USER";
pub const SILENT_MODE: &str = "SYSTEM IS IN SILENT MODE";

/// Worst case ("Temperature: -21474836.48 °C | Humidity: -21474836.48 %") is 57 bytes
pub const DASHBOARD_LINE_LEN: usize = 64;

/// Prints an f32 with exactly two decimals, rounded half away from zero.
/// ufmt has no float support, so this goes through a scaled integer.
/// Values past +-21474836.47 saturate.
pub struct Centi(pub f32);

impl uDisplay for Centi {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let scaled = self.0 * 100.0;
        let rounded = if scaled >= 0.0 {
            (scaled + 0.5) as i32
        } else {
            (scaled - 0.5) as i32
        };
        let magnitude = rounded.unsigned_abs();
        if rounded < 0 {
            f.write_str("-")?;
        }
        let whole = magnitude / 100;
        let fraction = magnitude % 100;
        if fraction < 10 {
            uwrite!(f, "{}.0{}", whole, fraction)
        } else {
            uwrite!(f, "{}.{}", whole, fraction)
        }
    }
}

/// Writes one line followed by CRLF
/// param console: serial sink
/// param text: line contents
pub fn render_line<W: uWrite + ?Sized>(console: &mut W, text: &str) -> Result<(), W::Error> {
    console.write_str(text)?;
    console.write_str("\r\n")
}

pub fn render_divider<W: uWrite + ?Sized>(console: &mut W) -> Result<(), W::Error> {
    render_line(console, DIVIDER)
}

/// Startup banner: boxed title, ready line, divider
pub fn render_banner<W: uWrite + ?Sized>(console: &mut W) -> Result<(), W::Error> {
    render_line(console, HEADER_RULE)?;
    render_line(console, TITLE)?;
    render_line(console, HEADER_RULE)?;
    render_line(console, READY)?;
    render_divider(console)
}

/// Formats the reading line shown on the dashboard
/// param sample: latest valid sample
/// returns the formatted line without a line ending
pub fn format_dashboard_line(sample: &Sample) -> String<DASHBOARD_LINE_LEN> {
    let mut line: String<DASHBOARD_LINE_LEN> = String::new();
    // Centi saturates, so DASHBOARD_LINE_LEN always fits
    uwrite!(
        line,
        "Temperature: {} °C | Humidity: {} %",
        Centi(sample.temperature),
        Centi(sample.humidity)
    )
    .unwrap();
    line
}

/// Dashboard refresh: the reading framed by dividers
/// param console: serial sink
/// param sample: latest valid sample
pub fn render_dashboard<W: uWrite + ?Sized>(
    console: &mut W,
    sample: &Sample,
) -> Result<(), W::Error> {
    render_divider(console)?;
    render_line(console, &format_dashboard_line(sample))?;
    render_divider(console)
}

/// Status line for an emitted alert; silence prints nothing
/// param console: serial sink
/// param alert: the alert that was just played
pub fn render_alert<W: uWrite + ?Sized>(console: &mut W, alert: Alert) -> Result<(), W::Error> {
    match alert {
        Alert::Chime => render_line(console, "Optimal temp: perfect for sleep."),
        Alert::Beep => render_line(console, "Close: temp is 25 °C."),
        Alert::LongBeep => render_line(console, "Near optimal: prepare to sleep."),
        Alert::Silence => Ok(()),
    }
}

/// Printed once, when the mute button latches
pub fn render_mute_triggered<W: uWrite + ?Sized>(console: &mut W) -> Result<(), W::Error> {
    render_line(console, MUTED_BY_USER)?;
    render_divider(console)
}

/// Heartbeat printed every muted iteration
pub fn render_muted_notice<W: uWrite + ?Sized>(console: &mut W) -> Result<(), W::Error> {
    render_line(console, SILENT_MODE)
}

pub fn render_sensor_failure<W: uWrite + ?Sized>(
    console: &mut W,
    error: SensorError,
) -> Result<(), W::Error> {
    match error {
        SensorError::ReadFailed => render_line(console, "ERROR: failed to read from sensor"),
        SensorError::InvalidReading => render_line(console, "ERROR: sensor returned no data"),
    }
}
