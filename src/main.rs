#![no_std]
#![no_main]

use bme680::{Bme680, I2CAddress, IIRFilterSize, OversamplingSetting, PowerMode, SettingsBuilder};
use bsp::entry;
use core::convert::Infallible;
use defmt::*;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use bsp::hal::{
    clocks::{init_clocks_and_plls, Clock as _},
    pac,
    watchdog::Watchdog,
};
use i2c_pio::I2C;
use rp_pico::hal;
use rp_pico::hal::fugit::RateExtU32;
use rp_pico::hal::gpio::bank0::{Gpio0, Gpio1, Gpio6, Gpio8, Gpio9};
use rp_pico::hal::gpio::{FunctionNull, FunctionPwm, FunctionUart, Pin, PullDown};
use rp_pico::hal::pwm::{FreeRunning, Pwm3, Slice, Slices};
use rp_pico::hal::pio::{PIOExt, SM0};
use rp_pico::hal::uart::{DataBits, Enabled, StopBits, UartConfig, UartPeripheral};
use rp_pico::hal::Timer;
use rp_pico::pac::{PIO0, UART0};
use sleeptemp_rs::error::SensorError;
use sleeptemp_rs::monitor::{Monitor, Outcome};
use sleeptemp_rs::mute::MuteStatus;
use sleeptemp_rs::scheduler::Alert;
use sleeptemp_rs::sensors::{Sample, SensorSource};
use sleeptemp_rs::sound::{Buzzer, ToneOutput};
use sleeptemp_rs::timer::{self, LOOP_DELAY_MS};

const CONSOLE_BAUD: u32 = 9600;

/// Integer clock divider for the buzzer slice; keeps audible TOP values within u16
const BUZZER_PWM_DIV: u8 = 64;

type Bme<'a> = Bme680<
    I2C<'a, PIO0, SM0, Pin<Gpio8, FunctionNull, PullDown>, Pin<Gpio9, FunctionNull, PullDown>>,
    Timer,
>;

type ConsoleUart = UartPeripheral<
    Enabled,
    UART0,
    (
        Pin<Gpio0, FunctionUart, PullDown>,
        Pin<Gpio1, FunctionUart, PullDown>,
    ),
>;

/// BME680 in forced mode: one measurement per read
struct BmeSensor<'a> {
    bme: Bme<'a>,
    delay: Timer,
}

impl SensorSource for BmeSensor<'_> {
    fn read_sample(&mut self) -> Result<Sample, SensorError> {
        self.bme
            .set_sensor_mode(&mut self.delay, PowerMode::ForcedMode)
            .map_err(|_| SensorError::ReadFailed)?;
        let (data, _condition) = self
            .bme
            .get_sensor_data(&mut self.delay)
            .map_err(|_| SensorError::ReadFailed)?;
        Sample::new(data.temperature_celsius(), data.humidity_percent())
    }
}

/// Passive buzzer on GP6, PWM slice 3 channel A, 50% duty while sounding
struct PwmTone {
    slice: Slice<Pwm3, FreeRunning>,
    _pin: Pin<Gpio6, FunctionPwm, PullDown>,
    sys_hz: u32,
}

impl ToneOutput for PwmTone {
    type Error = Infallible;

    fn start(&mut self, frequency_hz: u32) -> Result<(), Infallible> {
        let counter_hz = self.sys_hz / BUZZER_PWM_DIV as u32;
        let top = (counter_hz / frequency_hz.max(1)).saturating_sub(1);
        self.slice.set_top(top.min(u16::MAX as u32) as u16);
        self.slice.channel_a.set_duty_cycle_fraction(1, 2)
    }

    fn stop(&mut self) -> Result<(), Infallible> {
        self.slice.channel_a.set_duty_cycle_fully_off()
    }
}

/// UART0 as a ufmt sink
struct SerialConsole(ConsoleUart);

impl ufmt::uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.write_full_blocking(s.as_bytes());
        Ok(())
    }
}

/// Milliseconds since boot from the 1 MHz system timer, truncated to u32
struct Uptime(Timer);

impl timer::Clock for Uptime {
    fn now_ms(&self) -> u32 {
        (self.0.get_counter().ticks() / 1000) as u32
    }
}

#[entry]
fn main() -> ! {
    info!("SleepTemp Starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();
    let _core = pac::CorePeripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = hal::Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut delay = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Serial console on GP0 (TX) / GP1 (RX)
    let uart_pins = (
        pins.gpio0.into_function::<FunctionUart>(),
        pins.gpio1.into_function::<FunctionUart>(),
    );
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(CONSOLE_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();

    let (mut pio, sm0, _, _, _) = pac.PIO0.split(&mut pac.RESETS);

    let i2c_pio = I2C::new(
        &mut pio,
        pins.gpio8,
        pins.gpio9,
        sm0,
        100.kHz(),
        clocks.system_clock.freq(),
    );

    // Set up BME680, temperature and humidity only
    let mut bme = Bme680::init(i2c_pio, &mut delay, I2CAddress::Secondary).unwrap();
    let settings = SettingsBuilder::new()
        .with_humidity_oversampling(OversamplingSetting::OS2x)
        .with_pressure_oversampling(OversamplingSetting::OS4x)
        .with_temperature_oversampling(OversamplingSetting::OS8x)
        .with_temperature_filter(IIRFilterSize::Size3)
        .with_run_gas(false)
        .build();

    bme.set_sensor_settings(&mut delay, settings).unwrap();

    // Set up mute button, active low
    let mute_button = pins.gpio2.into_pull_up_input();

    // Set up buzzer on a free-running PWM slice, silent until the first tone
    let pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let mut pwm = pwm_slices.pwm3;
    pwm.set_div_int(BUZZER_PWM_DIV);
    pwm.enable();
    let buzzer_pin = pwm.channel_a.output_to(pins.gpio6);
    let tone = PwmTone {
        slice: pwm,
        _pin: buzzer_pin,
        sys_hz: clocks.system_clock.freq().to_Hz(),
    };

    let mut monitor = Monitor::new(
        BmeSensor { bme, delay },
        Buzzer::new(tone, delay),
        mute_button,
        SerialConsole(uart),
        Uptime(delay),
    );

    if let Err(e) = monitor.start() {
        error!("Startup banner failed: {}", e);
    }

    info!("SleepTemp Ready");

    loop {
        let pause_ms = match monitor.step() {
            Ok(step) => {
                log_outcome(&step.outcome);
                step.pause_ms
            }
            Err(e) => {
                error!("Monitor step failed: {}", e);
                LOOP_DELAY_MS
            }
        };
        delay.delay_ms(pause_ms);
    }
}

/// Mirrors the interesting parts of each iteration onto RTT
/// param outcome: what the last step did
fn log_outcome(outcome: &Outcome) {
    match *outcome {
        Outcome::Muted(MuteStatus::JustMuted) => info!("Alerts muted by user"),
        Outcome::Muted(_) => {}
        Outcome::SensorFailure(e) => warn!("Sensor read failed: {}", e),
        Outcome::Evaluated {
            sample,
            state,
            alert: Some(alert),
            ..
        } if alert != Alert::Silence => {
            info!("{} at {}C: {}", state, sample.temperature, alert);
        }
        Outcome::Evaluated { state, .. } => debug!("state: {}", state),
    }
}
