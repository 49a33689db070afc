// LEDC PWM Ausgänge
//
// Der Shamash hängt an einem High-Speed Timer, die acht Kerzen an einem
// Low-Speed Timer. Beide mit derselben Frequenz und 8-Bit Auflösung.

use defmt::Format;
use esp_hal::gpio::AnyPin;
use esp_hal::ledc::channel::{self, ChannelHW, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{HighSpeed, LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::time::Rate;
use static_cell::StaticCell;

use menorah_core::{
    CANDLE_COUNT, CHANNEL_LAYOUT, ChannelId, DimmableOutputs, OutputError, TimingGroup,
};

use crate::config::{PWM_FREQUENCY_HZ, PWM_MAX_DUTY};

/// Fehler bei der Konfiguration (fatal beim Boot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum OutputConfigError {
    /// Timer der Zeitgruppe ließ sich nicht konfigurieren
    Timer(TimingGroup),
    /// Kanal ließ sich nicht konfigurieren
    Channel(ChannelId),
}

/// GPIO-Pins der neun Ausgänge
pub struct OutputPins {
    pub master: AnyPin<'static>,
    /// Kerzen 1..=8 in Reihenfolge
    pub candles: [AnyPin<'static>; CANDLE_COUNT as usize],
}

/// Konfigurierte LEDC-Ausgänge
pub struct LedcOutputs {
    master: channel::Channel<'static, HighSpeed>,
    candles: [channel::Channel<'static, LowSpeed>; CANDLE_COUNT as usize],
}

// Timer müssen die Kanäle überleben ('static)
static LEDC: StaticCell<Ledc<'static>> = StaticCell::new();
static MASTER_TIMER: StaticCell<timer::Timer<'static, HighSpeed>> = StaticCell::new();
static CANDLE_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();

impl LedcOutputs {
    /// Konfiguriert beide Timer und alle Kanäle, alle Ausgänge starten aus
    ///
    /// Darf nur einmal aufgerufen werden (StaticCell).
    ///
    /// # Parameter
    /// - `ledc_peripheral`: LEDC Peripheral
    /// - `pins`: GPIO-Pins der Ausgänge
    pub fn configure(
        ledc_peripheral: esp_hal::peripherals::LEDC<'static>,
        pins: OutputPins,
    ) -> Result<Self, OutputConfigError> {
        let ledc = LEDC.init(Ledc::new(ledc_peripheral));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        let ledc: &'static Ledc<'static> = ledc;

        let master_timer = MASTER_TIMER.init(ledc.timer::<HighSpeed>(timer::Number::Timer0));
        master_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::HSClockSource::APBClk,
                frequency: Rate::from_hz(PWM_FREQUENCY_HZ),
            })
            .map_err(|_| OutputConfigError::Timer(TimingGroup::Master))?;

        let candle_timer = CANDLE_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
        candle_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_hz(PWM_FREQUENCY_HZ),
            })
            .map_err(|_| OutputConfigError::Timer(TimingGroup::Candles))?;
        let master_timer: &'static timer::Timer<'static, HighSpeed> = master_timer;
        let candle_timer: &'static timer::Timer<'static, LowSpeed> = candle_timer;

        let master_spec = CHANNEL_LAYOUT[ChannelId::MASTER.index()];
        let number = hw_channel_number(master_spec.hw_channel)
            .ok_or(OutputConfigError::Channel(ChannelId::MASTER))?;
        let mut master = ledc.channel(number, pins.master);
        master
            .configure(channel::config::Config {
                timer: master_timer,
                duty_pct: 0,
                pin_config: channel::config::PinConfig::PushPull,
            })
            .map_err(|_| OutputConfigError::Channel(ChannelId::MASTER))?;

        let [c1, c2, c3, c4, c5, c6, c7, c8] = pins.candles;
        let candles = [
            candle_channel(ledc, candle_timer, 1, c1)?,
            candle_channel(ledc, candle_timer, 2, c2)?,
            candle_channel(ledc, candle_timer, 3, c3)?,
            candle_channel(ledc, candle_timer, 4, c4)?,
            candle_channel(ledc, candle_timer, 5, c5)?,
            candle_channel(ledc, candle_timer, 6, c6)?,
            candle_channel(ledc, candle_timer, 7, c7)?,
            candle_channel(ledc, candle_timer, 8, c8)?,
        ];

        Ok(Self { master, candles })
    }
}

impl DimmableOutputs for LedcOutputs {
    fn set_brightness(&mut self, channel: ChannelId, level: u8) -> Result<(), OutputError> {
        let duty = u32::from(level).min(PWM_MAX_DUTY);
        match channel.group() {
            TimingGroup::Master => self.master.set_duty_hw(duty),
            TimingGroup::Candles => self
                .candles
                .get(channel.index() - 1)
                .ok_or(OutputError::WriteFailed)?
                .set_duty_hw(duty),
        }
        Ok(())
    }
}

/// Konfiguriert den Low-Speed Kanal für Kerze `index` laut `CHANNEL_LAYOUT`
fn candle_channel(
    ledc: &'static Ledc<'static>,
    timer: &'static timer::Timer<'static, LowSpeed>,
    index: usize,
    pin: AnyPin<'static>,
) -> Result<channel::Channel<'static, LowSpeed>, OutputConfigError> {
    let spec = CHANNEL_LAYOUT[index];
    let number = hw_channel_number(spec.hw_channel).ok_or(OutputConfigError::Channel(spec.id))?;
    let mut candle = ledc.channel(number, pin);
    candle
        .configure(channel::config::Config {
            timer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .map_err(|_| OutputConfigError::Channel(spec.id))?;
    Ok(candle)
}

/// LEDC-Kanalnummer, `None` außerhalb 0..=7
fn hw_channel_number(hw_channel: u8) -> Option<channel::Number> {
    let number = match hw_channel {
        0 => channel::Number::Channel0,
        1 => channel::Number::Channel1,
        2 => channel::Number::Channel2,
        3 => channel::Number::Channel3,
        4 => channel::Number::Channel4,
        5 => channel::Number::Channel5,
        6 => channel::Number::Channel6,
        7 => channel::Number::Channel7,
        _ => return None,
    };
    Some(number)
}
