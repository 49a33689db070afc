//! Flicker Engine - Flammen-Simulation
//!
//! Pro Zyklus bekommt jeder brennende Ausgang eine zufällige Helligkeit aus
//! einem Teilbereich (nie ganz dunkel, nie dauerhaft voll), jeder gelöschte
//! Ausgang bekommt 0. Die Pause zwischen den Zyklen ist ebenfalls zufällig,
//! sonst sieht das Flackern wie ein Stroboskop aus.

use rand::{Rng, RngCore};

use crate::traits::{DimmableOutputs, OutputError};
use crate::types::{ChannelId, DayCounter, Frame};

/// Parameter des Flackerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerConfig {
    min_level: u8,
    max_level: u8,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl FlickerConfig {
    /// Erstellt eine Konfiguration
    ///
    /// # Parameter
    /// - `min_level` / `max_level`: Helligkeitsbereich brennender Ausgänge (inklusiv)
    /// - `min_delay_ms` / `max_delay_ms`: Pause zwischen Zyklen (`max` exklusiv)
    ///
    /// # Panics
    /// Bei leerem Helligkeits- oder Pausenbereich, oder wenn `min_level` 0 ist.
    pub const fn new(min_level: u8, max_level: u8, min_delay_ms: u64, max_delay_ms: u64) -> Self {
        assert!(min_level > 0, "brennende Ausgänge dürfen nicht dunkel sein");
        assert!(min_level <= max_level);
        assert!(min_delay_ms < max_delay_ms);
        Self {
            min_level,
            max_level,
            min_delay_ms,
            max_delay_ms,
        }
    }

    pub const fn min_level(&self) -> u8 {
        self.min_level
    }

    pub const fn max_level(&self) -> u8 {
        self.max_level
    }

    pub const fn min_delay_ms(&self) -> u64 {
        self.min_delay_ms
    }

    pub const fn max_delay_ms(&self) -> u64 {
        self.max_delay_ms
    }
}

impl Default for FlickerConfig {
    /// [100, 255] bei 8-Bit Auflösung, 40-59 ms Pause
    fn default() -> Self {
        Self::new(100, 255, 40, 60)
    }
}

pub struct FlickerEngine<R> {
    config: FlickerConfig,
    rng: R,
}

impl<R: RngCore> FlickerEngine<R> {
    pub fn new(config: FlickerConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Berechnet die Helligkeiten aller Ausgänge für Tag `day`
    ///
    /// Gelöschte Ausgänge bekommen in JEDEM Zyklus 0, nicht nur beim
    /// Wechsel. Eine Änderung des Tageszählers wirkt damit spätestens im
    /// nächsten Zyklus, ohne Benachrichtigung.
    pub fn render(&mut self, day: DayCounter) -> Frame {
        let mut frame = Frame::OFF;
        for channel in ChannelId::all() {
            if channel.is_enabled(day) {
                let level = self
                    .rng
                    .gen_range(self.config.min_level..=self.config.max_level);
                frame.set_level(channel, level);
            }
        }
        frame
    }

    /// Zufällige Pause bis zum nächsten Zyklus in Millisekunden
    pub fn next_delay_ms(&mut self) -> u64 {
        self.rng
            .gen_range(self.config.min_delay_ms..self.config.max_delay_ms)
    }

    /// Ein kompletter Zyklus ohne Pause: berechnen und anwenden
    ///
    /// Gibt die Pause bis zum nächsten Zyklus zurück. Ein Ausgangsfehler
    /// bricht den Zyklus nicht ab (siehe [`apply_frame`]).
    pub fn cycle<O: DimmableOutputs>(
        &mut self,
        day: DayCounter,
        outputs: &mut O,
    ) -> (u64, Result<(), (ChannelId, OutputError)>) {
        let frame = self.render(day);
        let applied = apply_frame(&frame, outputs);
        (self.next_delay_ms(), applied)
    }
}

/// Schreibt alle Helligkeiten eines Frames auf die Ausgänge
///
/// Alle Ausgänge werden geschrieben, auch wenn einer fehlschlägt. Der
/// erste Fehler wird zurückgegeben.
pub fn apply_frame<O: DimmableOutputs>(
    frame: &Frame,
    outputs: &mut O,
) -> Result<(), (ChannelId, OutputError)> {
    let mut first_error = None;
    for (channel, level) in frame.iter() {
        if let Err(e) = outputs.set_brightness(channel, level) {
            first_error.get_or_insert((channel, e));
        }
    }
    match first_error {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_render_day_one() {
        let mut engine = FlickerEngine::new(FlickerConfig::default(), SmallRng::seed_from_u64(1));
        let frame = engine.render(DayCounter::FIRST);

        assert!(frame.level(ChannelId::MASTER) >= 100);
        assert!(frame.level(ChannelId::candle(1).unwrap()) >= 100);
        for n in 2..=8 {
            assert_eq!(frame.level(ChannelId::candle(n).unwrap()), 0);
        }
    }

    #[test]
    fn test_delay_in_range() {
        let config = FlickerConfig::default();
        let mut engine = FlickerEngine::new(config, SmallRng::seed_from_u64(7));
        for _ in 0..500 {
            let delay = engine.next_delay_ms();
            assert!((config.min_delay_ms()..config.max_delay_ms()).contains(&delay));
        }
    }

    #[test]
    fn test_fixed_level_config() {
        let config = FlickerConfig::new(200, 200, 10, 11);
        let mut engine = FlickerEngine::new(config, SmallRng::seed_from_u64(3));
        let frame = engine.render(DayCounter::LAST);
        assert!(frame.iter().all(|(_, level)| level == 200));
        assert_eq!(engine.next_delay_ms(), 10);
    }
}
