//! Input Controller
//!
//! Verbindet Entprellung, Tageszähler und Persistenz. Einziger Schreiber
//! des Tageszählers: jeder bestätigte Druck erhöht ihn und speichert ihn
//! synchron, bevor weiter abgetastet wird.

use crate::button::{ButtonState, ButtonTiming, PressDetector};
use crate::persistence::save_day;
use crate::shared::DayWriter;
use crate::traits::{CounterStore, StoreError};
use crate::types::DayCounter;

/// Bericht über einen verarbeiteten Tastendruck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressReport {
    pub day: DayCounter,
    /// Ergebnis des Speicherversuchs (Fehler werden nur geloggt)
    pub saved: Result<(), StoreError>,
}

/// Ergebnis eines Abtastschritts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputStep {
    pub next_sample_ms: u64,
    pub press: Option<PressReport>,
}

pub struct InputController<'a, S> {
    detector: PressDetector,
    day: DayWriter<'a>,
    store: S,
}

impl<'a, S: CounterStore> InputController<'a, S> {
    pub fn new(timing: ButtonTiming, day: DayWriter<'a>, store: S) -> Self {
        Self {
            detector: PressDetector::new(timing),
            day,
            store,
        }
    }

    pub fn day(&self) -> DayCounter {
        self.day.get()
    }

    pub fn state(&self) -> ButtonState {
        self.detector.state()
    }

    /// Verarbeitet einen Abtastwert des Tasters
    pub fn sample(&mut self, pressed: bool) -> InputStep {
        let detection = self.detector.sample(pressed);
        let press = detection.confirmed_press.then(|| self.advance());
        InputStep {
            next_sample_ms: detection.next_sample_ms,
            press,
        }
    }

    fn advance(&mut self) -> PressReport {
        let day = self.day.get().next();
        self.day.set(day);
        let saved = save_day(&mut self.store, day);
        PressReport { day, saved }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PressReport {
    fn format(&self, fmt: defmt::Formatter) {
        match self.saved {
            Ok(()) => defmt::write!(fmt, "PressReport {{ day: {}, saved }}", self.day),
            Err(e) => defmt::write!(fmt, "PressReport {{ day: {}, save failed: {} }}", self.day, e),
        }
    }
}
