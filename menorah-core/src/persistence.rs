//! Laden und Speichern des Tageszählers
//!
//! Verfügbarkeit vor Haltbarkeit: Speicherfehler sind nie fatal. Beim Laden
//! wird auf Tag 1 zurückgefallen, beim Speichern wird der Fehler gemeldet und
//! verworfen. Kein Retry, keine Queue.

use crate::traits::{CounterStore, StoreError};
use crate::types::DayCounter;

/// Ergebnis von [`load_day`], damit der Aufrufer passend loggen kann
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Gültiger Wert gefunden
    Stored(DayCounter),
    /// Noch nie gespeichert (erster Boot)
    Missing,
    /// Gespeicherter Wert außerhalb [1, 8]
    OutOfRange(u8),
    /// Speicher nicht lesbar
    Failed(StoreError),
}

impl LoadOutcome {
    /// Der zu verwendende Tag, Tag 1 in allen Fehlerfällen
    pub fn day(&self) -> DayCounter {
        match self {
            LoadOutcome::Stored(day) => *day,
            _ => DayCounter::FIRST,
        }
    }
}

/// Lädt den Tageszähler, blockiert den Start nie
pub fn load_day<S: CounterStore>(store: &mut S) -> LoadOutcome {
    match store.load() {
        Ok(Some(raw)) => match DayCounter::new(raw) {
            Some(day) => LoadOutcome::Stored(day),
            None => LoadOutcome::OutOfRange(raw),
        },
        Ok(None) => LoadOutcome::Missing,
        Err(e) => LoadOutcome::Failed(e),
    }
}

/// Speichert den Tageszähler (ein Versuch, kein Retry)
pub fn save_day<S: CounterStore>(store: &mut S, day: DayCounter) -> Result<(), StoreError> {
    store.save(day.get())
}

#[cfg(feature = "defmt")]
impl defmt::Format for LoadOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LoadOutcome::Stored(day) => defmt::write!(fmt, "Stored({})", day),
            LoadOutcome::Missing => defmt::write!(fmt, "Missing"),
            LoadOutcome::OutOfRange(raw) => defmt::write!(fmt, "OutOfRange({})", raw),
            LoadOutcome::Failed(e) => defmt::write!(fmt, "Failed({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStore(Result<Option<u8>, StoreError>);

    impl CounterStore for FixedStore {
        fn load(&mut self) -> Result<Option<u8>, StoreError> {
            self.0
        }

        fn save(&mut self, value: u8) -> Result<(), StoreError> {
            self.0 = Ok(Some(value));
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_defaults_to_first() {
        let outcome = load_day(&mut FixedStore(Ok(None)));
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(outcome.day(), DayCounter::FIRST);
    }

    #[test]
    fn test_load_out_of_range_defaults_to_first() {
        for raw in [0, 9, 0xFF] {
            let outcome = load_day(&mut FixedStore(Ok(Some(raw))));
            assert_eq!(outcome, LoadOutcome::OutOfRange(raw));
            assert_eq!(outcome.day(), DayCounter::FIRST);
        }
    }

    #[test]
    fn test_load_failure_defaults_to_first() {
        let outcome = load_day(&mut FixedStore(Err(StoreError::Read)));
        assert_eq!(outcome.day(), DayCounter::FIRST);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = FixedStore(Ok(None));
        save_day(&mut store, DayCounter::LAST).unwrap();
        assert_eq!(load_day(&mut store), LoadOutcome::Stored(DayCounter::LAST));
    }
}
