//! Geteilter Tageszähler
//!
//! Genau ein Schreiber (Input Controller) und beliebig viele Leser
//! (Flicker Engine). Der Zähler ist ein einzelnes Byte: ein zerrissener
//! Lesezugriff ist unmöglich, ein veralteter Wert hält höchstens einen
//! Flacker-Zyklus lang an. Deshalb gibt es hier kein Mutex, nur
//! `Relaxed` Loads/Stores.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::types::DayCounter;

pub struct SharedDay {
    day: AtomicU8,
}

impl SharedDay {
    pub const fn new(initial: DayCounter) -> Self {
        Self {
            day: AtomicU8::new(initial.get()),
        }
    }

    /// Teilt den Zähler in genau einen Schreiber und einen Leser auf
    ///
    /// Der exklusive Borrow stellt sicher, dass es nur einen `DayWriter` gibt.
    pub fn split(&mut self) -> (DayWriter<'_>, DayReader<'_>) {
        let shared: &SharedDay = self;
        (DayWriter { day: &shared.day }, DayReader { day: &shared.day })
    }
}

/// Einziger schreibender Zugriff auf den Tageszähler
pub struct DayWriter<'a> {
    day: &'a AtomicU8,
}

impl DayWriter<'_> {
    pub fn get(&self) -> DayCounter {
        DayCounter::new_or_first(self.day.load(Ordering::Relaxed))
    }

    pub fn set(&mut self, day: DayCounter) {
        self.day.store(day.get(), Ordering::Relaxed);
    }
}

/// Lesender Zugriff, darf beliebig kopiert werden
#[derive(Clone, Copy)]
pub struct DayReader<'a> {
    day: &'a AtomicU8,
}

impl DayReader<'_> {
    pub fn get(&self) -> DayCounter {
        DayCounter::new_or_first(self.day.load(Ordering::Relaxed))
    }
}
