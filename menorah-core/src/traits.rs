//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::ChannelId;

/// Fehler-Typ für Ausgangs-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    WriteFailed,
}

/// Fehler-Typ für den persistenten Zähler-Speicher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Speicher konnte nicht geöffnet/gemountet werden
    Open,
    /// Lesen vom Medium fehlgeschlagen
    Read,
    /// Schreiben auf das Medium fehlgeschlagen
    Write,
    /// Löschen eines Sektors fehlgeschlagen
    Erase,
}

/// Trait für dimmbare Ausgänge (PWM)
///
/// Abstrahiert N unabhängige Ausgänge mit fester 8-Bit Auflösung.
///
/// # Implementierungen
/// - **Production:** LedcOutputs (ESP32 LEDC Peripheral)
/// - **Testing:** MockOutputs (in-memory Mock)
pub trait DimmableOutputs {
    /// Setzt die Helligkeit eines Ausgangs und übernimmt sie sofort
    ///
    /// Wird dutzende Male pro Sekunde aufgerufen: darf weder allokieren
    /// noch blockieren.
    fn set_brightness(&mut self, channel: ChannelId, level: u8) -> Result<(), OutputError>;
}

/// Trait für den Taster
pub trait ButtonInput {
    /// `true` solange der Taster gedrückt ist
    fn is_pressed(&mut self) -> bool;
}

/// Trait für einen dauerhaften Ein-Byte-Speicher
///
/// # Implementierungen
/// - **Production:** FlashDayStore über `esp-storage`
/// - **Testing:** MockStore / FlashDayStore über MockFlash
pub trait CounterStore {
    /// Liest den gespeicherten Rohwert
    ///
    /// `Ok(None)` heißt: noch nie gespeichert (erster Boot). Der Wert
    /// wird hier NICHT auf Gültigkeit geprüft.
    fn load(&mut self) -> Result<Option<u8>, StoreError>;

    /// Schreibt den Rohwert dauerhaft
    fn save(&mut self, value: u8) -> Result<(), StoreError>;
}

impl<T: CounterStore + ?Sized> CounterStore for &mut T {
    fn load(&mut self) -> Result<Option<u8>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, value: u8) -> Result<(), StoreError> {
        (**self).save(value)
    }
}

impl<T: DimmableOutputs + ?Sized> DimmableOutputs for &mut T {
    fn set_brightness(&mut self, channel: ChannelId, level: u8) -> Result<(), OutputError> {
        (**self).set_brightness(channel, level)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OutputError::WriteFailed => defmt::write!(fmt, "WriteFailed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StoreError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            StoreError::Open => defmt::write!(fmt, "Open"),
            StoreError::Read => defmt::write!(fmt, "Read"),
            StoreError::Write => defmt::write!(fmt, "Write"),
            StoreError::Erase => defmt::write!(fmt, "Erase"),
        }
    }
}
