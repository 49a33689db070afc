// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von menorah-core
pub use menorah_core::{InputController, LoadOutcome, MountReport, SharedDay, load_day};

// ============================================================================
// Testing-Strategie
// ============================================================================
//
// Diese Crate baut nur für xtensa-esp32-none-elf. Alle Logik, die sich ohne
// Hardware testen lässt, liegt in menorah-core:
//
// - Entprellung, Tageszähler, Flacker-Berechnung und Flash-Layout
//   sind reine Zustandsautomaten/Funktionen hinter Traits
// - menorah-tests prüft sie auf dem Host mit Mocks
//   (MockOutputs, MockStore, MockFlash, ScriptedButton)
//
// Hier bleiben nur die dünnen Hardware-Adapter (hal/) und die beiden
// Endlos-Schleifen (tasks/), die Timer::after_millis() brauchen.
