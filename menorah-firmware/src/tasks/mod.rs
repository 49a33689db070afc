// Task-Modul: Enthält die beiden Endlos-Schleifen
//
// Flicker läuft als eigener Embassy Task, der Input Controller läuft
// direkt in main(). Einziger geteilter Zustand ist der Tageszähler.

pub mod flicker;
pub mod input;

// Re-export Tasks für einfachen Import
pub use flicker::flicker_task;
pub use input::input_loop;
