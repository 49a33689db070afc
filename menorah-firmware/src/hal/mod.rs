// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus
// menorah-core, damit die Logik auf dem Host testbar bleibt.

pub mod button;
pub mod flash;
pub mod ledc_outputs;

pub use button::ActiveLowButton;
pub use flash::{FlashStore, new_flash_store};
pub use ledc_outputs::{LedcOutputs, OutputConfigError, OutputPins};
