// Taster am GPIO (active-low, interner Pull-Up)

use esp_hal::gpio::{AnyPin, Input, InputConfig, Pull};
use menorah_core::ButtonInput;

/// Active-low Taster: gedrückt = Pegel LOW
pub struct ActiveLowButton {
    input: Input<'static>,
}

impl ActiveLowButton {
    /// Konfiguriert den Pin als Eingang mit internem Pull-Up
    ///
    /// Ein externer Pull-Widerstand ist nicht nötig.
    pub fn new(pin: AnyPin<'static>) -> Self {
        let input = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
        Self { input }
    }
}

impl ButtonInput for ActiveLowButton {
    fn is_pressed(&mut self) -> bool {
        self.input.is_low()
    }
}
