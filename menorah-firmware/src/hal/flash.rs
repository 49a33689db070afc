// Persistenter Speicher auf dem internen SPI-Flash
//
// esp-storage liefert die NorFlash-Traits, das Layout (zwei Sektoren,
// Records mit Prüfsumme) steckt in menorah_core::FlashDayStore.

use esp_storage::FlashStorage;
use menorah_core::FlashDayStore;

use crate::config::STORE_FLASH_OFFSET;

/// Tageszähler-Speicher auf dem internen Flash
pub type FlashStore = FlashDayStore<FlashStorage<'static>>;

/// Erstellt den Speicher (noch ungemountet)
pub fn new_flash_store(flash: esp_hal::peripherals::FLASH<'static>) -> FlashStore {
    FlashDayStore::new(FlashStorage::new(flash), STORE_FLASH_OFFSET)
}
