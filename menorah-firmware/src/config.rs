// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die Pin-Zuordnung steht als Typ in bin/main.rs (esp-hal Peripherals):
//   Taster:    GPIO0  (Boot-Taster, active-low, interner Pull-Up)
//   Shamash:   GPIO21 (LEDC High-Speed Kanal 0)
//   Kerze 1-8: GPIO22, 23, 19, 18, 5, 17, 16, 4 (LEDC Low-Speed Kanal 0-7)

use menorah_core::{ButtonTiming, FlickerConfig};

// ============================================================================
// PWM (LEDC) Konfiguration
// ============================================================================

/// PWM-Frequenz in Hz, für beide Zeitgruppen gleich
/// 5 kHz ist weit oberhalb jedes sichtbaren Flimmerns
pub const PWM_FREQUENCY_HZ: u32 = 5_000;

/// Maximaler Duty-Wert bei 8-Bit Auflösung
pub const PWM_MAX_DUTY: u32 = (1 << 8) - 1;

// ============================================================================
// Flacker-Konfiguration
// ============================================================================

/// Minimale Helligkeit brennender Ausgänge (dunkel, aber sichtbar)
pub const FLICKER_MIN_LEVEL: u8 = 100;

/// Maximale Helligkeit brennender Ausgänge
pub const FLICKER_MAX_LEVEL: u8 = 255;

/// Pause zwischen zwei Flacker-Zyklen in ms (min inklusiv, max exklusiv)
pub const FLICKER_MIN_DELAY_MS: u64 = 40;
pub const FLICKER_MAX_DELAY_MS: u64 = 60;

pub const FLICKER_CONFIG: FlickerConfig = FlickerConfig::new(
    FLICKER_MIN_LEVEL,
    FLICKER_MAX_LEVEL,
    FLICKER_MIN_DELAY_MS,
    FLICKER_MAX_DELAY_MS,
);

// ============================================================================
// Taster-Konfiguration
// ============================================================================

/// Abtast-Intervall des Tasters in ms
pub const BUTTON_POLL_MS: u64 = 10;

/// Settle-Delay nach einer Flanke in ms
pub const BUTTON_SETTLE_MS: u64 = 50;

pub const BUTTON_TIMING: ButtonTiming = ButtonTiming::new(BUTTON_POLL_MS, BUTTON_SETTLE_MS);

// ============================================================================
// Persistenz-Konfiguration
// ============================================================================

/// Start des Flash-Bereichs für den Tageszähler
/// 0x9000 = NVS-Partition der Standard-Partitionstabelle (24 KB, wir nutzen 8 KB)
pub const STORE_FLASH_OFFSET: u32 = 0x9000;
