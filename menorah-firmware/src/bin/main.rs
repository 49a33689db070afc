// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::{error, info, warn};
use embassy_executor::Spawner;

// ESP32 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::Pin;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use static_cell::StaticCell;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use menorah::config::BUTTON_TIMING;
use menorah::hal::{ActiveLowButton, LedcOutputs, OutputPins, new_flash_store};
use menorah::tasks::{flicker_task, input_loop};
use menorah::{InputController, LoadOutcome, MountReport, SharedDay, load_day};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Boot-Reihenfolge: Speicher mounten → Tag laden → Ausgänge (aus)
/// konfigurieren → Taster konfigurieren → Flicker Task starten →
/// Input Controller für immer.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32 Konfiguration: CPU auf maximale Taktfrequenz (240 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // 1. Persistenz: mounten (idempotent) und Tag laden
    // Fehler sind nie fatal: ohne Speicher starten wir mit Tag 1
    let mut store = new_flash_store(peripherals.FLASH);
    match store.mount() {
        Ok(MountReport::Existing) => info!("Store mounted"),
        Ok(MountReport::Formatted) => info!("Store formatted (first boot)"),
        Ok(MountReport::Reformatted) => warn!("Incompatible store erased and reformatted"),
        Err(e) => error!("Error ({}) mounting store!", e),
    }

    let outcome = load_day(&mut store);
    match outcome {
        LoadOutcome::Stored(day) => info!("Loaded day: {}", day),
        LoadOutcome::Missing => info!("The value is not initialized yet!"),
        LoadOutcome::OutOfRange(raw) => warn!("Stored day {} out of range, using 1", raw),
        LoadOutcome::Failed(e) => error!("Error ({}) reading day!", e),
    }
    let day = outcome.day();

    // 2. Ausgänge konfigurieren (alle aus) - ohne Ausgänge ist das Gerät nutzlos
    let pins = OutputPins {
        master: peripherals.GPIO21.degrade(),
        candles: [
            peripherals.GPIO22.degrade(),
            peripherals.GPIO23.degrade(),
            peripherals.GPIO19.degrade(),
            peripherals.GPIO18.degrade(),
            peripherals.GPIO5.degrade(),
            peripherals.GPIO17.degrade(),
            peripherals.GPIO16.degrade(),
            peripherals.GPIO4.degrade(),
        ],
    };
    let outputs =
        LedcOutputs::configure(peripherals.LEDC, pins).expect("Failed to configure LEDC outputs");

    // 3. Taster konfigurieren (GPIO0 = Boot-Taster)
    let button = ActiveLowButton::new(peripherals.GPIO0.degrade());

    // Geteilter Tageszähler: ein Schreiber (Input), ein Leser (Flicker)
    static SHARED_DAY: StaticCell<SharedDay> = StaticCell::new();
    let (day_writer, day_reader) = SHARED_DAY.init(SharedDay::new(day)).split();

    // 4. Flicker Task starten
    // Seed für SmallRng vom Hardware-RNG
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;
    spawner
        .spawn(flicker_task(outputs, day_reader, SmallRng::seed_from_u64(seed)))
        .unwrap();

    info!("Menorah started. Current day: {}", day);

    // 5. Input Controller: läuft für immer in main()
    let controller = InputController::new(BUTTON_TIMING, day_writer, store);
    input_loop(button, controller).await
}
