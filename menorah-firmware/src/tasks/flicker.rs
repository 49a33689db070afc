// Flicker Task - Animiert alle Ausgänge wie Kerzenflammen
use defmt::{error, info};
use embassy_time::Timer;
use rand::RngCore;
use rand::rngs::SmallRng;

use menorah_core::{DayReader, DimmableOutputs, FlickerConfig, FlickerEngine};

use crate::config::FLICKER_CONFIG;
use crate::hal::LedcOutputs;

/// Flicker Logic - Testbare Schleife ohne Hardware-Abhängigkeit
///
/// Liest den Tageszähler ohne Synchronisation: ein veralteter Wert hält
/// höchstens einen Zyklus an. Endet nie.
///
/// # Parameter
/// - `outputs`: Dimmbare Ausgänge (LEDC oder Mock)
/// - `day`: Lesender Zugriff auf den Tageszähler
/// - `config`: Helligkeits- und Pausenbereich
/// - `rng`: Zufallsquelle
pub async fn flicker_logic<O: DimmableOutputs, R: RngCore>(
    mut outputs: O,
    day: DayReader<'_>,
    config: FlickerConfig,
    rng: R,
) -> ! {
    info!(
        "Flicker started: level {}-{}, delay {}-{} ms",
        config.min_level(),
        config.max_level(),
        config.min_delay_ms(),
        config.max_delay_ms()
    );
    let mut engine = FlickerEngine::new(config, rng);

    loop {
        let (delay_ms, applied) = engine.cycle(day.get(), &mut outputs);
        if let Err((channel, e)) = applied {
            error!("Failed to set brightness of {}: {}", channel, e);
        }

        // Async Delay: gibt CPU an den Input Controller zurück
        Timer::after_millis(delay_ms).await;
    }
}

/// Flicker Task - Embassy Task für parallele Ausführung
///
/// # Parameter
/// - `outputs`: Konfigurierte LEDC-Ausgänge
/// - `day`: Lesender Zugriff auf den Tageszähler
/// - `rng`: Mit Hardware-Zufall geseedeter SmallRng
#[embassy_executor::task]
pub async fn flicker_task(outputs: LedcOutputs, day: DayReader<'static>, rng: SmallRng) {
    flicker_logic(outputs, day, FLICKER_CONFIG, rng).await
}
