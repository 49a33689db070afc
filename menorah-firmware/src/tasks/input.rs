// Input Loop - Taster abtasten, Tag weiterschalten, speichern
use defmt::{error, info};
use embassy_time::Timer;

use menorah_core::{ButtonInput, CounterStore, InputController};

/// Tastet den Taster für immer ab
///
/// Jeder bestätigte Druck wird synchron gespeichert, bevor weiter
/// abgetastet wird. Ein Speicherfehler wird nur geloggt: der Tag im
/// Speicher bleibt gültig, der nächste erfolgreiche Druck gleicht ab.
/// Ein hängender Taster blockiert weitere Drücke (kein Timeout).
///
/// # Parameter
/// - `button`: Taster (Hardware oder Mock)
/// - `controller`: Input Controller mit Tageszähler und Speicher
pub async fn input_loop<B: ButtonInput, S: CounterStore>(
    mut button: B,
    mut controller: InputController<'_, S>,
) -> ! {
    loop {
        let step = controller.sample(button.is_pressed());

        if let Some(report) = step.press {
            info!("Button pressed");
            info!("New day set: {}", report.day);
            match report.saved {
                Ok(()) => info!("Saved day: {}", report.day),
                Err(e) => error!("Failed to save day {}: {}", report.day, e),
            }
        }

        Timer::after_millis(step.next_sample_ms).await;
    }
}
