//! Entprellung des Tasters
//!
//! Zustandsautomat über einzelne Abtastwerte. Er kennt keine Zeit, sondern
//! sagt dem Aufrufer nach jedem Abtastwert, wann er das nächste Mal abtasten
//! soll (Poll-Intervall oder Settle-Delay).
//!
//! ```text
//! Idle ──(losgelassen → gedrückt)──▶ Debouncing ──(noch gedrückt)──▶ Druck! ──▶ WaitRelease
//!  ▲                                     │                                          │
//!  └──────────────(Rauschen)─────────────┘◀─────────────(losgelassen)───────────────┘
//! ```

/// Zeitkonstanten der Abtastung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonTiming {
    pub poll_ms: u64,
    pub settle_ms: u64,
}

impl ButtonTiming {
    pub const fn new(poll_ms: u64, settle_ms: u64) -> Self {
        Self { poll_ms, settle_ms }
    }
}

impl Default for ButtonTiming {
    /// 10 ms Poll-Intervall, 50 ms Settle-Delay
    fn default() -> Self {
        Self::new(10, 50)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Taster in Ruhe, warte auf fallende Flanke
    Idle,
    /// Flanke gesehen, nächster Abtastwert nach dem Settle-Delay entscheidet
    Debouncing,
    /// Druck bestätigt und verarbeitet, warte auf Loslassen
    WaitRelease,
}

/// Ergebnis eines Abtastwerts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// `true` genau beim Übergang Debouncing → bestätigter Druck
    pub confirmed_press: bool,
    /// Wartezeit bis zum nächsten Abtastwert
    pub next_sample_ms: u64,
}

/// Erkennt bestätigte Tastendrücke
///
/// Pro physischem Druck wird genau ein `confirmed_press` gemeldet, egal
/// wie lange gehalten wird. Hängt der Taster, bleibt der Automat in
/// `WaitRelease`. Es gibt bewusst kein Timeout.
#[derive(Debug, Clone)]
pub struct PressDetector {
    timing: ButtonTiming,
    state: ButtonState,
    was_pressed: bool,
}

impl PressDetector {
    pub const fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            state: ButtonState::Idle,
            // Pull-Up: in Ruhe liest der Taster "losgelassen"
            was_pressed: false,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Verarbeitet einen Abtastwert
    pub fn sample(&mut self, pressed: bool) -> Detection {
        match self.state {
            ButtonState::Idle => {
                let falling_edge = !self.was_pressed && pressed;
                self.was_pressed = pressed;
                if falling_edge {
                    self.state = ButtonState::Debouncing;
                    self.wait(self.timing.settle_ms)
                } else {
                    self.wait(self.timing.poll_ms)
                }
            }
            ButtonState::Debouncing => {
                // was_pressed bleibt auf dem Flanken-Wert (gedrückt): ohne
                // beobachtetes Loslassen gibt es keine neue Flanke
                if pressed {
                    self.state = ButtonState::WaitRelease;
                    Detection {
                        confirmed_press: true,
                        next_sample_ms: self.timing.poll_ms,
                    }
                } else {
                    self.state = ButtonState::Idle;
                    self.wait(self.timing.poll_ms)
                }
            }
            ButtonState::WaitRelease => {
                if !pressed {
                    self.state = ButtonState::Idle;
                    self.was_pressed = false;
                }
                self.wait(self.timing.poll_ms)
            }
        }
    }

    fn wait(&self, ms: u64) -> Detection {
        Detection {
            confirmed_press: false,
            next_sample_ms: ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut PressDetector, samples: &[bool]) -> usize {
        samples
            .iter()
            .filter(|&&pressed| detector.sample(pressed).confirmed_press)
            .count()
    }

    #[test]
    fn test_clean_press() {
        let mut detector = PressDetector::new(ButtonTiming::default());
        assert_eq!(feed(&mut detector, &[false, true, true, false]), 1);
        assert_eq!(detector.state(), ButtonState::Idle);
    }

    #[test]
    fn test_edge_requests_settle_delay() {
        let mut detector = PressDetector::new(ButtonTiming::new(10, 50));
        assert_eq!(detector.sample(false).next_sample_ms, 10);
        assert_eq!(detector.sample(true).next_sample_ms, 50);
        assert_eq!(detector.state(), ButtonState::Debouncing);
    }

    #[test]
    fn test_noise_is_discarded() {
        let mut detector = PressDetector::new(ButtonTiming::default());
        assert_eq!(feed(&mut detector, &[false, true, false]), 0);
        assert_eq!(detector.state(), ButtonState::Idle);
    }

    #[test]
    fn test_pressed_at_power_on_counts_as_edge() {
        let mut detector = PressDetector::new(ButtonTiming::default());
        // Erster Abtastwert gedrückt: Flanke gegen den Ruhezustand
        assert_eq!(feed(&mut detector, &[true, true]), 1);
        assert_eq!(detector.state(), ButtonState::WaitRelease);
    }
}
