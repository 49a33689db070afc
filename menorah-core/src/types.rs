//! Core Types für die Menorah-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Anzahl aller Ausgänge (Shamash + 8 Kerzen)
pub const CHANNEL_COUNT: usize = 9;

/// Anzahl der sequentiell zugeschalteten Kerzen
pub const CANDLE_COUNT: u8 = 8;

/// Tageszähler im geschlossenen Bereich [1, 8]
///
/// Gibt an, wie viele der acht Kerzen brennen. Der Shamash brennt immer
/// und wird hier nicht mitgezählt.
///
/// Der Wert liegt garantiert im gültigen Bereich: alles außerhalb wird
/// beim Erzeugen auf [`DayCounter::FIRST`] zurückgesetzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayCounter(u8);

impl DayCounter {
    /// Erster Tag (Fail-Safe-Default)
    pub const FIRST: Self = Self(1);

    /// Letzter Tag
    pub const LAST: Self = Self(CANDLE_COUNT);

    /// Erstellt einen DayCounter, `None` wenn `raw` außerhalb von [1, 8] liegt
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= 1 && raw <= CANDLE_COUNT {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Erstellt einen DayCounter, ungültige Werte werden zu Tag 1
    ///
    /// ```
    /// # use menorah_core::DayCounter;
    /// assert_eq!(DayCounter::new_or_first(5).get(), 5);
    /// assert_eq!(DayCounter::new_or_first(0), DayCounter::FIRST);
    /// assert_eq!(DayCounter::new_or_first(9), DayCounter::FIRST);
    /// ```
    pub const fn new_or_first(raw: u8) -> Self {
        match Self::new(raw) {
            Some(day) => day,
            None => Self::FIRST,
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Nächster Tag, nach Tag 8 folgt wieder Tag 1
    pub const fn next(self) -> Self {
        Self(self.0 % CANDLE_COUNT + 1)
    }
}

impl Default for DayCounter {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Zeitgruppe eines Ausgangs
///
/// Der Shamash hängt an einem eigenen (High-Speed) Timer, die Kerzen teilen
/// sich einen zweiten (Low-Speed) Timer. Beide laufen mit derselben Frequenz,
/// für das Flackern sind die Gruppen gleichwertig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingGroup {
    Master,
    Candles,
}

/// Logischer Ausgang: 0 = Shamash, 1..=8 = Kerzen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Der Shamash (immer an)
    pub const MASTER: Self = Self(0);

    /// Kerze `n` (1..=8), `None` außerhalb des Bereichs
    pub const fn candle(n: u8) -> Option<Self> {
        if n >= 1 && n <= CANDLE_COUNT {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Alle Ausgänge in aufsteigender Reihenfolge
    pub fn all() -> impl Iterator<Item = ChannelId> {
        (0..CHANNEL_COUNT as u8).map(Self)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_master(self) -> bool {
        self.0 == 0
    }

    pub const fn group(self) -> TimingGroup {
        if self.is_master() {
            TimingGroup::Master
        } else {
            TimingGroup::Candles
        }
    }

    /// Brennt dieser Ausgang am Tag `day`?
    ///
    /// Der Shamash brennt immer, Kerze `i` ab Tag `i`.
    pub const fn is_enabled(self, day: DayCounter) -> bool {
        self.is_master() || self.0 <= day.get()
    }
}

/// Beschreibung eines Ausgangs für die einmalige Konfiguration beim Boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: ChannelId,
    pub group: TimingGroup,
    /// Hardware-Kanal innerhalb der Zeitgruppe
    pub hw_channel: u8,
}

/// Feste 1:1 Zuordnung logischer Ausgänge zu Hardware-Kanälen
pub const CHANNEL_LAYOUT: [ChannelSpec; CHANNEL_COUNT] = [
    ChannelSpec { id: ChannelId(0), group: TimingGroup::Master, hw_channel: 0 },
    ChannelSpec { id: ChannelId(1), group: TimingGroup::Candles, hw_channel: 0 },
    ChannelSpec { id: ChannelId(2), group: TimingGroup::Candles, hw_channel: 1 },
    ChannelSpec { id: ChannelId(3), group: TimingGroup::Candles, hw_channel: 2 },
    ChannelSpec { id: ChannelId(4), group: TimingGroup::Candles, hw_channel: 3 },
    ChannelSpec { id: ChannelId(5), group: TimingGroup::Candles, hw_channel: 4 },
    ChannelSpec { id: ChannelId(6), group: TimingGroup::Candles, hw_channel: 5 },
    ChannelSpec { id: ChannelId(7), group: TimingGroup::Candles, hw_channel: 6 },
    ChannelSpec { id: ChannelId(8), group: TimingGroup::Candles, hw_channel: 7 },
];

/// Helligkeiten aller Ausgänge für einen Flacker-Zyklus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame([u8; CHANNEL_COUNT]);

impl Frame {
    /// Alle Ausgänge aus
    pub const OFF: Self = Self([0; CHANNEL_COUNT]);

    pub fn level(&self, channel: ChannelId) -> u8 {
        self.0[channel.index()]
    }

    pub fn set_level(&mut self, channel: ChannelId, level: u8) {
        self.0[channel.index()] = level;
    }

    /// (Ausgang, Helligkeit) Paare in Kanal-Reihenfolge
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, u8)> + '_ {
        ChannelId::all().zip(self.0.iter().copied())
    }
}


// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for DayCounter {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelId {
    fn format(&self, fmt: defmt::Formatter) {
        if self.is_master() {
            defmt::write!(fmt, "Shamash")
        } else {
            defmt::write!(fmt, "Kerze {}", self.0)
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimingGroup {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimingGroup::Master => defmt::write!(fmt, "Master"),
            TimingGroup::Candles => defmt::write!(fmt, "Candles"),
        }
    }
}
