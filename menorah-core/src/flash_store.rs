//! Stromausfallsicherer Ein-Byte-Speicher auf NOR-Flash
//!
//! Zwei Erase-Sektoren im Ping-Pong-Betrieb, alle Zugriffe in 4-Byte-Worten:
//!
//! ```text
//! Wort 0:   Header  ['M', 'N', LAYOUT_VERSION, Generation]
//! Wort 1..: Records [0xD7, Wert, !Wert, 0xD7]   (letzter gültiger gewinnt)
//!           0xFFFFFFFF = frei, Schreib-Cursor hinter dem letzten beschriebenen Wort
//! ```
//!
//! Jedes `save` hängt einen Record an. Ist der Sektor voll, wird in den
//! anderen Sektor rotiert: löschen, Record schreiben, Header (Generation + 1)
//! schreiben, alten Sektor löschen. Der Header kommt zuletzt, so ist nach
//! einem Stromausfall immer entweder der alte oder der neue Wert lesbar.
//! Ein halb geschriebener Record besteht die Prüfsumme nicht und wird
//! beim Lesen übersprungen.

use embedded_storage::nor_flash::NorFlash;

use crate::traits::{CounterStore, StoreError};

/// Version des Layouts, ein abweichender Header gilt als fremd
pub const LAYOUT_VERSION: u8 = 1;

const WORD: u32 = 4;
const ERASED: [u8; 4] = [0xFF; 4];
const MAGIC: [u8; 2] = *b"MN";
const RECORD_TAG: u8 = 0xD7;
const SECTORS: u32 = 2;

/// Was beim Mounten vorgefunden wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountReport {
    /// Gültiger Speicher gefunden
    Existing,
    /// Leerer Flash, frisch formatiert
    Formatted,
    /// Fremdes/inkompatibles Layout gelöscht und neu formatiert
    Reformatted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    Erased,
    Valid(u8),
    Foreign,
}

#[derive(Debug, Clone, Copy)]
struct Active {
    sector: u32,
    generation: u8,
    /// Offset des nächsten freien Worts innerhalb des Sektors
    cursor: u32,
}

/// [`CounterStore`] über einem NOR-Flash-Bereich aus zwei Sektoren
pub struct FlashDayStore<F> {
    flash: F,
    base: u32,
    active: Option<Active>,
}

impl<F: NorFlash> FlashDayStore<F> {
    /// Größe des benötigten Flash-Bereichs in Bytes
    pub const REGION_SIZE: u32 = SECTORS * F::ERASE_SIZE as u32;

    /// Erstellt den Speicher ab `base` (muss sektor-ausgerichtet sein)
    ///
    /// Es wird noch nichts gelesen, siehe [`FlashDayStore::mount`].
    pub fn new(flash: F, base: u32) -> Self {
        Self {
            flash,
            base,
            active: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.active.is_some()
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Initialisiert den Speicher (idempotent)
    ///
    /// Leere Sektoren werden formatiert, fremde gelöscht. Nach einer
    /// unterbrochenen Rotation gewinnt die neuere Generation.
    pub fn mount(&mut self) -> Result<MountReport, StoreError> {
        self.active = None;
        self.check_geometry()?;

        let headers = [self.read_header(0)?, self.read_header(1)?];
        let mut report = MountReport::Existing;
        let (sector, generation) = match headers {
            [Header::Valid(a), Header::Valid(b)] => {
                let (newer, generation) = if b == a.wrapping_add(1) { (1, b) } else { (0, a) };
                self.erase_sector(1 - newer)?;
                (newer, generation)
            }
            [Header::Valid(generation), _] => (0, generation),
            [_, Header::Valid(generation)] => (1, generation),
            _ => {
                report = if headers.contains(&Header::Foreign) {
                    MountReport::Reformatted
                } else {
                    MountReport::Formatted
                };
                for sector in 0..SECTORS {
                    self.erase_sector(sector)?;
                }
                self.write_word(self.sector_start(0), encode_header(0))?;
                (0, 0)
            }
        };

        let other = 1 - sector;
        if report == MountReport::Existing && headers[other as usize] == Header::Foreign {
            self.erase_sector(other)?;
        }

        let (_, cursor) = self.scan(sector)?;
        self.active = Some(Active {
            sector,
            generation,
            cursor,
        });
        Ok(report)
    }

    fn ensure_mounted(&mut self) -> Result<Active, StoreError> {
        if self.active.is_none() {
            self.mount().map_err(|_| StoreError::Open)?;
        }
        self.active.ok_or(StoreError::Open)
    }

    fn check_geometry(&self) -> Result<(), StoreError> {
        let word = WORD as usize;
        let aligned = self.base % Self::sector_size() == 0
            && word % F::WRITE_SIZE == 0
            && word % F::READ_SIZE == 0;
        let fits = self.base as usize + Self::REGION_SIZE as usize <= self.flash.capacity();
        if aligned && fits {
            Ok(())
        } else {
            Err(StoreError::Open)
        }
    }

    fn sector_size() -> u32 {
        F::ERASE_SIZE as u32
    }

    fn sector_start(&self, sector: u32) -> u32 {
        self.base + sector * Self::sector_size()
    }

    fn read_word(&mut self, offset: u32) -> Result<[u8; 4], StoreError> {
        let mut word = [0u8; 4];
        self.flash
            .read(offset, &mut word)
            .map_err(|_| StoreError::Read)?;
        Ok(word)
    }

    fn write_word(&mut self, offset: u32, word: [u8; 4]) -> Result<(), StoreError> {
        self.flash.write(offset, &word).map_err(|_| StoreError::Write)
    }

    fn erase_sector(&mut self, sector: u32) -> Result<(), StoreError> {
        let from = self.sector_start(sector);
        self.flash
            .erase(from, from + Self::sector_size())
            .map_err(|_| StoreError::Erase)
    }

    fn read_header(&mut self, sector: u32) -> Result<Header, StoreError> {
        let word = self.read_word(self.sector_start(sector))?;
        Ok(decode_header(word))
    }

    /// Letzter gültiger Wert und Schreib-Cursor eines Sektors
    ///
    /// Liest den ganzen Sektor: ein fehlgeschlagenes `save` hinterlässt
    /// eine gelöschte Lücke, dahinter können neuere Records liegen. Der
    /// Cursor steht hinter dem letzten beschriebenen Wort.
    fn scan(&mut self, sector: u32) -> Result<(Option<u8>, u32), StoreError> {
        let start = self.sector_start(sector);
        let mut latest = None;
        let mut cursor = WORD;
        for offset in (WORD..Self::sector_size()).step_by(WORD as usize) {
            let word = self.read_word(start + offset)?;
            if word == ERASED {
                continue;
            }
            cursor = offset + WORD;
            if let Some(value) = decode_record(word) {
                latest = Some(value);
            }
        }
        Ok((latest, cursor))
    }

    fn rotate(&mut self, active: Active, value: u8) -> Result<(), StoreError> {
        let next = 1 - active.sector;
        let generation = active.generation.wrapping_add(1);
        let start = self.sector_start(next);

        self.erase_sector(next)?;
        self.write_word(start + WORD, encode_record(value))?;
        self.write_word(start, encode_header(generation))?;
        self.active = Some(Active {
            sector: next,
            generation,
            cursor: 2 * WORD,
        });

        // Der Wert ist ab hier gespeichert. Bleibt der alte Sektor stehen,
        // löscht ihn das nächste `mount` (ältere Generation).
        let _ = self.erase_sector(active.sector);
        Ok(())
    }
}

impl<F: NorFlash> CounterStore for FlashDayStore<F> {
    fn load(&mut self) -> Result<Option<u8>, StoreError> {
        let active = self.ensure_mounted()?;
        let (latest, cursor) = self.scan(active.sector)?;
        self.active = Some(Active { cursor, ..active });
        Ok(latest)
    }

    fn save(&mut self, value: u8) -> Result<(), StoreError> {
        let active = self.ensure_mounted()?;
        if active.cursor + WORD > Self::sector_size() {
            return self.rotate(active, value);
        }

        // Cursor auch bei Fehler vorrücken: ein halb programmiertes Wort
        // lässt sich ohne Löschen nicht mehr beschreiben
        self.active = Some(Active {
            cursor: active.cursor + WORD,
            ..active
        });
        let offset = self.sector_start(active.sector) + active.cursor;
        self.write_word(offset, encode_record(value))
    }
}

fn encode_header(generation: u8) -> [u8; 4] {
    [MAGIC[0], MAGIC[1], LAYOUT_VERSION, generation]
}

fn decode_header(word: [u8; 4]) -> Header {
    match word {
        ERASED => Header::Erased,
        [m0, m1, LAYOUT_VERSION, generation] if [m0, m1] == MAGIC => Header::Valid(generation),
        _ => Header::Foreign,
    }
}

fn encode_record(value: u8) -> [u8; 4] {
    [RECORD_TAG, value, !value, RECORD_TAG]
}

fn decode_record(word: [u8; 4]) -> Option<u8> {
    match word {
        [RECORD_TAG, value, check, RECORD_TAG] if check == !value => Some(value),
        _ => None,
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MountReport {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MountReport::Existing => defmt::write!(fmt, "Existing"),
            MountReport::Formatted => defmt::write!(fmt, "Formatted"),
            MountReport::Reformatted => defmt::write!(fmt, "Reformatted"),
        }
    }
}
