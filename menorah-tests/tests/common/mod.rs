//! Mock-Implementierungen für die Host-Tests
#![allow(dead_code)]

use embedded_storage::nor_flash::{ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash};
use menorah_core::{
    ButtonInput, CHANNEL_COUNT, ChannelId, CounterStore, DimmableOutputs, OutputError,
    StoreError,
};

// ============================================================================
// Mock Outputs
// ============================================================================

#[derive(Default)]
pub struct MockOutputs {
    /// Zuletzt gesetzte Helligkeit pro Ausgang
    pub levels: [Option<u8>; CHANNEL_COUNT],
    pub write_count: usize,
    /// Dieser Ausgang schlägt bei jedem Schreiben fehl
    pub failing_channel: Option<ChannelId>,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, channel: ChannelId) -> Option<u8> {
        self.levels[channel.index()]
    }
}

impl DimmableOutputs for MockOutputs {
    fn set_brightness(&mut self, channel: ChannelId, level: u8) -> Result<(), OutputError> {
        if self.failing_channel == Some(channel) {
            return Err(OutputError::WriteFailed);
        }
        self.levels[channel.index()] = Some(level);
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Store
// ============================================================================

#[derive(Default)]
pub struct MockStore {
    pub value: Option<u8>,
    pub save_count: usize,
    pub fail_load: Option<StoreError>,
    pub fail_save: Option<StoreError>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u8) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }
}

impl CounterStore for MockStore {
    fn load(&mut self) -> Result<Option<u8>, StoreError> {
        match self.fail_load {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }

    fn save(&mut self, value: u8) -> Result<(), StoreError> {
        if let Some(e) = self.fail_save {
            return Err(e);
        }
        self.value = Some(value);
        self.save_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Flash (NOR-Semantik: Schreiben kann Bits nur löschen)
// ============================================================================

pub const MOCK_SECTOR_SIZE: usize = 64;

pub struct MockFlash {
    pub data: Vec<u8>,
    pub erase_count: usize,
    pub fail_writes: bool,
    pub fail_erases: bool,
    pub fail_reads: bool,
    /// Nach so vielen erfolgreichen Schreibvorgängen schlägt genau einer fehl
    pub fail_write_after: Option<usize>,
    /// Wie `fail_write_after`, für Erase
    pub fail_erase_after: Option<usize>,
}

impl MockFlash {
    /// Gelöschter Flash mit `sectors` Sektoren
    pub fn new(sectors: usize) -> Self {
        Self {
            data: vec![0xFF; sectors * MOCK_SECTOR_SIZE],
            erase_count: 0,
            fail_writes: false,
            fail_erases: false,
            fail_reads: false,
            fail_write_after: None,
            fail_erase_after: None,
        }
    }

    /// Programmiert ein Wort direkt (für halbe Schreibvorgänge, fremde Daten)
    pub fn poke(&mut self, offset: usize, word: [u8; 4]) {
        for (cell, byte) in self.data[offset..offset + 4].iter_mut().zip(word) {
            *cell &= byte;
        }
    }

    pub fn peek(&self, offset: usize) -> [u8; 4] {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.data[offset..offset + 4]);
        word
    }
}

/// Zählt `countdown` herunter, `true` genau beim Erreichen von 0
fn fails_now(countdown: &mut Option<usize>) -> bool {
    match countdown {
        Some(0) => {
            *countdown = None;
            true
        }
        Some(n) => {
            *n -= 1;
            false
        }
        None => false,
    }
}

impl ErrorType for MockFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for MockFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(NorFlashErrorKind::Other);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        bytes.copy_from_slice(&self.data[start..end]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for MockFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = MOCK_SECTOR_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if self.fail_erases || fails_now(&mut self.fail_erase_after) {
            return Err(NorFlashErrorKind::Other);
        }
        let (from, to) = (from as usize, to as usize);
        if from % MOCK_SECTOR_SIZE != 0 || to % MOCK_SECTOR_SIZE != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        if to > self.data.len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        self.data[from..to].fill(0xFF);
        self.erase_count += 1;
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes || fails_now(&mut self.fail_write_after) {
            return Err(NorFlashErrorKind::Other);
        }
        let start = offset as usize;
        if start % Self::WRITE_SIZE != 0 || bytes.len() % Self::WRITE_SIZE != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        if start + bytes.len() > self.data.len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        for (cell, byte) in self.data[start..start + bytes.len()].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}

// ============================================================================
// Scripted Button
// ============================================================================

/// Liefert vorgegebene Abtastwerte, danach "losgelassen"
pub struct ScriptedButton {
    samples: std::vec::IntoIter<bool>,
}

impl ScriptedButton {
    pub fn new(samples: &[bool]) -> Self {
        Self {
            samples: samples.to_vec().into_iter(),
        }
    }
}

impl ButtonInput for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        self.samples.next().unwrap_or(false)
    }
}
