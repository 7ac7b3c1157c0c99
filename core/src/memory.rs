use crate::constants::{GLYPH_HEIGHT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::LoadError;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` holds the built-in digit glyphs
/// - `0x200..` holds the loaded program
///
/// Indexing takes a `usize` that has already been resolved against the
/// engine's `FaultPolicy`, so it is always below `MEMORY_SIZE`.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a program image to `PROGRAM_START`.
    ///
    /// Programs that don't fit are rejected rather than truncated.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> u8 {
        self.bytes[address]
    }

    pub fn write(&mut self, address: usize, value: u8) {
        self.bytes[address] = value;
    }

    /// Combines the bytes at `hi` and `lo` into a big-endian instruction word.
    pub fn word(&self, hi: usize, lo: usize) -> u16 {
        u16::from(self.bytes[hi]) << 8 | u16::from(self.bytes[lo])
    }

    pub fn bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    /// Address of the built-in glyph for the low nibble of `digit`.
    pub fn glyph_address(digit: u8) -> u16 {
        u16::from(digit & 0xF) * GLYPH_HEIGHT
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
