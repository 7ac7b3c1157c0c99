use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};

/// # FrameBuffer
/// The Chip-8 display is 64x32 monochrome pixels.
///
/// Each row is a single `u64` with column 0 in the most significant bit, so a
/// sprite byte is positioned by shifting it into the top byte and rotating it
/// right by `x`. Rotation rather than shifting is what makes sprites wrap
/// around the right edge onto the left.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [u64; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            rows: [0; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.rows = [0; DISPLAY_HEIGHT];
    }

    /// XORs `sprite` onto the display with its top-left corner at `(x, y)`.
    ///
    /// Rows wrap vertically and columns wrap horizontally. Returns whether any
    /// lit pixel was turned off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collided = false;
        for (offset, &byte) in sprite.iter().enumerate() {
            let row = (usize::from(y) + offset) % DISPLAY_HEIGHT;
            let mask = Self::mask(x, byte);
            collided |= self.rows[row] & mask != 0;
            self.rows[row] ^= mask;
        }
        collided
    }

    /// Positions a sprite byte within a row word.
    fn mask(x: u8, byte: u8) -> u64 {
        (u64::from(byte) << (DISPLAY_WIDTH - SPRITE_WIDTH))
            .rotate_right(u32::from(x) % DISPLAY_WIDTH as u32)
    }

    /// Whether the pixel at column `x`, row `y` is lit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        (self.rows[y % DISPLAY_HEIGHT] >> (DISPLAY_WIDTH - 1 - x % DISPLAY_WIDTH)) & 1 == 1
    }

    pub fn rows(&self) -> &[u64; DISPLAY_HEIGHT] {
        &self.rows
    }

    /// Iterates the display row by row, yielding each pixel left to right.
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        (0..DISPLAY_HEIGHT)
            .flat_map(move |y| (0..DISPLAY_WIDTH).map(move |x| self.pixel(x, y)))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
