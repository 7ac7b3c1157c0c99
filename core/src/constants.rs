/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Highest valid memory address.
pub const MAX_ADDRESS: u16 = (MEMORY_SIZE - 1) as u16;

/// Address at which programs are loaded and execution starts.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// Register overwritten with carry, borrow, shifted-out bits and collisions.
pub const FLAG_REGISTER: usize = 0xF;

/// Number of return addresses the stack can hold.
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Sprites are always one byte wide.
pub const SPRITE_WIDTH: usize = 8;

/// Target instruction rate.
pub const CYCLES_PER_SECOND: u32 = 540;

/// Rate at which the host calls `step` and the timers count down.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Instructions executed per frame by default.
pub const CYCLES_PER_FRAME: u32 = CYCLES_PER_SECOND / FRAMES_PER_SECOND;

/// Height in bytes of each built-in digit glyph.
pub const GLYPH_HEIGHT: u16 = 5;

/// Built-in glyphs for the hex digits 0..F, stored from address 0x000.
///
/// Each glyph is 4 pixels wide (the high nibble of each byte) and 5 rows tall,
/// so the glyph for digit `d` lives at `d * GLYPH_HEIGHT`.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
