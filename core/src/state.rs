use crate::framebuffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::stack::Stack;

/// A snapshot of the Chip-8 machine state
///
/// ## CPU
/// - `registers`: V0..VF, I, PC, SP and the two timers
///
/// ## Memory
/// - `stack`: 16 return addresses for subroutine calls
/// - `memory`: 4096 bytes; glyphs at 0x000, program from 0x200
/// - `frame_buffer`: the 64x32 display
///
/// Instruction handlers take a `&State` and build the next one, so a handler
/// that faults leaves the machine untouched.
#[derive(Copy, Clone)]
pub struct State {
    pub registers: Registers,
    pub stack: Stack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
}

impl State {
    pub fn new() -> Self {
        State {
            registers: Registers::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
