use crate::constants::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT};

/// # Registers
/// - (v) 16 8-bit registers V0..VF
///     - V0..VE are general purpose
///     - VF doubles as the carry, borrow and collision flag
/// - (i) a 16-bit index register; only the low 12 bits address memory
/// - (pc) a 16-bit program counter
/// - (sp) the number of return addresses on the stack
/// - 2 8-bit timers (delay & sound) counting down once per frame
///
/// Register indices come from 4-bit instruction fields, so `v` and `set_v`
/// are only ever called with `0..16`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    pub fn v(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn set_v(&mut self, x: usize, value: u8) {
        self.v[x] = value;
    }

    /// Sets VF to 1 or 0.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    /// Moves the pc on to the next instruction.
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Points the pc so that the next `advance_pc` lands on `target`.
    pub fn redirect_pc(&mut self, target: u16) {
        self.pc = target.wrapping_sub(2);
    }

    /// Skips the following instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Rewinds the pc so that the current instruction is fetched again.
    pub fn rewind_pc(&mut self) {
        self.pc = self.pc.wrapping_sub(2);
    }

    /// Counts both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
