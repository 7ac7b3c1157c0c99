use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::error::{Fault, FaultKind, LoadError};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::operations::{execute, Context};
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad` mask last supplied by the host
///  - the random source used by `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - updating the keypad
/// - advancing the machine one frame at a time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    rng: Box<dyn RngCore>,
    config: Config,
    program: Vec<u8>,
}

impl Chip8 {
    /// Creates a machine whose random source is seeded from the OS.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, Box::new(StdRng::from_entropy()))
    }

    /// Creates a machine drawing random bytes from `rng`.
    pub fn with_rng(config: Config, rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::default(),
            rng,
            config,
            program: Vec::new(),
        }
    }

    /// Copies a program image into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_program(program)?;
        self.program = program.to_vec();
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader positioned at the start of a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Restores the power-on state, keeping the loaded program.
    pub fn reset(&mut self) {
        self.state = State::new();
        // The program was checked when it was first loaded
        if self.state.memory.load_program(&self.program).is_err() {
            warn!("loaded program no longer fits in memory");
        }
        debug!("reset machine");
    }

    /// Sets which keys are held; bit `k` for key `k`.
    pub fn set_keypad(&mut self, mask: u16) {
        self.keypad = Keypad::new(mask);
    }

    /// Runs one frame: `cycles_per_frame` instructions then one timer tick.
    ///
    /// Returns whether the sound timer is still running, i.e. whether the host
    /// should be playing a tone.
    ///
    /// A fault stops the frame at the faulting instruction. Its effects are
    /// discarded, the pc is left pointing at it and the timers are not ticked.
    pub fn step(&mut self) -> Result<bool, Fault> {
        for _ in 0..self.config.cycles_per_frame {
            self.cycle()?;
        }
        self.state.registers.tick_timers();
        Ok(self.state.registers.sound_timer > 0)
    }

    /// Fetches, decodes and executes a single instruction.
    pub fn cycle(&mut self) -> Result<(), Fault> {
        let pc = self.state.registers.pc;
        let op = self.fetch().map_err(|kind| self.fault(pc, None, kind))?;
        let instruction =
            Instruction::decode(op).map_err(|kind| self.fault(pc, Some(op), kind))?;
        trace!(
            "{:04X} {:04X} {:?} v{:02X?} i{:04X}",
            pc,
            op,
            instruction,
            self.state.registers.v,
            self.state.registers.i
        );

        let mut ctx = Context {
            keypad: self.keypad,
            rng: self.rng.as_mut(),
            policy: self.config.fault_policy,
        };
        let mut next = match execute(instruction, &self.state, &mut ctx) {
            Ok(next) => next,
            Err(kind) => return Err(self.fault(pc, Some(op), kind)),
        };
        next.registers.advance_pc();
        self.state = next;
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn fetch(&self) -> Result<u16, FaultKind> {
        let policy = self.config.fault_policy;
        let pc = self.state.registers.pc;
        let hi = policy.address(pc, 0)?;
        let lo = policy.address(pc, 1)?;
        Ok(self.state.memory.word(hi, lo))
    }

    fn fault(&self, pc: u16, opcode: Option<u16>, kind: FaultKind) -> Fault {
        let fault = Fault { pc, opcode, kind };
        warn!("{} (opcode {:04X?})", fault, opcode);
        fault
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::config::FaultPolicy;

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_rng(Config::default(), Box::new(StepRng::new(0, 1)));
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8_with(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch(), Ok(0xAABB));
    }

    #[test]
    fn test_cycle_advances_pc() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        let starting_pc = chip8.state.registers.pc;
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_step_runs_nine_cycles() {
        // nine loads into V0..V8, then a tenth that must not run yet
        let program: Vec<u8> = (0..10u8).flat_map(|x| vec![0x60 | x, 0x01]).collect();
        let mut chip8 = chip8_with(&program);
        chip8.step().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x200 + 18);
        assert_eq!(chip8.state.registers.v[..9], [0x01; 9]);
        assert_eq!(chip8.state.registers.v[9], 0x00);
    }

    #[test]
    fn test_step_respects_configured_cycles() {
        let config = Config {
            cycles_per_frame: 2,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_rng(config, Box::new(StepRng::new(0, 1)));
        chip8.load_program(&[0x60, 0x01, 0x61, 0x01, 0x62, 0x01]).unwrap();
        assert_eq!(chip8.config().cycles_per_frame, 2);
        chip8.step().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x204);
        assert_eq!(chip8.state.registers.v[0x2], 0x00);
    }

    #[test]
    fn test_step_ticks_timers_once() {
        // V0 = 3; DT = V0; ST = V0; loop
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06]);
        assert_eq!(chip8.step(), Ok(true));
        assert_eq!(chip8.state.registers.delay_timer, 2);
        assert_eq!(chip8.state.registers.sound_timer, 2);
        assert_eq!(chip8.step(), Ok(true));
        assert_eq!(chip8.step(), Ok(false));
        assert_eq!(chip8.step(), Ok(false));
        assert_eq!(chip8.state.registers.delay_timer, 0);
    }

    #[test]
    fn test_delay_timer_round_trip_within_frame() {
        for x in 0..0xF_u8 {
            // Vx = 0x42; DT = Vx; Vx = 0; Vx = DT
            let program = [0x60 | x, 0x42, 0xF0 | x, 0x15, 0x60 | x, 0x00, 0xF0 | x, 0x07];
            let mut chip8 = chip8_with(&program);
            for _ in 0..4 {
                chip8.cycle().unwrap();
            }
            assert_eq!(chip8.state.registers.v[usize::from(x)], 0x42);
        }
    }

    #[test]
    fn test_call_return_round_trip() {
        // 0x200: call 0x206; 0x202: jp 0x202; ...; 0x206: ret
        let mut chip8 = chip8_with(&[0x22, 0x06, 0x12, 0x02, 0x00, 0x00, 0x00, 0xEE]);
        let before = chip8.state.registers.pc;
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x206);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, before + 2);
        assert_eq!(chip8.state.registers.sp, 0);
    }

    #[test]
    fn test_wait_for_key_polls_until_pressed() {
        // V3 = next key; jp 0x202
        let mut chip8 = chip8_with(&[0xF3, 0x0A, 0x12, 0x02]);
        chip8.step().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x200);

        chip8.set_keypad(1 << 0x7);
        chip8.step().unwrap();
        assert_eq!(chip8.state.registers.v[0x3], 0x7);
        assert_eq!(chip8.state.registers.pc, 0x202);
    }

    #[test]
    fn test_random_uses_injected_source() {
        let mut chip8 = Chip8::with_rng(Config::default(), Box::new(StepRng::new(0x5A, 0)));
        chip8.load_program(&[0xC0, 0xFF, 0xC1, 0xF0]).unwrap();
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.v[0x0], 0x5A);
        assert_eq!(chip8.state.registers.v[0x1], 0x50);
    }

    #[test]
    fn test_invalid_instruction_faults() {
        let mut chip8 = chip8_with(&[0x60, 0x05, 0x80, 0x08]);
        assert_eq!(
            chip8.step(),
            Err(Fault {
                pc: 0x202,
                opcode: Some(0x8008),
                kind: FaultKind::InvalidInstruction,
            })
        );
        // The first instruction ran, the faulting one did not
        assert_eq!(chip8.state.registers.v[0x0], 0x05);
        assert_eq!(chip8.state.registers.pc, 0x202);
    }

    #[test]
    fn test_fault_skips_timer_tick() {
        // V0 = 5; DT = V0; invalid
        let mut chip8 = chip8_with(&[0x60, 0x05, 0xF0, 0x15, 0xFF, 0xFF]);
        assert!(chip8.step().is_err());
        assert_eq!(chip8.state.registers.delay_timer, 5);
    }

    #[test]
    fn test_stack_overflow_faults() {
        // call 0x200 forever
        let mut chip8 = chip8_with(&[0x22, 0x00]);
        assert_eq!(chip8.step().map_err(|f| f.kind), Ok(false));
        let fault = chip8.step().unwrap_err();
        assert_eq!(fault.kind, FaultKind::StackOverflow);
        assert_eq!(chip8.state.registers.sp, 16);
    }

    #[test]
    fn test_legacy_stack_wraps() {
        let config = Config {
            fault_policy: FaultPolicy::Legacy,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_rng(config, Box::new(StepRng::new(0, 1)));
        chip8.load_program(&[0x22, 0x00]).unwrap();
        for _ in 0..4 {
            assert_eq!(chip8.step(), Ok(false));
        }
        assert_eq!(chip8.state.registers.sp, 4);
    }

    #[test]
    fn test_fetch_past_end_of_memory_faults() {
        // V0 = 0xFF; jp V0 + 0xF01 -> 0x1000
        let mut chip8 = chip8_with(&[0x60, 0xFF, 0xBF, 0x01]);
        let fault = chip8.step().unwrap_err();
        assert_eq!(fault.pc, 0x1000);
        assert_eq!(fault.opcode, None);
        assert_eq!(fault.kind, FaultKind::AddressOutOfRange { address: 0x1000 });
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::default();
        let mut rom: &[u8] = &[0x00, 0xE0];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.state.memory.bytes()[0x200..0x202], [0x00, 0xE0]);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut chip8 = Chip8::default();
        let rom = vec![0x00; 4096];
        let mut reader: &[u8] = &rom;
        assert!(matches!(
            chip8.load_rom(&mut reader),
            Err(LoadError::ProgramTooLarge { size: 4096, max: 3584 })
        ));
    }

    #[test]
    fn test_reset_keeps_program() {
        let mut chip8 = chip8_with(&[0x61, 0x22, 0x12, 0x02]);
        chip8.step().unwrap();
        assert_eq!(chip8.state.registers.v[0x1], 0x22);
        chip8.reset();
        assert_eq!(chip8.state.registers.v[0x1], 0x00);
        assert_eq!(chip8.state.registers.pc, 0x200);
        assert_eq!(chip8.state.memory.bytes()[0x200..0x204], [0x61, 0x22, 0x12, 0x02]);
    }
}
