use crate::constants::{CYCLES_PER_FRAME, MAX_ADDRESS, STACK_DEPTH};
use crate::error::FaultKind;

/// How out-of-range memory and stack accesses are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Report out-of-range accesses as faults.
    Strict,
    /// Wrap addresses to 12 bits and the stack pointer to the stack depth,
    /// for ROMs written against interpreters that silently wrapped.
    Legacy,
}

impl FaultPolicy {
    /// Resolves `base + offset` to an index into memory.
    pub fn address(self, base: u16, offset: u16) -> Result<usize, FaultKind> {
        let address = u32::from(base) + u32::from(offset);
        match self {
            FaultPolicy::Legacy => Ok((address & u32::from(MAX_ADDRESS)) as usize),
            FaultPolicy::Strict if address <= u32::from(MAX_ADDRESS) => Ok(address as usize),
            FaultPolicy::Strict => Err(FaultKind::AddressOutOfRange { address }),
        }
    }

    /// Resolves a stack pointer about to be written through by a push.
    pub fn push_slot(self, sp: u8) -> Result<usize, FaultKind> {
        match self {
            FaultPolicy::Legacy => Ok(usize::from(sp) % STACK_DEPTH),
            FaultPolicy::Strict if usize::from(sp) < STACK_DEPTH => Ok(usize::from(sp)),
            FaultPolicy::Strict => Err(FaultKind::StackOverflow),
        }
    }

    /// Resolves the slot a pop reads from, given the stack pointer before the pop.
    pub fn pop_slot(self, sp: u8) -> Result<usize, FaultKind> {
        match self {
            FaultPolicy::Legacy => Ok(usize::from(sp.wrapping_sub(1)) % STACK_DEPTH),
            FaultPolicy::Strict if sp == 0 => Err(FaultKind::StackUnderflow),
            FaultPolicy::Strict if usize::from(sp) > STACK_DEPTH => Err(FaultKind::StackOverflow),
            FaultPolicy::Strict => Ok(usize::from(sp) - 1),
        }
    }
}

impl Default for FaultPolicy {
    fn default() -> Self {
        FaultPolicy::Strict
    }
}

/// Engine configuration supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per call to `Chip8::step`.
    pub cycles_per_frame: u32,
    pub fault_policy: FaultPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_frame: CYCLES_PER_FRAME,
            fault_policy: FaultPolicy::default(),
        }
    }
}
