use std::io;

use thiserror::Error;

/// Errors raised while copying a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is {size} bytes but only {max} bytes fit above 0x200")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("unable to read program: {0}")]
    Io(#[from] io::Error),
}

/// What went wrong while executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FaultKind {
    #[error("invalid instruction")]
    InvalidInstruction,

    #[error("address {address:#06X} is outside of memory")]
    AddressOutOfRange { address: u32 },

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,
}

/// An execution fault, reported to the host by `Chip8::step`.
///
/// `opcode` is `None` when the fault happened while fetching, before there
/// was an instruction word to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at pc {pc:#05X}")]
pub struct Fault {
    pub pc: u16,
    pub opcode: Option<u16>,
    pub kind: FaultKind,
}
