pub use chip8::Chip8;
pub use config::{Config, FaultPolicy};
pub use constants::{CYCLES_PER_FRAME, FRAMES_PER_SECOND};
pub use error::{Fault, FaultKind, LoadError};
pub use framebuffer::FrameBuffer;
pub use keypad::Keypad;

mod chip8;
pub mod config;
pub mod constants;
mod error;
pub mod framebuffer;
pub mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod stack;
pub mod state;
