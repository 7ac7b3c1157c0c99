use crate::config::FaultPolicy;
use crate::constants::STACK_DEPTH;
use crate::error::FaultKind;

/// # Stack
/// Return addresses pushed by calls and popped by returns.
///
/// The stack pointer lives in `Registers::sp`; push and pop take it and hand
/// back its new value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; STACK_DEPTH],
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            slots: [0; STACK_DEPTH],
        }
    }

    /// Writes `address` at `sp` and returns the incremented stack pointer.
    pub fn push(&mut self, sp: u8, address: u16, policy: FaultPolicy) -> Result<u8, FaultKind> {
        let slot = policy.push_slot(sp)?;
        self.slots[slot] = address;
        Ok(slot as u8 + 1)
    }

    /// Decrements `sp` and reads the address there.
    ///
    /// Returns the popped address and the new stack pointer.
    pub fn pop(&self, sp: u8, policy: FaultPolicy) -> Result<(u16, u8), FaultKind> {
        let slot = policy.pop_slot(sp)?;
        Ok((self.slots[slot], slot as u8))
    }

    pub fn slots(&self) -> &[u16; STACK_DEPTH] {
        &self.slots
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_pop() {
        let mut stack = Stack::new();
        let sp = stack.push(0, 0x202, FaultPolicy::Strict).unwrap();
        let sp = stack.push(sp, 0x404, FaultPolicy::Strict).unwrap();
        assert_eq!(sp, 2);
        assert_eq!(stack.pop(sp, FaultPolicy::Strict), Ok((0x404, 1)));
        assert_eq!(stack.pop(1, FaultPolicy::Strict), Ok((0x202, 0)));
    }

    #[test]
    fn test_strict_overflow() {
        let mut stack = Stack::new();
        let mut sp = 0;
        for n in 0..16 {
            sp = stack.push(sp, n, FaultPolicy::Strict).unwrap();
        }
        assert_eq!(sp, 16);
        assert_eq!(
            stack.push(sp, 0xABC, FaultPolicy::Strict),
            Err(FaultKind::StackOverflow)
        );
        assert_eq!(stack.slots()[15], 15);
    }

    #[test]
    fn test_strict_underflow() {
        let stack = Stack::new();
        assert_eq!(
            stack.pop(0, FaultPolicy::Strict),
            Err(FaultKind::StackUnderflow)
        );
    }

    #[test]
    fn test_legacy_overflow_wraps_to_bottom() {
        let mut stack = Stack::new();
        let sp = stack.push(16, 0xABC, FaultPolicy::Legacy).unwrap();
        assert_eq!(sp, 1);
        assert_eq!(stack.slots()[0], 0xABC);
    }

    #[test]
    fn test_legacy_underflow_reads_top() {
        let mut stack = Stack::new();
        stack.push(15, 0x321, FaultPolicy::Legacy).unwrap();
        assert_eq!(stack.pop(0, FaultPolicy::Legacy), Ok((0x321, 15)));
    }
}
