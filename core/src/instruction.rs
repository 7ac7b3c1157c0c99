use crate::error::FaultKind;
use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` are register indices and always fall in `0..16`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Clear,
    /// `00EE` PC = STACK.pop()
    Return,
    /// `1nnn` PC = nnn
    Jump(u16),
    /// `2nnn` STACK.push(PC); PC = nnn
    Call(u16),
    /// `3xkk` if Vx == kk then skip
    SkipIfEqual { x: usize, kk: u8 },
    /// `4xkk` if Vx != kk then skip
    SkipIfNotEqual { x: usize, kk: u8 },
    /// `5xy0` if Vx == Vy then skip
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6xkk` Vx = kk
    Load { x: usize, kk: u8 },
    /// `7xkk` Vx += kk, no carry
    Add { x: usize, kk: u8 },
    /// `8xy0` Vx = Vy
    Move { x: usize, y: usize },
    /// `8xy1` Vx |= Vy
    Or { x: usize, y: usize },
    /// `8xy2` Vx &= Vy
    And { x: usize, y: usize },
    /// `8xy3` Vx ^= Vy
    Xor { x: usize, y: usize },
    /// `8xy4` Vx += Vy; VF = carry
    AddRegisters { x: usize, y: usize },
    /// `8xy5` Vx -= Vy; VF = !borrow
    Sub { x: usize, y: usize },
    /// `8xy6` Vx >>= 1; VF = shifted out bit
    ShiftRight { x: usize },
    /// `8xy7` Vx = Vy - Vx; VF = !borrow
    SubReversed { x: usize, y: usize },
    /// `8xyE` Vx <<= 1; VF = shifted out bit
    ShiftLeft { x: usize },
    /// `9xy0` if Vx != Vy then skip
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `Annn` I = nnn
    LoadIndex(u16),
    /// `Bnnn` PC = V0 + nnn
    JumpOffset(u16),
    /// `Cxkk` Vx = random byte & kk
    Random { x: usize, kk: u8 },
    /// `Dxyn` draw the n-byte sprite at I to (Vx, Vy); VF = collision
    Draw { x: usize, y: usize, n: u8 },
    /// `Ex9E` if key Vx is down then skip
    SkipIfKeyDown { x: usize },
    /// `ExA1` if key Vx is up then skip
    SkipIfKeyUp { x: usize },
    /// `Fx07` Vx = DT
    LoadDelayTimer { x: usize },
    /// `Fx0A` Vx = next key pressed
    WaitForKey { x: usize },
    /// `Fx15` DT = Vx
    SetDelayTimer { x: usize },
    /// `Fx18` ST = Vx
    SetSoundTimer { x: usize },
    /// `Fx1E` I += Vx
    AddIndex { x: usize },
    /// `Fx29` I = address of the glyph for digit Vx
    LoadGlyph { x: usize },
    /// `Fx33` mem[I..I+3] = bcd(Vx)
    StoreBcd { x: usize },
    /// `Fx55` mem[I..=I+x] = V0..=Vx
    StoreRegisters { x: usize },
    /// `Fx65` V0..=Vx = mem[I..=I+x]
    LoadRegisters { x: usize },
}

impl Instruction {
    /// Selects the Instruction encoded by an opcode.
    ///
    /// Words that don't name one of the 35 instructions are an
    /// `InvalidInstruction` fault.
    pub fn decode(op: u16) -> Result<Instruction, FaultKind> {
        let (x, y) = (op.x(), op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(op.addr()),
            (0x2, ..) => Instruction::Call(op.addr()),
            (0x3, ..) => Instruction::SkipIfEqual { x, kk: op.kk() },
            (0x4, ..) => Instruction::SkipIfNotEqual { x, kk: op.kk() },
            (0x5, .., 0x0) => Instruction::SkipIfRegistersEqual { x, y },
            (0x6, ..) => Instruction::Load { x, kk: op.kk() },
            (0x7, ..) => Instruction::Add { x, kk: op.kk() },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddRegisters { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x },
            (0x8, .., 0x7) => Instruction::SubReversed { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x },
            (0x9, .., 0x0) => Instruction::SkipIfRegistersNotEqual { x, y },
            (0xA, ..) => Instruction::LoadIndex(op.addr()),
            (0xB, ..) => Instruction::JumpOffset(op.addr()),
            (0xC, ..) => Instruction::Random { x, kk: op.kk() },
            (0xD, ..) => Instruction::Draw { x, y, n: op.n() },
            (0xE, .., 0x9, 0xE) => Instruction::SkipIfKeyDown { x },
            (0xE, .., 0xA, 0x1) => Instruction::SkipIfKeyUp { x },
            (0xF, .., 0x0, 0x7) => Instruction::LoadDelayTimer { x },
            (0xF, .., 0x0, 0xA) => Instruction::WaitForKey { x },
            (0xF, .., 0x1, 0x5) => Instruction::SetDelayTimer { x },
            (0xF, .., 0x1, 0x8) => Instruction::SetSoundTimer { x },
            (0xF, .., 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, .., 0x2, 0x9) => Instruction::LoadGlyph { x },
            (0xF, .., 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, .., 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, .., 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => return Err(FaultKind::InvalidInstruction),
        };
        Ok(instruction)
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;

    fn decode(op: u16) -> Instruction {
        Instruction::decode(op).unwrap()
    }

    #[test]
    fn test_decodes_system_family() {
        assert_eq!(decode(0x00E0), Instruction::Clear);
        assert_eq!(decode(0x00EE), Instruction::Return);
    }

    #[test]
    fn test_decodes_addresses() {
        assert_eq!(decode(0x1ABC), Instruction::Jump(0xABC));
        assert_eq!(decode(0x2123), Instruction::Call(0x123));
        assert_eq!(decode(0xAABC), Instruction::LoadIndex(0xABC));
        assert_eq!(decode(0xB300), Instruction::JumpOffset(0x300));
    }

    #[test]
    fn test_decodes_byte_operands() {
        assert_eq!(decode(0x3122), Instruction::SkipIfEqual { x: 1, kk: 0x22 });
        assert_eq!(decode(0x4A22), Instruction::SkipIfNotEqual { x: 0xA, kk: 0x22 });
        assert_eq!(decode(0x6F01), Instruction::Load { x: 0xF, kk: 0x01 });
        assert_eq!(decode(0x70FF), Instruction::Add { x: 0, kk: 0xFF });
        assert_eq!(decode(0xC30F), Instruction::Random { x: 3, kk: 0x0F });
    }

    #[test]
    fn test_decodes_alu_family() {
        assert_eq!(decode(0x8120), Instruction::Move { x: 1, y: 2 });
        assert_eq!(decode(0x8121), Instruction::Or { x: 1, y: 2 });
        assert_eq!(decode(0x8122), Instruction::And { x: 1, y: 2 });
        assert_eq!(decode(0x8123), Instruction::Xor { x: 1, y: 2 });
        assert_eq!(decode(0x8124), Instruction::AddRegisters { x: 1, y: 2 });
        assert_eq!(decode(0x8125), Instruction::Sub { x: 1, y: 2 });
        assert_eq!(decode(0x8126), Instruction::ShiftRight { x: 1 });
        assert_eq!(decode(0x8127), Instruction::SubReversed { x: 1, y: 2 });
        assert_eq!(decode(0x812E), Instruction::ShiftLeft { x: 1 });
    }

    #[test]
    fn test_decodes_register_comparisons() {
        assert_eq!(decode(0x5120), Instruction::SkipIfRegistersEqual { x: 1, y: 2 });
        assert_eq!(decode(0x9120), Instruction::SkipIfRegistersNotEqual { x: 1, y: 2 });
    }

    #[test]
    fn test_decodes_draw() {
        assert_eq!(decode(0xD015), Instruction::Draw { x: 0, y: 1, n: 5 });
    }

    #[test]
    fn test_decodes_key_family() {
        assert_eq!(decode(0xE19E), Instruction::SkipIfKeyDown { x: 1 });
        assert_eq!(decode(0xE1A1), Instruction::SkipIfKeyUp { x: 1 });
    }

    #[test]
    fn test_decodes_misc_family() {
        assert_eq!(decode(0xF107), Instruction::LoadDelayTimer { x: 1 });
        assert_eq!(decode(0xF10A), Instruction::WaitForKey { x: 1 });
        assert_eq!(decode(0xF115), Instruction::SetDelayTimer { x: 1 });
        assert_eq!(decode(0xF118), Instruction::SetSoundTimer { x: 1 });
        assert_eq!(decode(0xF11E), Instruction::AddIndex { x: 1 });
        assert_eq!(decode(0xF129), Instruction::LoadGlyph { x: 1 });
        assert_eq!(decode(0xF133), Instruction::StoreBcd { x: 1 });
        assert_eq!(decode(0xF155), Instruction::StoreRegisters { x: 1 });
        assert_eq!(decode(0xF165), Instruction::LoadRegisters { x: 1 });
    }

    #[test]
    fn test_rejects_unallocated_opcodes() {
        for op in [
            0x0000, 0x0123, 0x00E1, 0x00FF, 0x5121, 0x8128, 0x812F, 0x9121, 0xE19F, 0xE1A2,
            0xF100, 0xF120, 0xF175,
        ] {
            assert_eq!(
                Instruction::decode(op),
                Err(FaultKind::InvalidInstruction),
                "{:04X} should not decode",
                op
            );
        }
    }
}
