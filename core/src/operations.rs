use rand::{Rng, RngCore};

use crate::config::FaultPolicy;
use crate::error::FaultKind;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::state::State;

/// Everything an instruction can observe besides the machine state.
pub struct Context<'a> {
    pub keypad: Keypad,
    pub rng: &'a mut dyn RngCore,
    pub policy: FaultPolicy,
}

/// Executes a single instruction against `state` and returns the next state.
///
/// The pc is left for the caller to advance by 2 afterwards. Instructions that
/// move the pc elsewhere set it 2 short of their target to make up for that.
pub fn execute(
    instruction: Instruction,
    state: &State,
    ctx: &mut Context,
) -> Result<State, FaultKind> {
    use Instruction::*;

    let next = match instruction {
        Clear => clear(state),
        Return => ret(state, ctx.policy)?,
        Jump(addr) => jump(state, addr),
        Call(addr) => call(state, addr, ctx.policy)?,
        SkipIfEqual { x, kk } => skip_if(state, state.registers.v(x) == kk),
        SkipIfNotEqual { x, kk } => skip_if(state, state.registers.v(x) != kk),
        SkipIfRegistersEqual { x, y } => {
            skip_if(state, state.registers.v(x) == state.registers.v(y))
        }
        Load { x, kk } => update(state, |r| r.set_v(x, kk)),
        Add { x, kk } => update(state, |r| r.set_v(x, r.v(x).wrapping_add(kk))),
        Move { x, y } => update(state, |r| r.set_v(x, r.v(y))),
        Or { x, y } => update(state, |r| r.set_v(x, r.v(x) | r.v(y))),
        And { x, y } => update(state, |r| r.set_v(x, r.v(x) & r.v(y))),
        Xor { x, y } => update(state, |r| r.set_v(x, r.v(x) ^ r.v(y))),
        AddRegisters { x, y } => add_registers(state, x, y),
        Sub { x, y } => sub(state, x, x, y),
        ShiftRight { x } => shift_right(state, x),
        SubReversed { x, y } => sub(state, x, y, x),
        ShiftLeft { x } => shift_left(state, x),
        SkipIfRegistersNotEqual { x, y } => {
            skip_if(state, state.registers.v(x) != state.registers.v(y))
        }
        LoadIndex(addr) => update(state, |r| r.i = addr),
        JumpOffset(addr) => jump(state, u16::from(state.registers.v(0x0)) + addr),
        Random { x, kk } => {
            let byte: u8 = ctx.rng.gen();
            update(state, |r| r.set_v(x, byte & kk))
        }
        Draw { x, y, n } => draw(state, x, y, n, ctx.policy)?,
        SkipIfKeyDown { x } => skip_if(state, ctx.keypad.is_down(state.registers.v(x))),
        SkipIfKeyUp { x } => skip_if(state, !ctx.keypad.is_down(state.registers.v(x))),
        LoadDelayTimer { x } => update(state, |r| r.set_v(x, r.delay_timer)),
        WaitForKey { x } => wait_for_key(state, x, ctx.keypad),
        SetDelayTimer { x } => update(state, |r| r.delay_timer = r.v(x)),
        SetSoundTimer { x } => update(state, |r| r.sound_timer = r.v(x)),
        AddIndex { x } => update(state, |r| r.i = r.i.wrapping_add(u16::from(r.v(x)))),
        LoadGlyph { x } => update(state, |r| r.i = Memory::glyph_address(r.v(x))),
        StoreBcd { x } => store_bcd(state, x, ctx.policy)?,
        StoreRegisters { x } => store_registers(state, x, ctx.policy)?,
        LoadRegisters { x } => load_registers(state, x, ctx.policy)?,
    };
    Ok(next)
}

/// Copies `state` and applies `f` to the copy's registers.
fn update(state: &State, f: impl FnOnce(&mut Registers)) -> State {
    let mut registers = state.registers;
    f(&mut registers);
    State {
        registers,
        ..*state
    }
}

/// if condition then pc += 2
fn skip_if(state: &State, condition: bool) -> State {
    update(state, |r| {
        if condition {
            r.skip()
        }
    })
}

fn clear(state: &State) -> State {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    State {
        frame_buffer,
        ..*state
    }
}

/// PC = STACK.pop()
///
/// The popped address is that of the call itself; the usual advance moves
/// past it.
fn ret(state: &State, policy: FaultPolicy) -> Result<State, FaultKind> {
    let (address, sp) = state.stack.pop(state.registers.sp, policy)?;
    Ok(update(state, |r| {
        r.pc = address;
        r.sp = sp;
    }))
}

/// PC = target
fn jump(state: &State, target: u16) -> State {
    update(state, |r| r.redirect_pc(target))
}

/// STACK.push(PC); PC = target
fn call(state: &State, target: u16, policy: FaultPolicy) -> Result<State, FaultKind> {
    let mut stack = state.stack;
    let sp = stack.push(state.registers.sp, state.registers.pc, policy)?;
    let mut registers = state.registers;
    registers.sp = sp;
    registers.redirect_pc(target);
    Ok(State {
        registers,
        stack,
        ..*state
    })
}

// The ALU ops below set VF before Vx, so with x == F the result is kept.

/// VF = carry; Vx += Vy
fn add_registers(state: &State, x: usize, y: usize) -> State {
    update(state, |r| {
        let (sum, carry) = r.v(x).overflowing_add(r.v(y));
        r.set_flag(carry);
        r.set_v(x, sum);
    })
}

/// VF = !borrow; Vx = Va - Vb
fn sub(state: &State, x: usize, a: usize, b: usize) -> State {
    update(state, |r| {
        let (difference, borrow) = r.v(a).overflowing_sub(r.v(b));
        r.set_flag(!borrow);
        r.set_v(x, difference);
    })
}

/// VF = lsb; Vx >>= 1
fn shift_right(state: &State, x: usize) -> State {
    update(state, |r| {
        let value = r.v(x);
        r.set_flag(value & 0x01 != 0);
        r.set_v(x, value >> 1);
    })
}

/// VF = msb; Vx <<= 1
fn shift_left(state: &State, x: usize) -> State {
    update(state, |r| {
        let value = r.v(x);
        r.set_flag(value & 0x80 != 0);
        r.set_v(x, value << 1);
    })
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at mem[I..I+n] onto the FrameBuffer; VF = collision
fn draw(state: &State, x: usize, y: usize, n: u8, policy: FaultPolicy) -> Result<State, FaultKind> {
    let height = usize::from(n);
    let mut sprite = [0; 0xF];
    for (offset, byte) in sprite.iter_mut().take(height).enumerate() {
        let address = policy.address(state.registers.i, offset as u16)?;
        *byte = state.memory.read(address);
    }

    let mut next = *state;
    let collided = next.frame_buffer.draw(
        state.registers.v(x),
        state.registers.v(y),
        &sprite[..height],
    );
    next.registers.set_flag(collided);
    Ok(next)
}

/// Vx = first key down
///
/// With no key down the pc is rewound so this instruction runs again next
/// cycle; the wait is a poll, the frame still completes.
fn wait_for_key(state: &State, x: usize, keypad: Keypad) -> State {
    update(state, |r| match keypad.first_down() {
        Some(key) => r.set_v(x, key),
        None => r.rewind_pc(),
    })
}

/// mem[I..I+3] = bcd(Vx)
fn store_bcd(state: &State, x: usize, policy: FaultPolicy) -> Result<State, FaultKind> {
    let value = state.registers.v(x);
    let digits = [value / 100, value / 10 % 10, value % 10];
    let mut memory = state.memory;
    for (offset, &digit) in digits.iter().enumerate() {
        memory.write(policy.address(state.registers.i, offset as u16)?, digit);
    }
    Ok(State { memory, ..*state })
}

/// mem[I..=I+x] = V0..=Vx
fn store_registers(state: &State, x: usize, policy: FaultPolicy) -> Result<State, FaultKind> {
    let mut memory = state.memory;
    for register in 0..=x {
        let address = policy.address(state.registers.i, register as u16)?;
        memory.write(address, state.registers.v(register));
    }
    Ok(State { memory, ..*state })
}

/// V0..=Vx = mem[I..=I+x]
fn load_registers(state: &State, x: usize, policy: FaultPolicy) -> Result<State, FaultKind> {
    let mut registers = state.registers;
    for register in 0..=x {
        let address = policy.address(state.registers.i, register as u16)?;
        registers.set_v(register, state.memory.read(address));
    }
    Ok(State {
        registers,
        ..*state
    })
}
