use crate::game_boy::GameBoy;
use crate::game_boy::cpu::{Cycles, Flags};

/// The accumulator rotates always clear Z, N and H; only carry comes
/// out of the rotation.
fn set_rotate_flags(gb: &mut GameBoy, carry: bool) {
    let mut flags = Flags::empty();
    flags.set(Flags::CARRY, carry);
    gb.cpu.flags = flags;
}

pub(super) fn rlca(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let a = gb.cpu.a;
    gb.cpu.a = a.rotate_left(1);
    set_rotate_flags(gb, a & 0x80 != 0);
    Cycles(0)
}

pub(super) fn rla(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let a = gb.cpu.a;
    let carry_in = gb.cpu.flag(Flags::CARRY) as u8;
    gb.cpu.a = (a << 1) | carry_in;
    set_rotate_flags(gb, a & 0x80 != 0);
    Cycles(0)
}

pub(super) fn rrca(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let a = gb.cpu.a;
    gb.cpu.a = a.rotate_right(1);
    set_rotate_flags(gb, a & 0x01 != 0);
    Cycles(0)
}

pub(super) fn rra(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let a = gb.cpu.a;
    let carry_in = gb.cpu.flag(Flags::CARRY) as u8;
    gb.cpu.a = (a >> 1) | (carry_in << 7);
    set_rotate_flags(gb, a & 0x01 != 0);
    Cycles(0)
}
