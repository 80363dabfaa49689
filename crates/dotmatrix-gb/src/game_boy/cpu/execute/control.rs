use crate::game_boy::GameBoy;
use crate::game_boy::cpu::{Cycles, Flags};

pub(super) fn nop(_gb: &mut GameBoy, _opcode: u8) -> Cycles {
    Cycles(0)
}

/// DAA — fix the accumulator up into binary-coded decimal after an
/// addition or subtraction, steered by N, H and C.
pub(super) fn daa(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = if gb.cpu.flag(Flags::NEGATIVE) {
        let mut adjustment = 0;
        if gb.cpu.flag(Flags::HALF_CARRY) {
            adjustment += 0x06;
        }
        if gb.cpu.flag(Flags::CARRY) {
            adjustment += 0x60;
        }
        gb.cpu.a.wrapping_sub(adjustment)
    } else {
        let mut adjustment = 0;
        if gb.cpu.flag(Flags::HALF_CARRY) || gb.cpu.a & 0x0f > 0x09 {
            adjustment += 0x06;
        }
        if gb.cpu.flag(Flags::CARRY) || gb.cpu.a > 0x99 {
            adjustment += 0x60;
            gb.cpu.set_flag(Flags::CARRY, true);
        }
        gb.cpu.a.wrapping_add(adjustment)
    };

    gb.cpu.set_flag(Flags::ZERO, value == 0);
    gb.cpu.set_flag(Flags::HALF_CARRY, false);
    gb.cpu.a = value;
    Cycles(0)
}

pub(super) fn cpl(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    gb.cpu.a = !gb.cpu.a;
    gb.cpu.set_flag(Flags::NEGATIVE, true);
    gb.cpu.set_flag(Flags::HALF_CARRY, true);
    Cycles(0)
}

pub(super) fn scf(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    gb.cpu.set_flag(Flags::NEGATIVE, false);
    gb.cpu.set_flag(Flags::HALF_CARRY, false);
    gb.cpu.set_flag(Flags::CARRY, true);
    Cycles(0)
}

pub(super) fn ccf(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let carry = gb.cpu.flag(Flags::CARRY);
    gb.cpu.set_flag(Flags::NEGATIVE, false);
    gb.cpu.set_flag(Flags::HALF_CARRY, false);
    gb.cpu.set_flag(Flags::CARRY, !carry);
    Cycles(0)
}
