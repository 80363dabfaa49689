use crate::game_boy::GameBoy;
use crate::game_boy::cpu::flags::{carry_add, half_carry_add, half_carry_sub};
use crate::game_boy::cpu::{Cycles, Flags};

fn add_to_accumulator(gb: &mut GameBoy, value: u8, with_carry: bool) {
    let carry = (with_carry && gb.cpu.flag(Flags::CARRY)) as u8;
    let a = gb.cpu.a;
    let sum = a as u16 + value as u16 + carry as u16;
    let result = sum as u8;

    let mut flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, (a & 0x0f) + (value & 0x0f) + carry > 0x0f);
    flags.set(Flags::CARRY, sum > 0xff);
    gb.cpu.flags = flags;
    gb.cpu.a = result;
}

/// Shared by SUB, SBC and CP — CP throws the result away.
fn subtract_from_accumulator(gb: &mut GameBoy, value: u8, with_carry: bool, keep_result: bool) {
    let carry = (with_carry && gb.cpu.flag(Flags::CARRY)) as u8;
    let a = gb.cpu.a;
    let difference = a as i16 - value as i16 - carry as i16;
    let result = difference as u8;

    let mut flags = Flags::NEGATIVE;
    flags.set(Flags::ZERO, result == 0);
    flags.set(
        Flags::HALF_CARRY,
        (a & 0x0f) < (value & 0x0f) + carry,
    );
    flags.set(Flags::CARRY, difference < 0);
    gb.cpu.flags = flags;
    if keep_result {
        gb.cpu.a = result;
    }
}

fn and_accumulator(gb: &mut GameBoy, value: u8) {
    gb.cpu.a &= value;
    let mut flags = Flags::HALF_CARRY;
    flags.set(Flags::ZERO, gb.cpu.a == 0);
    gb.cpu.flags = flags;
}

fn xor_accumulator(gb: &mut GameBoy, value: u8) {
    gb.cpu.a ^= value;
    let mut flags = Flags::empty();
    flags.set(Flags::ZERO, gb.cpu.a == 0);
    gb.cpu.flags = flags;
}

fn or_accumulator(gb: &mut GameBoy, value: u8) {
    gb.cpu.a |= value;
    let mut flags = Flags::empty();
    flags.set(Flags::ZERO, gb.cpu.a == 0);
    gb.cpu.flags = flags;
}

pub(super) fn add_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    add_to_accumulator(gb, value, false);
    Cycles(0)
}

pub(super) fn adc_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    add_to_accumulator(gb, value, true);
    Cycles(0)
}

pub(super) fn sub_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    subtract_from_accumulator(gb, value, false, true);
    Cycles(0)
}

pub(super) fn sbc_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    subtract_from_accumulator(gb, value, true, true);
    Cycles(0)
}

pub(super) fn and_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    and_accumulator(gb, value);
    Cycles(0)
}

pub(super) fn xor_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    xor_accumulator(gb, value);
    Cycles(0)
}

pub(super) fn or_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    or_accumulator(gb, value);
    Cycles(0)
}

pub(super) fn cp_a(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let value = gb.read_operand(opcode & 0x07);
    subtract_from_accumulator(gb, value, false, false);
    Cycles(0)
}

pub(super) fn add_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    add_to_accumulator(gb, value, false);
    Cycles(0)
}

pub(super) fn adc_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    add_to_accumulator(gb, value, true);
    Cycles(0)
}

pub(super) fn sub_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    subtract_from_accumulator(gb, value, false, true);
    Cycles(0)
}

pub(super) fn sbc_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    subtract_from_accumulator(gb, value, true, true);
    Cycles(0)
}

pub(super) fn and_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    and_accumulator(gb, value);
    Cycles(0)
}

pub(super) fn xor_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    xor_accumulator(gb, value);
    Cycles(0)
}

pub(super) fn or_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    or_accumulator(gb, value);
    Cycles(0)
}

pub(super) fn cp_a_immediate(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = gb.fetch_byte();
    subtract_from_accumulator(gb, value, false, false);
    Cycles(0)
}

/// INC on an operand field (register or (HL)). Carry is untouched.
pub(super) fn inc_operand(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let code = (opcode >> 3) & 0x07;
    let value = gb.read_operand(code);
    let result = value.wrapping_add(1);

    let carry = gb.cpu.flag(Flags::CARRY);
    let mut flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, half_carry_add(value, 1));
    flags.set(Flags::CARRY, carry);
    gb.cpu.flags = flags;

    gb.write_operand(code, result);
    Cycles(0)
}

/// DEC on an operand field. Carry is untouched.
pub(super) fn dec_operand(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let code = (opcode >> 3) & 0x07;
    let value = gb.read_operand(code);
    let result = value.wrapping_sub(1);

    let carry = gb.cpu.flag(Flags::CARRY);
    let mut flags = Flags::NEGATIVE;
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, half_carry_sub(value, 1));
    flags.set(Flags::CARRY, carry);
    gb.cpu.flags = flags;

    gb.write_operand(code, result);
    Cycles(0)
}

/// INC rr — no flags.
pub(super) fn inc_wide(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let code = (opcode >> 4) & 0x03;
    let value = gb.read_wide(code).wrapping_add(1);
    gb.write_wide(code, value);
    Cycles(0)
}

/// DEC rr — no flags.
pub(super) fn dec_wide(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let code = (opcode >> 4) & 0x03;
    let value = gb.read_wide(code).wrapping_sub(1);
    gb.write_wide(code, value);
    Cycles(0)
}

/// ADD HL,rr — zero flag is preserved; half carry is out of bit 11.
pub(super) fn add_hl_wide(gb: &mut GameBoy, opcode: u8) -> Cycles {
    let hl = gb.cpu.hl();
    let value = gb.read_wide((opcode >> 4) & 0x03);
    let (result, overflow) = hl.overflowing_add(value);

    let zero = gb.cpu.flag(Flags::ZERO);
    let mut flags = Flags::empty();
    flags.set(Flags::ZERO, zero);
    flags.set(Flags::HALF_CARRY, (hl & 0x0fff) + (value & 0x0fff) > 0x0fff);
    flags.set(Flags::CARRY, overflow);
    gb.cpu.flags = flags;

    gb.cpu.set_hl(result);
    Cycles(0)
}

/// The signed SP adjustment shared by ADD SP,e and LD HL,SP+e: the
/// offset is sign-extended for the sum, but both carries come from the
/// unsigned low byte.
fn sp_plus_offset(gb: &mut GameBoy) -> u16 {
    let offset = gb.fetch_byte();
    let sp = gb.cpu.stack_pointer;
    let result = sp.wrapping_add(offset as i8 as u16);

    let mut flags = Flags::empty();
    flags.set(Flags::HALF_CARRY, half_carry_add(sp as u8, offset));
    flags.set(Flags::CARRY, carry_add(sp as u8, offset));
    gb.cpu.flags = flags;

    result
}

pub(super) fn add_sp_offset(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    gb.cpu.stack_pointer = sp_plus_offset(gb);
    Cycles(0)
}

pub(super) fn ld_hl_sp_offset(gb: &mut GameBoy, _opcode: u8) -> Cycles {
    let value = sp_plus_offset(gb);
    gb.cpu.set_hl(value);
    Cycles(0)
}
