use core::fmt;
use std::error::Error;

use crate::game_boy::{CYCLES_PER_FRAME, GameBoy};

use super::{Cycles, Flags};

mod arithmetic;
mod control;
mod jump;
mod load;
mod rotate;
mod stack;

/// Executes one instruction's semantics: consumes any operand bytes at
/// the program counter and returns the cycles spent beyond the
/// opcode's base cost (non-zero only for taken conditional branches).
type OpHandler = fn(&mut GameBoy, u8) -> Cycles;

#[derive(Copy, Clone)]
struct Opcode {
    handler: OpHandler,
    base_cycles: u32,
}

const fn op(handler: OpHandler, base_cycles: u32) -> Option<Opcode> {
    Some(Opcode {
        handler,
        base_cycles,
    })
}

/// The dispatch table. A `None` entry is an opcode this core does not
/// execute — the CB-prefixed page, everything tied to interrupts and
/// halting (STOP, HALT, DI, EI, RETI), and the opcodes with no
/// hardware meaning. Dispatching one of those is an [`ExecutionFault`],
/// never a silent no-op.
static OPCODES: [Option<Opcode>; 256] = {
    let mut t: [Option<Opcode>; 256] = [None; 256];

    t[0x00] = op(control::nop, 1);
    t[0x01] = op(load::ld_wide_immediate, 3);
    t[0x02] = op(load::ld_pair_pointer_a, 2);
    t[0x03] = op(arithmetic::inc_wide, 2);
    t[0x04] = op(arithmetic::inc_operand, 1);
    t[0x05] = op(arithmetic::dec_operand, 1);
    t[0x06] = op(load::ld_operand_immediate, 2);
    t[0x07] = op(rotate::rlca, 1);
    t[0x08] = op(load::ld_address_sp, 5);
    t[0x09] = op(arithmetic::add_hl_wide, 2);
    t[0x0a] = op(load::ld_a_pair_pointer, 2);
    t[0x0b] = op(arithmetic::dec_wide, 2);
    t[0x0c] = op(arithmetic::inc_operand, 1);
    t[0x0d] = op(arithmetic::dec_operand, 1);
    t[0x0e] = op(load::ld_operand_immediate, 2);
    t[0x0f] = op(rotate::rrca, 1);

    t[0x11] = op(load::ld_wide_immediate, 3);
    t[0x12] = op(load::ld_pair_pointer_a, 2);
    t[0x13] = op(arithmetic::inc_wide, 2);
    t[0x14] = op(arithmetic::inc_operand, 1);
    t[0x15] = op(arithmetic::dec_operand, 1);
    t[0x16] = op(load::ld_operand_immediate, 2);
    t[0x17] = op(rotate::rla, 1);
    t[0x18] = op(jump::jr, 3);
    t[0x19] = op(arithmetic::add_hl_wide, 2);
    t[0x1a] = op(load::ld_a_pair_pointer, 2);
    t[0x1b] = op(arithmetic::dec_wide, 2);
    t[0x1c] = op(arithmetic::inc_operand, 1);
    t[0x1d] = op(arithmetic::dec_operand, 1);
    t[0x1e] = op(load::ld_operand_immediate, 2);
    t[0x1f] = op(rotate::rra, 1);

    t[0x20] = op(jump::jr_condition, 2);
    t[0x21] = op(load::ld_wide_immediate, 3);
    t[0x22] = op(load::ld_hl_pointer_inc_a, 2);
    t[0x23] = op(arithmetic::inc_wide, 2);
    t[0x24] = op(arithmetic::inc_operand, 1);
    t[0x25] = op(arithmetic::dec_operand, 1);
    t[0x26] = op(load::ld_operand_immediate, 2);
    t[0x27] = op(control::daa, 1);
    t[0x28] = op(jump::jr_condition, 2);
    t[0x29] = op(arithmetic::add_hl_wide, 2);
    t[0x2a] = op(load::ld_a_hl_pointer_inc, 2);
    t[0x2b] = op(arithmetic::dec_wide, 2);
    t[0x2c] = op(arithmetic::inc_operand, 1);
    t[0x2d] = op(arithmetic::dec_operand, 1);
    t[0x2e] = op(load::ld_operand_immediate, 2);
    t[0x2f] = op(control::cpl, 1);

    t[0x30] = op(jump::jr_condition, 2);
    t[0x31] = op(load::ld_wide_immediate, 3);
    t[0x32] = op(load::ld_hl_pointer_dec_a, 2);
    t[0x33] = op(arithmetic::inc_wide, 2);
    t[0x34] = op(arithmetic::inc_operand, 3);
    t[0x35] = op(arithmetic::dec_operand, 3);
    t[0x36] = op(load::ld_operand_immediate, 3);
    t[0x37] = op(control::scf, 1);
    t[0x38] = op(jump::jr_condition, 2);
    t[0x39] = op(arithmetic::add_hl_wide, 2);
    t[0x3a] = op(load::ld_a_hl_pointer_dec, 2);
    t[0x3b] = op(arithmetic::dec_wide, 2);
    t[0x3c] = op(arithmetic::inc_operand, 1);
    t[0x3d] = op(arithmetic::dec_operand, 1);
    t[0x3e] = op(load::ld_operand_immediate, 2);
    t[0x3f] = op(control::ccf, 1);

    // LD r,r' quadrant. 0x76 is HALT, which belongs to the interrupt
    // machinery and stays a table hole.
    let mut i = 0x40;
    while i <= 0x7f {
        if i != 0x76 {
            let touches_memory = (i & 0x07) == 6 || ((i >> 3) & 0x07) == 6;
            t[i] = op(load::ld_operand_operand, if touches_memory { 2 } else { 1 });
        }
        i += 1;
    }

    // ALU quadrant: operation in bits 3-5, operand in bits 0-2.
    let mut i = 0x80;
    while i <= 0xbf {
        let handler: OpHandler = match (i >> 3) & 0x07 {
            0 => arithmetic::add_a,
            1 => arithmetic::adc_a,
            2 => arithmetic::sub_a,
            3 => arithmetic::sbc_a,
            4 => arithmetic::and_a,
            5 => arithmetic::xor_a,
            6 => arithmetic::or_a,
            _ => arithmetic::cp_a,
        };
        t[i] = op(handler, if (i & 0x07) == 6 { 2 } else { 1 });
        i += 1;
    }

    t[0xc0] = op(jump::ret_condition, 2);
    t[0xc1] = op(stack::pop_wide, 3);
    t[0xc2] = op(jump::jp_condition, 3);
    t[0xc3] = op(jump::jp, 4);
    t[0xc4] = op(jump::call_condition, 3);
    t[0xc5] = op(stack::push_wide, 4);
    t[0xc6] = op(arithmetic::add_a_immediate, 2);
    t[0xc7] = op(jump::rst, 4);
    t[0xc8] = op(jump::ret_condition, 2);
    t[0xc9] = op(jump::ret, 4);
    t[0xca] = op(jump::jp_condition, 3);
    t[0xcc] = op(jump::call_condition, 3);
    t[0xcd] = op(jump::call, 6);
    t[0xce] = op(arithmetic::adc_a_immediate, 2);
    t[0xcf] = op(jump::rst, 4);

    t[0xd0] = op(jump::ret_condition, 2);
    t[0xd1] = op(stack::pop_wide, 3);
    t[0xd2] = op(jump::jp_condition, 3);
    t[0xd4] = op(jump::call_condition, 3);
    t[0xd5] = op(stack::push_wide, 4);
    t[0xd6] = op(arithmetic::sub_a_immediate, 2);
    t[0xd7] = op(jump::rst, 4);
    t[0xd8] = op(jump::ret_condition, 2);
    t[0xda] = op(jump::jp_condition, 3);
    t[0xdc] = op(jump::call_condition, 3);
    t[0xde] = op(arithmetic::sbc_a_immediate, 2);
    t[0xdf] = op(jump::rst, 4);

    t[0xe0] = op(load::ldh_address_a, 3);
    t[0xe1] = op(stack::pop_wide, 3);
    t[0xe2] = op(load::ldh_c_a, 2);
    t[0xe5] = op(stack::push_wide, 4);
    t[0xe6] = op(arithmetic::and_a_immediate, 2);
    t[0xe7] = op(jump::rst, 4);
    t[0xe8] = op(arithmetic::add_sp_offset, 4);
    t[0xe9] = op(jump::jp_hl, 1);
    t[0xea] = op(load::ld_address_a, 4);
    t[0xee] = op(arithmetic::xor_a_immediate, 2);
    t[0xef] = op(jump::rst, 4);

    t[0xf0] = op(load::ldh_a_address, 3);
    t[0xf1] = op(stack::pop_af, 3);
    t[0xf2] = op(load::ldh_a_c, 2);
    t[0xf5] = op(stack::push_af, 4);
    t[0xf6] = op(arithmetic::or_a_immediate, 2);
    t[0xf7] = op(jump::rst, 4);
    t[0xf8] = op(arithmetic::ld_hl_sp_offset, 3);
    t[0xf9] = op(load::ld_sp_hl, 2);
    t[0xfa] = op(load::ld_a_address, 4);
    t[0xfe] = op(arithmetic::cp_a_immediate, 2);
    t[0xff] = op(jump::rst, 4);

    t
};

/// The instruction stream reached an opcode with no table entry. This
/// is a fault, not a NOP: the console stops running and the opcode and
/// its address are reported so the caller (and the test suite) can see
/// exactly what was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionFault {
    pub opcode: u8,
    pub address: u16,
}

impl fmt::Display for ExecutionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unimplemented opcode {:#04x} at {:#06x}",
            self.opcode, self.address
        )
    }
}

impl Error for ExecutionFault {}

impl GameBoy {
    /// Fetch, decode and execute one instruction, returning its total
    /// cycle cost. Does nothing when the console is not running.
    pub fn step(&mut self) -> Result<Cycles, ExecutionFault> {
        if !self.running {
            return Ok(Cycles(0));
        }

        let address = self.cpu.program_counter;
        let opcode = self.fetch_byte();
        let Some(entry) = OPCODES[opcode as usize] else {
            self.running = false;
            return Err(ExecutionFault { opcode, address });
        };

        let cycles = Cycles(entry.base_cycles) + (entry.handler)(self, opcode);
        self.cycles += cycles.0 as u64;
        Ok(cycles)
    }

    /// Step until one frame's worth of cycles has elapsed. Coarse
    /// batching only: the loop never yields mid-frame.
    pub fn run_frame(&mut self) -> Result<Cycles, ExecutionFault> {
        if !self.running {
            return Ok(Cycles(0));
        }

        let mut frame_cycles = Cycles(0);
        while frame_cycles.0 < CYCLES_PER_FRAME {
            frame_cycles += self.step()?;
        }
        Ok(frame_cycles)
    }

    fn fetch_byte(&mut self) -> u8 {
        let value = self.mapped.read(self.cpu.program_counter);
        self.cpu.program_counter = self.cpu.program_counter.wrapping_add(1);
        value
    }

    fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte();
        let high = self.fetch_byte();
        u16::from_le_bytes([low, high])
    }

    fn push_word(&mut self, value: u16) {
        self.cpu.stack_pointer = self.cpu.stack_pointer.wrapping_sub(2);
        self.mapped.write_word(self.cpu.stack_pointer, value);
    }

    fn pop_word(&mut self) -> u16 {
        let value = self.mapped.read_word(self.cpu.stack_pointer);
        self.cpu.stack_pointer = self.cpu.stack_pointer.wrapping_add(2);
        value
    }

    /// Operand field decode: 0-5 are B, C, D, E, H, L; 6 is the byte
    /// at (HL); 7 is A.
    fn read_operand(&self, code: u8) -> u8 {
        match code & 0x07 {
            0 => self.cpu.b,
            1 => self.cpu.c,
            2 => self.cpu.d,
            3 => self.cpu.e,
            4 => self.cpu.h,
            5 => self.cpu.l,
            6 => self.mapped.read(self.cpu.hl()),
            _ => self.cpu.a,
        }
    }

    fn write_operand(&mut self, code: u8, value: u8) {
        match code & 0x07 {
            0 => self.cpu.b = value,
            1 => self.cpu.c = value,
            2 => self.cpu.d = value,
            3 => self.cpu.e = value,
            4 => self.cpu.h = value,
            5 => self.cpu.l = value,
            6 => self.mapped.write(self.cpu.hl(), value),
            _ => self.cpu.a = value,
        }
    }

    /// Wide register field decode: 0-3 are BC, DE, HL, SP.
    fn read_wide(&self, code: u8) -> u16 {
        match code & 0x03 {
            0 => self.cpu.bc(),
            1 => self.cpu.de(),
            2 => self.cpu.hl(),
            _ => self.cpu.stack_pointer,
        }
    }

    fn write_wide(&mut self, code: u8, value: u16) {
        match code & 0x03 {
            0 => self.cpu.set_bc(value),
            1 => self.cpu.set_de(value),
            2 => self.cpu.set_hl(value),
            _ => self.cpu.stack_pointer = value,
        }
    }

    /// Condition field decode: 0-3 are NZ, Z, NC, C.
    fn condition(&self, code: u8) -> bool {
        match code & 0x03 {
            0 => !self.cpu.flag(Flags::ZERO),
            1 => self.cpu.flag(Flags::ZERO),
            2 => !self.cpu.flag(Flags::CARRY),
            _ => self.cpu.flag(Flags::CARRY),
        }
    }
}
