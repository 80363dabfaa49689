use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// The F register. Only the top nibble carries state; the low four
    /// bits read as zero on hardware, which `from_bits_truncate`
    /// preserves whenever a whole byte is written (POP AF).
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Flags: u8 {
        const ZERO       = 0b1000_0000;
        const NEGATIVE   = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY      = 0b0001_0000;
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.contains(Flags::ZERO) { 'z' } else { '-' },
            if self.contains(Flags::NEGATIVE) { 'n' } else { '-' },
            if self.contains(Flags::HALF_CARRY) { 'h' } else { '-' },
            if self.contains(Flags::CARRY) { 'c' } else { '-' },
        )
    }
}

/// Carry out of bit 3 for an 8-bit addition.
pub fn half_carry_add(a: u8, b: u8) -> bool {
    (a & 0x0f) + (b & 0x0f) > 0x0f
}

/// Carry out of bit 7 for an 8-bit addition.
pub fn carry_add(a: u8, b: u8) -> bool {
    (a as u16) + (b as u16) > 0xff
}

/// Borrow into bit 3 for an 8-bit subtraction.
pub fn half_carry_sub(a: u8, b: u8) -> bool {
    (a & 0x0f) < (b & 0x0f)
}

/// Borrow into bit 7 for an 8-bit subtraction.
pub fn carry_sub(a: u8, b: u8) -> bool {
    (a as u16) < (b as u16)
}
