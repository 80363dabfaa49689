use bitflags::bitflags;

#[derive(Debug)]
pub enum Register {
    RequestedInterrupts,
    EnabledInterrupts,
}

#[derive(Clone, Copy)]
pub enum Interrupt {
    VBlank,
    LcdStatus,
    Timer,
    Serial,
    Joypad,
}

impl From<Interrupt> for InterruptFlags {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStatus => InterruptFlags::LCD_STATUS,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug)]
    pub struct InterruptFlags: u8 {
        const JOYPAD     = 0b0001_0000;
        const SERIAL     = 0b0000_1000;
        const TIMER      = 0b0000_0100;
        const LCD_STATUS = 0b0000_0010;
        const VBLANK     = 0b0000_0001;

        const _OTHER = !0;
    }
}

/// Masks applied on the bus side of IF (0xFF0F): the top three bits are
/// wired high on reads, and only the five real request lines take
/// writes.
const REQUEST_READ_BITS: u8 = 0xe0;
const REQUEST_WRITE_BITS: u8 = 0x1f;

/// Interrupt request (IF) and enable (IE) storage. Nothing consumes
/// these yet — dispatch is an extension seam — but the serial transfer
/// already raises requests and programs read the masks back.
pub struct Registers {
    pub requested: InterruptFlags,
    pub enabled: InterruptFlags,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            requested: InterruptFlags::from_bits_retain(0xe1),
            enabled: InterruptFlags::empty(),
        }
    }

    pub fn request(&mut self, interrupt: Interrupt) {
        self.requested.insert(interrupt.into());
    }

    pub fn read_register(&self, register: Register) -> u8 {
        match register {
            Register::RequestedInterrupts => self.requested.bits() | REQUEST_READ_BITS,
            Register::EnabledInterrupts => self.enabled.bits(),
        }
    }

    pub fn write_register(&mut self, register: Register, value: u8) {
        match register {
            Register::RequestedInterrupts => {
                self.requested = InterruptFlags::from_bits_retain(value & REQUEST_WRITE_BITS);
            }
            Register::EnabledInterrupts => {
                self.enabled = InterruptFlags::from_bits_retain(value);
            }
        }
    }
}
