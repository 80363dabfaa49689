#[derive(Debug)]
pub enum Register {
    Divider,
    Counter,
    Modulo,
    Control,
}

/// Timer register storage (0xFF04-0xFF07). The divider increments at
/// 16384 Hz on hardware; ticking it from the cycle counter is an
/// extension seam, so for now the registers only hold state and apply
/// their write masks.
pub struct Timers {
    divider: u8,
    counter: u8,
    modulo: u8,
    control: u8,
}

const CONTROL_BITS: u8 = 0x07;

impl Timers {
    pub fn new() -> Self {
        Timers {
            divider: 0xab,
            counter: 0,
            modulo: 0,
            control: 0xf8,
        }
    }

    pub fn read_register(&self, register: Register) -> u8 {
        match register {
            Register::Divider => self.divider,
            Register::Counter => self.counter,
            Register::Modulo => self.modulo,
            Register::Control => self.control,
        }
    }

    pub fn write_register(&mut self, register: Register, value: u8) {
        match register {
            // Any write resets the divider, whatever the value.
            Register::Divider => self.divider = 0,
            Register::Counter => self.counter = value,
            Register::Modulo => self.modulo = value,
            Register::Control => self.control = value & CONTROL_BITS,
        }
    }
}
