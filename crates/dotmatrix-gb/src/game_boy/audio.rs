/// Sound register block (0xFF10-0xFF26), stored verbatim. No synthesis
/// happens; programs that poke the APU still see their writes back.
pub struct Audio {
    registers: [u8; 0x17],
}

impl Audio {
    pub fn new() -> Self {
        Audio {
            registers: [0; 0x17],
        }
    }

    pub fn read_register(&self, offset: u8) -> u8 {
        self.registers[offset as usize]
    }

    pub fn write_register(&mut self, offset: u8, value: u8) {
        self.registers[offset as usize] = value;
    }
}
