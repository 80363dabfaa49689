use super::{MemoryMapped, interrupts, serial, timers, video};

/// Where a bus address lands after decoding. The decode in
/// [`MappedAddress::map`] is an exhaustive match over the whole 16-bit
/// space, so there is no open-bus fallback arm to reach: every address
/// resolves to exactly one variant.
#[derive(Debug)]
pub enum MappedAddress {
    /// Fixed and switchable ROM windows (0x0000-0x7FFF). Writes are
    /// ignored for now; this is where bank-control capture will live.
    Rom(u16),
    VideoRam(u16),
    /// Cartridge RAM window, relative to 0xA000.
    ExternalRam(u16),
    WorkRam(u16),
    Oam(u8),
    /// 0xFEA0-0xFEFF: reads 0x00, ignores writes.
    Unusable,
    JoypadRegister,
    SerialRegister(serial::Register),
    TimerRegister(timers::Register),
    InterruptRegister(interrupts::Register),
    /// Sound register offset relative to 0xFF10.
    AudioRegister(u8),
    VideoRegister(video::Register),
    /// 0xFF46: storing the page also starts the OAM copy.
    DmaTransfer,
    BootRomDisable,
    HighRam(u8),
    /// Holes in the I/O block: reads 0xFF, ignores writes.
    Unmapped,
}

impl MappedAddress {
    pub fn map(address: u16) -> Self {
        match address {
            0x0000..=0x7fff => Self::Rom(address),
            0x8000..=0x9fff => Self::VideoRam(address - 0x8000),
            0xa000..=0xbfff => Self::ExternalRam(address - 0xa000),
            0xc000..=0xdfff => Self::WorkRam(address - 0xc000),
            // Echo RAM mirrors 0xC000-0xDDFF.
            0xe000..=0xfdff => Self::WorkRam(address - 0xe000),
            0xfe00..=0xfe9f => Self::Oam((address - 0xfe00) as u8),
            0xfea0..=0xfeff => Self::Unusable,
            0xff00 => Self::JoypadRegister,
            0xff01 => Self::SerialRegister(serial::Register::Data),
            0xff02 => Self::SerialRegister(serial::Register::Control),
            0xff03 => Self::Unmapped,
            0xff04 => Self::TimerRegister(timers::Register::Divider),
            0xff05 => Self::TimerRegister(timers::Register::Counter),
            0xff06 => Self::TimerRegister(timers::Register::Modulo),
            0xff07 => Self::TimerRegister(timers::Register::Control),
            0xff08..=0xff0e => Self::Unmapped,
            0xff0f => Self::InterruptRegister(interrupts::Register::RequestedInterrupts),
            0xff10..=0xff26 => Self::AudioRegister((address - 0xff10) as u8),
            0xff27..=0xff3f => Self::Unmapped,
            0xff40 => Self::VideoRegister(video::Register::Control),
            0xff41 => Self::VideoRegister(video::Register::Status),
            0xff42 => Self::VideoRegister(video::Register::ScrollY),
            0xff43 => Self::VideoRegister(video::Register::ScrollX),
            0xff44 => Self::VideoRegister(video::Register::CurrentScanline),
            0xff45 => Self::VideoRegister(video::Register::ScanlineCompare),
            0xff46 => Self::DmaTransfer,
            0xff47 => Self::VideoRegister(video::Register::BackgroundPalette),
            0xff48 => Self::VideoRegister(video::Register::ObjectPalette0),
            0xff49 => Self::VideoRegister(video::Register::ObjectPalette1),
            0xff4a => Self::VideoRegister(video::Register::WindowY),
            0xff4b => Self::VideoRegister(video::Register::WindowX),
            0xff4c..=0xff4f => Self::Unmapped,
            0xff50 => Self::BootRomDisable,
            0xff51..=0xff7f => Self::Unmapped,
            0xff80..=0xfffe => Self::HighRam((address - 0xff80) as u8),
            0xffff => Self::InterruptRegister(interrupts::Register::EnabledInterrupts),
        }
    }
}

impl MemoryMapped {
    pub fn read(&self, address: u16) -> u8 {
        match MappedAddress::map(address) {
            MappedAddress::Rom(address) => self.cartridge.read_rom(address),
            MappedAddress::VideoRam(offset) => self.video_ram[offset as usize],
            MappedAddress::ExternalRam(offset) => self.cartridge.read_ram(offset),
            MappedAddress::WorkRam(offset) => self.work_ram[offset as usize],
            MappedAddress::Oam(offset) => self.oam[offset as usize],
            MappedAddress::Unusable => 0x00,
            MappedAddress::JoypadRegister => self.joypad.read_register(),
            MappedAddress::SerialRegister(register) => self.serial.read_register(register),
            MappedAddress::TimerRegister(register) => self.timers.read_register(register),
            MappedAddress::InterruptRegister(register) => self.interrupts.read_register(register),
            MappedAddress::AudioRegister(offset) => self.audio.read_register(offset),
            MappedAddress::VideoRegister(register) => self.video.read_register(register),
            MappedAddress::DmaTransfer => self.dma_source,
            MappedAddress::BootRomDisable => self.boot_rom_disable,
            MappedAddress::HighRam(offset) => self.high_ram[offset as usize],
            MappedAddress::Unmapped => 0xff,
        }
    }

    pub fn write(&mut self, address: u16, value: u8) {
        match MappedAddress::map(address) {
            // Bank-control capture once MBCs are modeled.
            MappedAddress::Rom(_) => {}
            MappedAddress::VideoRam(offset) => self.video_ram[offset as usize] = value,
            MappedAddress::ExternalRam(offset) => self.cartridge.write_ram(offset, value),
            MappedAddress::WorkRam(offset) => self.work_ram[offset as usize] = value,
            MappedAddress::Oam(offset) => self.oam[offset as usize] = value,
            MappedAddress::Unusable => {}
            MappedAddress::JoypadRegister => self.joypad.write_register(value),
            MappedAddress::SerialRegister(register) => match register {
                serial::Register::Data => self.serial.data = value,
                serial::Register::Control => {
                    if self.serial.write_control(value) {
                        self.interrupts.request(interrupts::Interrupt::Serial);
                    }
                }
            },
            MappedAddress::TimerRegister(register) => self.timers.write_register(register, value),
            MappedAddress::InterruptRegister(register) => {
                self.interrupts.write_register(register, value);
            }
            MappedAddress::AudioRegister(offset) => self.audio.write_register(offset, value),
            MappedAddress::VideoRegister(register) => self.video.write_register(register, value),
            MappedAddress::DmaTransfer => self.begin_dma_transfer(value),
            MappedAddress::BootRomDisable => self.boot_rom_disable = value,
            MappedAddress::HighRam(offset) => self.high_ram[offset as usize] = value,
            MappedAddress::Unmapped => {}
        }
    }

    /// Little-endian word read: low byte at the lower address.
    pub fn read_word(&self, address: u16) -> u16 {
        let low = self.read(address);
        let high = self.read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    pub fn write_word(&mut self, address: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(address, low);
        self.write(address.wrapping_add(1), high);
    }

    /// OAM DMA (0xFF46): one register write copies 160 bytes from
    /// `page * 0x100` into OAM, synchronously. The source goes through
    /// the ordinary read path so it obeys the same decode rules as any
    /// other access — ROM, cartridge RAM and echo RAM all work.
    fn begin_dma_transfer(&mut self, page: u8) {
        self.dma_source = page;
        let base = (page as u16) << 8;
        for offset in 0..self.oam.len() as u16 {
            let byte = self.read(base.wrapping_add(offset));
            self.oam[offset as usize] = byte;
        }
    }
}
