use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use audio::Audio;
use cartridge::{Cartridge, CartridgeError};
use cpu::Cpu;
use joypad::Joypad;
use timers::Timers;

pub mod audio;
pub mod cartridge;
pub mod cpu;
pub mod interrupts;
pub mod joypad;
pub mod memory;
pub mod serial;
pub mod timers;
pub mod video;

/// Cycle budget batched into one call of [`GameBoy::run_frame`]: one
/// ~59.7 Hz video frame at the nominal ~4.194304 MHz clock.
pub const CYCLES_PER_FRAME: u32 = 70224;

// Anything accessible via a memory address is stored in a separate
// struct to allow borrowing independently of the Cpu.
pub struct MemoryMapped {
    cartridge: Cartridge,
    video_ram: [u8; 0x2000],
    work_ram: [u8; 0x2000],
    oam: [u8; 0xa0],
    high_ram: [u8; 0x7f],
    joypad: Joypad,
    serial: serial::Registers,
    timers: Timers,
    interrupts: interrupts::Registers,
    audio: Audio,
    video: video::Registers,
    dma_source: u8,
    boot_rom_disable: u8,
}

impl MemoryMapped {
    fn new(cartridge: Cartridge) -> MemoryMapped {
        MemoryMapped {
            cartridge,
            video_ram: [0; 0x2000],
            work_ram: [0; 0x2000],
            oam: [0; 0xa0],
            high_ram: [0; 0x7f],
            joypad: Joypad::new(),
            serial: serial::Registers::new(),
            timers: Timers::new(),
            interrupts: interrupts::Registers::new(),
            audio: Audio::new(),
            video: video::Registers::new(),
            dma_source: 0,
            boot_rom_disable: 0,
        }
    }
}

/// The whole console: register file, everything bus-addressable, the
/// running flag and the cumulative cycle counter. Exclusively owned by
/// whoever drives the step loop; nothing in here locks.
pub struct GameBoy {
    pub(crate) cpu: Cpu,
    pub(crate) mapped: MemoryMapped,
    pub(crate) running: bool,
    pub(crate) cycles: u64,
}

impl GameBoy {
    /// A powered-up console with an empty cartridge slot. It will not
    /// run until a cartridge is loaded.
    pub fn new() -> GameBoy {
        GameBoy {
            cpu: Cpu::power_up(),
            mapped: MemoryMapped::new(Cartridge::none()),
            running: false,
            cycles: 0,
        }
    }

    pub fn with_cartridge(cartridge: Cartridge) -> GameBoy {
        GameBoy {
            cpu: Cpu::power_up(),
            mapped: MemoryMapped::new(cartridge),
            running: true,
            cycles: 0,
        }
    }

    /// Load a cartridge image from disk and start running. On failure
    /// the console stops running and nothing else changes; on success
    /// the register file is reset to its power-up state and the header
    /// description is printed.
    pub fn load_cartridge(&mut self, path: impl AsRef<Path>) -> Result<(), CartridgeError> {
        match Cartridge::load(path) {
            Ok(cartridge) => {
                println!("{}", cartridge.description());
                self.mapped.cartridge = cartridge;
                self.cpu = Cpu::power_up();
                self.running = true;
                Ok(())
            }
            Err(e) => {
                self.running = false;
                Err(e)
            }
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.mapped.cartridge
    }

    pub fn interrupts(&self) -> &interrupts::Registers {
        &self.mapped.interrupts
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Cycles consumed since power-up.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Read a byte off the bus, exactly as the CPU would.
    pub fn read(&self, address: u16) -> u8 {
        self.mapped.read(address)
    }

    /// Write a byte onto the bus, exactly as the CPU would.
    pub fn write(&mut self, address: u16, value: u8) {
        self.mapped.write(address, value);
    }

    /// Redirect serial output away from stdout (test harnesses).
    pub fn set_serial_sink(&mut self, sink: Box<dyn Write + Send>) {
        self.mapped.serial.set_sink(sink);
    }

    pub fn drain_serial_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.mapped.serial.output)
    }

    /// Hex dump of an inclusive address range, 16 bytes per row.
    pub fn dump_region(&self, start: u16, end: u16) -> String {
        let mut out = String::new();
        let mut row = start & !0xf;
        loop {
            let _ = write!(out, "{row:#06x}:");
            for offset in 0..16 {
                let address = row.wrapping_add(offset);
                if address >= start && address <= end {
                    let _ = write!(out, " {:02x}", self.read(address));
                } else {
                    out.push_str("   ");
                }
            }
            out.push('\n');
            match row.checked_add(16) {
                Some(next) if next <= end => row = next,
                _ => break,
            }
        }
        out
    }
}

impl Default for GameBoy {
    fn default() -> Self {
        GameBoy::new()
    }
}
