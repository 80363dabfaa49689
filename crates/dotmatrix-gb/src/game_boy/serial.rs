use std::io::Write;

use bitflags::bitflags;

#[derive(Debug)]
pub enum Register {
    Data,
    Control,
}

bitflags! {
    #[derive(Copy, Clone, Debug)]
    pub struct Control: u8 {
        const TRANSFER_START = 0b1000_0000;
        const CLOCK_SELECT   = 0b0000_0001;

        const _OTHER = !0;
    }
}

/// The serial transfer pair (0xFF01 data, 0xFF02 control). No link
/// cable is modeled: a transfer requested with the start bit completes
/// instantly, emitting the data byte on the output sink. The byte is
/// also retained in `output` so a test harness can drain it.
pub struct Registers {
    pub data: u8,
    pub control: Control,
    pub output: Vec<u8>,
    sink: Box<dyn Write + Send>,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            data: 0,
            control: Control::from_bits_retain(0x7e),
            output: Vec::new(),
            sink: Box::new(std::io::stdout()),
        }
    }

    pub fn set_sink(&mut self, sink: Box<dyn Write + Send>) {
        self.sink = sink;
    }

    pub fn read_register(&self, register: Register) -> u8 {
        match register {
            Register::Data => self.data,
            Register::Control => self.control.bits(),
        }
    }

    /// Store a control write. A value with the start bit set emits the
    /// data byte immediately and the stored start bit drops back to 0.
    /// Returns whether a transfer completed (the caller raises the
    /// serial interrupt request).
    pub fn write_control(&mut self, value: u8) -> bool {
        self.control = Control::from_bits_retain(value);
        if !self.control.contains(Control::TRANSFER_START) {
            return false;
        }

        self.output.push(self.data);
        let _ = self.sink.write_all(&[self.data]);
        let _ = self.sink.flush();
        self.control.remove(Control::TRANSFER_START);
        true
    }
}
