//! Register map and register file.
//!
//! The address space is a flat 8-bit range. Only seven addresses are backed;
//! every other address accepts writes and ignores them. All registers are
//! 8 bits wide. The 24-bit frequency word is spread little-endian across
//! three consecutive addresses so that a single burst can program it.

use bitflags::bitflags;
use log::{debug, trace};

// ── Register addresses ─────────────────────────────────────────────────────

/// Control register.
/// - Bit 5: TRIANGLE_EN
/// - Bit 4: SAW_EN
/// - Bit 3: SQUARE_EN
/// - Bit 2: SW_GATE
/// - Bit 1: STREAM_MODE
/// - Bit 0: OSC_EN
pub const CONTROL: u8 = 0x00;

/// Frequency word, bits 7:0.
pub const FREQ_LO: u8 = 0x02;

/// Frequency word, bits 15:8.
pub const FREQ_MID: u8 = 0x03;

/// Frequency word, bits 23:16.
pub const FREQ_HI: u8 = 0x04;

/// Square-wave duty threshold (0x80 ≈ 50 %).
pub const DUTY: u8 = 0x05;

/// Volume (0x00 = silent, 0xFF = full scale).
pub const VOLUME: u8 = 0x06;

/// Streaming sample, used while STREAM_MODE is set.
pub const STREAM_SAMPLE: u8 = 0x10;

bitflags! {
    /// Contents of the control register. Bits 7:6 are reserved and always read as 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Control: u8 {
        /// Oscillator output reaches the modulator.
        const OSC_EN = 1 << 0;
        /// Streaming sample replaces the oscillator as the amplitude source.
        const STREAM_MODE = 1 << 1;
        /// Software gate, ORed with the hardware gate pin.
        const SW_GATE = 1 << 2;
        const SQUARE_EN = 1 << 3;
        const SAW_EN = 1 << 4;
        const TRIANGLE_EN = 1 << 5;
    }
}

impl Control {
    /// True when the oscillator is the active source (OSC_EN without STREAM_MODE).
    pub const fn oscillator_running(self) -> bool {
        self.contains(Control::OSC_EN) && !self.contains(Control::STREAM_MODE)
    }
}

/// A completed serial write, addressed to one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub address: u8,
    pub data: u8,
}

impl RegisterWrite {
    pub const fn new(address: u8, data: u8) -> Self {
        RegisterWrite { address, data }
    }
}

/// All synthesizer configuration state.
///
/// Written only through [`RegisterFile::write`]; the pipeline stages read it
/// through the accessor methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterFile {
    control: Control,
    frequency: [u8; 3],
    duty: u8,
    volume: u8,
    stream_sample: u8,
}

impl RegisterFile {
    /// Power-on state: everything zero, oscillator and streaming disabled.
    pub const fn new() -> Self {
        RegisterFile {
            control: Control::empty(),
            frequency: [0; 3],
            duty: 0,
            volume: 0,
            stream_sample: 0,
        }
    }

    /// Clear every register to its power-on value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply a whole-byte write. Unbacked addresses are ignored.
    ///
    /// Returns `true` when the address is backed by a register.
    pub fn write(&mut self, address: u8, data: u8) -> bool {
        match address {
            CONTROL => {
                let next = Control::from_bits_truncate(data);
                if next != self.control {
                    debug!(
                        "control {:#04x} -> {:#04x}",
                        self.control.bits(),
                        next.bits()
                    );
                }
                self.control = next;
            }
            FREQ_LO => self.frequency[0] = data,
            FREQ_MID => self.frequency[1] = data,
            FREQ_HI => self.frequency[2] = data,
            DUTY => self.duty = data,
            VOLUME => self.volume = data,
            STREAM_SAMPLE => self.stream_sample = data,
            _ => {
                trace!("write to unbacked address {:#04x} ignored", address);
                return false;
            }
        }
        trace!("reg[{:#04x}] = {:#04x}", address, data);
        true
    }

    /// Read back a register. Unbacked addresses read as 0.
    pub fn read(&self, address: u8) -> u8 {
        match address {
            CONTROL => self.control.bits(),
            FREQ_LO => self.frequency[0],
            FREQ_MID => self.frequency[1],
            FREQ_HI => self.frequency[2],
            DUTY => self.duty,
            VOLUME => self.volume,
            STREAM_SAMPLE => self.stream_sample,
            _ => 0,
        }
    }

    pub fn control(&self) -> Control {
        self.control
    }

    /// The 24-bit frequency word assembled from its three bytes.
    pub fn frequency_word(&self) -> u32 {
        u32::from(self.frequency[0])
            | u32::from(self.frequency[1]) << 8
            | u32::from(self.frequency[2]) << 16
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn stream_sample(&self) -> u8 {
        self.stream_sample
    }
}

/// Whether `address` is backed by a register.
pub const fn is_backed(address: u8) -> bool {
    matches!(
        address,
        CONTROL | FREQ_LO | FREQ_MID | FREQ_HI | DUTY | VOLUME | STREAM_SAMPLE
    )
}
