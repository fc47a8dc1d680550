//! Chip-select framed serial decoder (mode 0, MSB first).
//!
//! The framer watches the three bus lines and turns them into register
//! writes. The first byte of every frame is an address; each following byte
//! is written to the current address, which then increments. Deasserting
//! chip-select drops whatever partial byte is in the shift register.

use log::trace;

use crate::registers::RegisterWrite;

/// Framer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Chip-select deasserted.
    Idle,
    /// Shifting in the address byte.
    AwaitAddress,
    /// Shifting in a data byte for `SerialFramer::address`.
    AwaitData,
}

/// Levels of the three bus lines at one sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLines {
    pub mosi: bool,
    pub sck: bool,
    /// Chip-select, active low.
    pub cs_n: bool,
}

impl BusLines {
    /// Bus at rest: chip-select high, clock low.
    pub const IDLE: BusLines = BusLines {
        mosi: false,
        sck: false,
        cs_n: true,
    };

    /// Decode `uio_in`: bit 0 MOSI, bit 1 SCK, bit 2 CS_N.
    pub const fn from_uio(uio_in: u8) -> Self {
        BusLines {
            mosi: uio_in & 0x01 != 0,
            sck: uio_in & 0x02 != 0,
            cs_n: uio_in & 0x04 != 0,
        }
    }

    /// Chip-select asserted with the given data and clock levels.
    pub const fn selected(mosi: bool, sck: bool) -> Self {
        BusLines {
            mosi,
            sck,
            cs_n: false,
        }
    }

    /// Chip-select released with the given data and clock levels.
    pub const fn deselected(mosi: bool, sck: bool) -> Self {
        BusLines {
            mosi,
            sck,
            cs_n: true,
        }
    }

    pub const fn to_uio(self) -> u8 {
        (self.mosi as u8) | (self.sck as u8) << 1 | (self.cs_n as u8) << 2
    }
}

/// Serial frame decoder.
#[derive(Debug, Clone)]
pub struct SerialFramer {
    state: FrameState,
    shift: u8,
    bits: u8,
    address: u8,
    last_sck: bool,
}

impl SerialFramer {
    pub const fn new() -> Self {
        SerialFramer {
            state: FrameState::Idle,
            shift: 0,
            bits: 0,
            address: 0,
            last_sck: false,
        }
    }

    /// Return to idle, dropping any frame in progress.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Address the next data byte will be written to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Sample the bus lines. Returns a write when a data byte completes.
    pub fn sample(&mut self, lines: BusLines) -> Option<RegisterWrite> {
        let rising = lines.sck && !self.last_sck;
        self.last_sck = lines.sck;

        if lines.cs_n {
            if self.state != FrameState::Idle {
                if self.bits != 0 {
                    trace!("frame ended mid-byte, {} bits discarded", self.bits);
                }
                self.state = FrameState::Idle;
                self.shift = 0;
                self.bits = 0;
            }
            return None;
        }

        if self.state == FrameState::Idle {
            self.state = FrameState::AwaitAddress;
            self.shift = 0;
            self.bits = 0;
            // An edge coincident with the select edge is not a data edge.
            return None;
        }

        if !rising {
            return None;
        }

        self.shift = (self.shift << 1) | lines.mosi as u8;
        self.bits += 1;
        if self.bits < 8 {
            return None;
        }

        let byte = self.shift;
        self.shift = 0;
        self.bits = 0;

        match self.state {
            FrameState::AwaitAddress => {
                trace!("frame address {:#04x}", byte);
                self.address = byte;
                self.state = FrameState::AwaitData;
                None
            }
            FrameState::AwaitData => {
                let write = RegisterWrite::new(self.address, byte);
                self.address = self.address.wrapping_add(1);
                Some(write)
            }
            FrameState::Idle => None,
        }
    }
}

impl Default for SerialFramer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECT: BusLines = BusLines {
        mosi: false,
        sck: false,
        cs_n: false,
    };

    /// Clock one byte in MSB first, collecting any writes it produces.
    fn send_byte(
        framer: &mut SerialFramer,
        byte: u8,
        out: &mut [Option<RegisterWrite>; 8],
        n: &mut usize,
    ) {
        for i in (0..8).rev() {
            let mosi = (byte >> i) & 1 != 0;
            framer.sample(BusLines::selected(mosi, false));
            if let Some(w) = framer.sample(BusLines::selected(mosi, true)) {
                out[*n] = Some(w);
                *n += 1;
            }
        }
    }

    fn frame(framer: &mut SerialFramer, bytes: &[u8]) -> ([Option<RegisterWrite>; 8], usize) {
        let mut out = [None; 8];
        let mut n = 0;
        framer.sample(SELECT);
        for &b in bytes {
            send_byte(framer, b, &mut out, &mut n);
        }
        framer.sample(BusLines::IDLE);
        (out, n)
    }

    #[test]
    fn single_write() {
        let mut framer = SerialFramer::new();
        let (out, n) = frame(&mut framer, &[0x06, 0x7F]);
        assert_eq!(n, 1);
        assert_eq!(out[0], Some(RegisterWrite::new(0x06, 0x7F)));
        assert_eq!(framer.state(), FrameState::Idle);
    }

    #[test]
    fn burst_write_increments_address() {
        let mut framer = SerialFramer::new();
        let (out, n) = frame(&mut framer, &[0x02, 0xAA, 0xBB, 0xCC]);
        assert_eq!(n, 3);
        assert_eq!(out[0], Some(RegisterWrite::new(0x02, 0xAA)));
        assert_eq!(out[1], Some(RegisterWrite::new(0x03, 0xBB)));
        assert_eq!(out[2], Some(RegisterWrite::new(0x04, 0xCC)));
    }

    #[test]
    fn address_only_frame_writes_nothing() {
        let mut framer = SerialFramer::new();
        let (_, n) = frame(&mut framer, &[0x00]);
        assert_eq!(n, 0);
    }

    #[test]
    fn burst_address_wraps() {
        let mut framer = SerialFramer::new();
        let (out, n) = frame(&mut framer, &[0xFF, 0x01, 0x02]);
        assert_eq!(n, 2);
        assert_eq!(out[1], Some(RegisterWrite::new(0x00, 0x02)));
    }

    #[test]
    fn truncated_byte_is_discarded() {
        let mut framer = SerialFramer::new();
        let mut out = [None; 8];
        let mut n = 0;
        framer.sample(SELECT);
        send_byte(&mut framer, 0x00, &mut out, &mut n);
        // Four bits of a data byte, then deselect.
        for _ in 0..4 {
            framer.sample(BusLines::selected(true, false));
            framer.sample(BusLines::selected(true, true));
        }
        framer.sample(BusLines::IDLE);
        assert_eq!(n, 0);
        assert_eq!(framer.state(), FrameState::Idle);

        // Next frame starts cleanly with an address byte.
        let (out, n) = frame(&mut framer, &[0x05, 0x80]);
        assert_eq!(n, 1);
        assert_eq!(out[0], Some(RegisterWrite::new(0x05, 0x80)));
    }

    #[test]
    fn reselect_restarts_with_address() {
        let mut framer = SerialFramer::new();
        frame(&mut framer, &[0x02, 0x11]);
        // A new frame does not continue from 0x03.
        let (out, n) = frame(&mut framer, &[0x10, 0x22]);
        assert_eq!(n, 1);
        assert_eq!(out[0], Some(RegisterWrite::new(0x10, 0x22)));
    }

    #[test]
    fn clock_edges_ignored_while_deselected() {
        let mut framer = SerialFramer::new();
        for _ in 0..16 {
            framer.sample(BusLines::deselected(true, false));
            assert_eq!(framer.sample(BusLines::deselected(true, true)), None);
        }
        assert_eq!(framer.state(), FrameState::Idle);
    }

    #[test]
    fn held_clock_is_one_edge() {
        let mut framer = SerialFramer::new();
        framer.sample(SELECT);
        framer.sample(BusLines::selected(true, true));
        // Repeated high samples must not shift more bits in.
        for _ in 0..20 {
            framer.sample(BusLines::selected(true, true));
        }
        assert_eq!(framer.bits, 1);
    }

    #[test]
    fn line_constructors() {
        assert_eq!(BusLines::selected(true, false).to_uio(), 0b001);
        assert_eq!(BusLines::selected(false, true).to_uio(), 0b010);
        assert_eq!(BusLines::deselected(false, false), BusLines::IDLE);
    }

    #[test]
    fn uio_round_trip_bits() {
        let lines = BusLines::from_uio(0b101);
        assert!(lines.mosi);
        assert!(!lines.sck);
        assert!(lines.cs_n);
        assert_eq!(lines.to_uio(), 0b101);
        assert_eq!(BusLines::IDLE.to_uio(), 0x04);
    }
}
