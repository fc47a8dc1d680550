//! Bit-banged SPI into a simulated synthesizer.
//!
//! [`SimulatedSpi`] implements [`embedded_hal::spi::SpiDevice`], so any
//! driver written against `embedded-hal` (including
//! [`SynthDriver`](crate::driver::SynthDriver)) can program the model exactly
//! as it would program the physical part. Every SCK half period advances the
//! synthesizer by a configurable number of system clocks, so bus traffic
//! takes realistic time relative to the audio pipeline.
//!
//! # Example
//!
//! ```ignore
//! let spi = SimulatedSpi::new(Synthesizer::default(), SpiTiming::default());
//! let mut driver = SynthDriver::new(spi);
//! driver.set_volume(0xFF)?;
//! let synth = driver.release().into_inner();
//! ```

use core::convert::Infallible;

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
use log::trace;

use crate::bus::BusLines;
use crate::constants::SYSTEM_CLOCK_HZ;
use crate::synth::Synthesizer;

/// Bus timing, in system clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiTiming {
    /// Clocks per SCK half period.
    pub ticks_per_half_bit: u32,
    /// Clocks after CS_N falls before the first bit, and after it rises.
    pub ticks_between_frames: u32,
}

impl SpiTiming {
    /// 1 MHz SCK against a 50 MHz system clock, 1 µs select setup and hold.
    pub const DEFAULT: SpiTiming = SpiTiming {
        ticks_per_half_bit: 25,
        ticks_between_frames: 50,
    };

    /// Fastest timing the framer can follow: one clock per pin change.
    pub const FAST: SpiTiming = SpiTiming {
        ticks_per_half_bit: 1,
        ticks_between_frames: 3,
    };
}

impl Default for SpiTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// SPI device that drives the pins of an owned [`Synthesizer`].
#[derive(Debug, Clone)]
pub struct SimulatedSpi {
    synth: Synthesizer,
    timing: SpiTiming,
}

impl SimulatedSpi {
    pub fn new(synth: Synthesizer, timing: SpiTiming) -> Self {
        SimulatedSpi { synth, timing }
    }

    pub fn timing(&self) -> SpiTiming {
        self.timing
    }

    pub fn synth(&self) -> &Synthesizer {
        &self.synth
    }

    /// Direct access, e.g. to run the pipeline between transactions.
    pub fn synth_mut(&mut self) -> &mut Synthesizer {
        &mut self.synth
    }

    pub fn into_inner(self) -> Synthesizer {
        self.synth
    }

    /// Hold the bus lines for `ticks` system clocks.
    fn hold(&mut self, lines: BusLines, ticks: u32) {
        let pins = self.synth.pins().with_bus(lines);
        self.synth.set_pins(pins);
        for _ in 0..ticks.max(1) {
            self.synth.tick();
        }
    }

    fn shift_out(&mut self, byte: u8) {
        let half = self.timing.ticks_per_half_bit;
        for i in (0..8).rev() {
            let mosi = (byte >> i) & 1 != 0;
            self.hold(BusLines::selected(mosi, false), half);
            self.hold(BusLines::selected(mosi, true), half);
        }
    }

    fn delay_ns(&mut self, ns: u32) {
        let ticks = (u64::from(ns) * u64::from(SYSTEM_CLOCK_HZ) / 1_000_000_000) as u32;
        let mut lines = self.synth.pins().bus();
        lines.sck = false;
        self.hold(lines, ticks);
    }
}

impl ErrorType for SimulatedSpi {
    type Error = Infallible;
}

impl SpiDevice for SimulatedSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        self.hold(BusLines::selected(false, false), self.timing.ticks_between_frames);

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    for &b in bytes.iter() {
                        self.shift_out(b);
                    }
                }
                Operation::Transfer(read, write) => {
                    for &b in write.iter() {
                        self.shift_out(b);
                    }
                    // The part has no MISO line.
                    read.fill(0);
                }
                Operation::TransferInPlace(words) => {
                    for b in words.iter_mut() {
                        self.shift_out(*b);
                        *b = 0;
                    }
                }
                Operation::Read(words) => {
                    for b in words.iter_mut() {
                        self.shift_out(0);
                        *b = 0;
                    }
                }
                Operation::DelayNs(ns) => self.delay_ns(*ns),
            }
        }

        self.hold(BusLines::IDLE, self.timing.ticks_between_frames);
        trace!("spi transaction done at tick {}", self.synth.ticks());
        Ok(())
    }
}
