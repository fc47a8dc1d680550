//! Pulse-density meter for the 1-bit DAC output.
//!
//! Accumulates DAC bits and reports how dense the stream is and whether it
//! is moving at all. Useful as a stand-in for the analog reconstruction
//! filter when checking the output of the model.

/// Running statistics over a 1-bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DensityMeter {
    samples: u64,
    ones: u64,
    transitions: u64,
    last: Option<bool>,
}

impl DensityMeter {
    pub const fn new() -> Self {
        DensityMeter {
            samples: 0,
            ones: 0,
            transitions: 0,
            last: None,
        }
    }

    /// Record one DAC bit.
    pub fn push(&mut self, bit: bool) {
        self.samples += 1;
        if bit {
            self.ones += 1;
        }
        if let Some(prev) = self.last {
            if prev != bit {
                self.transitions += 1;
            }
        }
        self.last = Some(bit);
    }

    /// Number of bits recorded.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Number of 1 bits recorded.
    pub fn ones(&self) -> u64 {
        self.ones
    }

    /// Number of 0→1 or 1→0 changes between consecutive bits.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Number of distinct bit values seen (0, 1 or 2).
    pub fn distinct_values(&self) -> u8 {
        (self.ones > 0) as u8 + (self.ones < self.samples) as u8
    }

    /// Fraction of ones, 0.0 when nothing has been recorded.
    pub fn density(&self) -> f32 {
        if self.samples == 0 {
            0.0
        } else {
            self.ones as f32 / self.samples as f32
        }
    }

    /// Clear all statistics.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
