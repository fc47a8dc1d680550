//! Free-running phase accumulator.
//!
//! The accumulator is 32 bits wide and advances by the 24-bit frequency word
//! every system clock, wrapping naturally at 2^32. Output frequency is
//! `word * clock / 2^32`.

use crate::constants::{AMPLITUDE_BITS, FREQUENCY_WORD_MAX, PHASE_BITS};

/// 2^32 as `f64`, one full cycle of the accumulator.
const PHASE_CYCLE: f64 = 4_294_967_296.0;

/// Phase accumulator. Advances every clock regardless of OSC_EN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseAccumulator {
    phase: u32,
}

impl PhaseAccumulator {
    pub const fn new() -> Self {
        PhaseAccumulator { phase: 0 }
    }

    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Current accumulator value.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Top `AMPLITUDE_BITS` of the phase, the window every waveform derives from.
    pub fn window(&self) -> u8 {
        (self.phase >> (PHASE_BITS - AMPLITUDE_BITS)) as u8
    }

    /// Advance by one clock.
    pub fn advance(&mut self, frequency_word: u32) {
        self.phase = self.phase.wrapping_add(frequency_word & FREQUENCY_WORD_MAX);
    }
}

/// Frequency word that produces `hz` at a system clock of `clock_hz`.
///
/// Rounds to the nearest word and clamps to the 24-bit range.
pub fn frequency_word_for_hz(hz: f32, clock_hz: u32) -> u32 {
    if hz.is_nan() || hz <= 0.0 || clock_hz == 0 {
        return 0;
    }
    let word = libm::round(hz as f64 * PHASE_CYCLE / clock_hz as f64);
    if word >= FREQUENCY_WORD_MAX as f64 {
        FREQUENCY_WORD_MAX
    } else {
        word as u32
    }
}

/// Output frequency in Hz for a given frequency word.
pub fn frequency_hz(word: u32, clock_hz: u32) -> f32 {
    ((word & FREQUENCY_WORD_MAX) as f64 * clock_hz as f64 / PHASE_CYCLE) as f32
}
