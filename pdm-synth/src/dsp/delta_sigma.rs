//! First-order delta-sigma modulator (1-bit DAC).
//!
//! Each clock the amplitude is added to an integrator. When the integrator
//! reaches [`FULL_SCALE`] a 1 is emitted and full scale is subtracted. Over
//! time the density of ones converges to `amplitude / FULL_SCALE`.

use crate::constants::FULL_SCALE;

/// 1-bit pulse-density modulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeltaSigmaModulator {
    /// Always below `FULL_SCALE` between clocks.
    error: u16,
}

impl DeltaSigmaModulator {
    pub const fn new() -> Self {
        DeltaSigmaModulator { error: 0 }
    }

    pub fn reset(&mut self) {
        self.error = 0;
    }

    /// Current integrator value.
    pub fn error(&self) -> u16 {
        self.error
    }

    /// Modulate one sample, returning the output bit.
    pub fn step(&mut self, amplitude: u8) -> bool {
        self.error += u16::from(amplitude);
        if self.error >= FULL_SCALE {
            self.error -= FULL_SCALE;
            true
        } else {
            false
        }
    }
}
