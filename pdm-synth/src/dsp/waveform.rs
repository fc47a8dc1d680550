//! Waveform generators derived from the phase window.
//!
//! All generators take the top byte of the phase accumulator and return an
//! unsigned 8-bit amplitude. When several waveforms are enabled their
//! amplitudes are folded left to right (square, saw, triangle) with
//! saturating addition, so the combined output clips at 0xFF instead of
//! wrapping.

use crate::registers::Control;

/// One of the three oscillator shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Fold order when several shapes are enabled.
    pub const ALL: [Waveform; 3] = [
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    /// Enable bit for this shape in the control register.
    pub const fn enable_bit(self) -> Control {
        match self {
            Waveform::Square => Control::SQUARE_EN,
            Waveform::Sawtooth => Control::SAW_EN,
            Waveform::Triangle => Control::TRIANGLE_EN,
        }
    }

    /// Amplitude of this shape at phase window `window`.
    pub fn sample(self, window: u8, duty: u8) -> u8 {
        match self {
            Waveform::Square => square(window, duty),
            Waveform::Sawtooth => sawtooth(window),
            Waveform::Triangle => triangle(window),
        }
    }
}

/// Full scale while `window < duty`, zero afterwards.
#[inline]
pub fn square(window: u8, duty: u8) -> u8 {
    if window < duty { 0xFF } else { 0 }
}

/// Linear ramp 0 → 0xFF, wrapping each cycle.
#[inline]
pub fn sawtooth(window: u8) -> u8 {
    window
}

/// Symmetric ramp: the window over the first half of the cycle, mirrored
/// (`0xFF - window`) over the second. Peaks at 0x7F.
#[inline]
pub fn triangle(window: u8) -> u8 {
    if window < 0x80 { window } else { 0xFF - window }
}

/// Combines the waveforms enabled in the control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WaveformBank;

impl WaveformBank {
    pub const fn new() -> Self {
        WaveformBank
    }

    /// Saturating sum of every enabled shape; 0 when none are enabled.
    pub fn sample(&self, control: Control, window: u8, duty: u8) -> u8 {
        Waveform::ALL
            .iter()
            .filter(|w| control.contains(w.enable_bit()))
            .fold(0u8, |acc, w| acc.saturating_add(w.sample(window, duty)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sawtooth_is_window() {
        for w in 0u8..=0xFF {
            assert_eq!(sawtooth(w), w);
        }
    }

    #[test]
    fn square_half_duty() {
        assert_eq!(square(0x00, 0x80), 0xFF);
        assert_eq!(square(0x7F, 0x80), 0xFF);
        assert_eq!(square(0x80, 0x80), 0);
        assert_eq!(square(0xFF, 0x80), 0);
    }

    #[test]
    fn square_duty_extremes() {
        // duty 0 never goes high
        assert!((0u8..=0xFF).all(|w| square(w, 0) == 0));
        // duty 0xFF is high for all but the last window
        assert_eq!((0u8..=0xFF).filter(|&w| square(w, 0xFF) != 0).count(), 255);
    }

    #[test]
    fn triangle_is_symmetric() {
        assert_eq!(triangle(0x00), 0);
        assert_eq!(triangle(0x40), 0x40);
        assert_eq!(triangle(0x7F), 0x7F);
        assert_eq!(triangle(0x80), 0x7F);
        assert_eq!(triangle(0xC0), 0x3F);
        assert_eq!(triangle(0xFF), 0);
        for w in 0u8..0x80 {
            assert_eq!(triangle(w), triangle(0xFF - w));
        }
    }

    #[test]
    fn triangle_follows_window_then_mirror() {
        for w in 0u8..=0xFF {
            let expected = if w < 0x80 { w } else { 0xFF - w };
            assert_eq!(triangle(w), expected, "window {:#04x}", w);
        }
    }

    #[test]
    fn triangle_rises_then_falls() {
        for w in 1u8..0x80 {
            assert!(triangle(w) > triangle(w - 1));
        }
        for w in 0x81u8..=0xFF {
            assert!(triangle(w) < triangle(w - 1));
        }
    }

    #[test]
    fn bank_none_enabled_is_silent() {
        let bank = WaveformBank::new();
        assert_eq!(bank.sample(Control::OSC_EN, 0x90, 0x80), 0);
    }

    #[test]
    fn bank_single_waveform() {
        let bank = WaveformBank::new();
        assert_eq!(bank.sample(Control::SAW_EN, 0x42, 0x80), 0x42);
        assert_eq!(bank.sample(Control::SQUARE_EN, 0x10, 0x80), 0xFF);
        assert_eq!(bank.sample(Control::TRIANGLE_EN, 0x40, 0x80), 0x40);
        assert_eq!(bank.sample(Control::TRIANGLE_EN, 0xC0, 0x80), 0x3F);
    }

    #[test]
    fn bank_sum_saturates() {
        let bank = WaveformBank::new();
        let both = Control::SQUARE_EN | Control::SAW_EN;
        // Square high + any saw clips at full scale
        assert_eq!(bank.sample(both, 0x10, 0x80), 0xFF);
        // Square low: saw alone
        assert_eq!(bank.sample(both, 0x90, 0x80), 0x90);

        let saw_tri = Control::SAW_EN | Control::TRIANGLE_EN;
        // 0x30 + 0x30 = 0x60
        assert_eq!(bank.sample(saw_tri, 0x30, 0x80), 0x60);
        // Second half: window + mirror is exactly full scale
        assert_eq!(bank.sample(saw_tri, 0xC0, 0x80), 0xFF);

        let square_tri = Control::SQUARE_EN | Control::TRIANGLE_EN;
        // 0xFF + 0x40 clips
        assert_eq!(bank.sample(square_tri, 0x40, 0x80), 0xFF);
    }
}
