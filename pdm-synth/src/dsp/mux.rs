//! Amplitude source selection.

use crate::registers::Control;

/// Which source currently feeds the modulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Streaming-sample register.
    Stream,
    /// Combined waveform bank output.
    Oscillator,
    Silence,
}

impl Source {
    /// STREAM_MODE wins over OSC_EN when both are set.
    pub const fn select(control: Control) -> Source {
        if control.contains(Control::STREAM_MODE) {
            Source::Stream
        } else if control.contains(Control::OSC_EN) {
            Source::Oscillator
        } else {
            Source::Silence
        }
    }
}

/// Mode multiplexer: exactly one amplitude source reaches the volume stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeMux;

impl ModeMux {
    pub const fn new() -> Self {
        ModeMux
    }

    /// Pick the amplitude for this clock.
    pub fn select(&self, control: Control, oscillator: u8, stream_sample: u8) -> u8 {
        match Source::select(control) {
            Source::Stream => stream_sample,
            Source::Oscillator => oscillator,
            Source::Silence => 0,
        }
    }
}
