/// System clock frequency in Hz that the pipeline is stepped at.
pub const SYSTEM_CLOCK_HZ: u32 = 50_000_000;

/// Width of the phase accumulator in bits.
pub const PHASE_BITS: u32 = 32;

/// Width of the programmable frequency word in bits.
pub const FREQUENCY_WORD_BITS: u32 = 24;

/// Largest value the frequency word can hold.
pub const FREQUENCY_WORD_MAX: u32 = (1 << FREQUENCY_WORD_BITS) - 1;

/// Amplitude resolution of the waveform window and DAC input, in bits.
pub const AMPLITUDE_BITS: u32 = 8;

/// Modulator threshold. An amplitude equal to this produces a constant-high stream.
pub const FULL_SCALE: u16 = 255;
