//! Signal path: phase accumulator, waveform bank, source mux, volume and
//! the 1-bit delta-sigma DAC.
//!
//! ```text
//!   PhaseAccumulator ──► WaveformBank ──┐
//!                                       ├─► ModeMux ─► VolumeScaler
//!   stream sample register ─────────────┘                  │
//!                                                          ▼
//!                                   DAC bit ◄─ DeltaSigmaModulator
//! ```

pub mod phase;
pub mod waveform;
pub mod mux;
pub mod volume;
pub mod delta_sigma;

pub use delta_sigma::DeltaSigmaModulator;
pub use mux::{ModeMux, Source};
pub use phase::{frequency_hz, frequency_word_for_hz, PhaseAccumulator};
pub use volume::VolumeScaler;
pub use waveform::{Waveform, WaveformBank};
