//! Pin-level boundary of the synthesizer.
//!
//! ## Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`PinInputs`] | Sampled `ui_in` / `uio_in` / `ena` / `rst_n` for one clock |
//! | [`OutputPins`] | Driven `uo_out` byte |
//! | [`OutputDriver`] | Maps DAC, gate and oscillator-running onto `uo_out` |
//! | [`gate`] | Hardware gate OR software gate |
//! | [`DensityMeter`] | Statistics over the DAC bitstream |

pub mod pins;
pub mod density;

pub use density::DensityMeter;
pub use pins::{gate, CoreSignals, OutputDriver, OutputPins, PinInputs};
