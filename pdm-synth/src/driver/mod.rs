//! Register driver for the PDM synthesizer.
//!
//! Works against the physical part over any `embedded-hal` SPI device, or
//! against the model through [`SimulatedSpi`](crate::bus::SimulatedSpi).
//!
//! # Feature gate
//!
//! This module is available when the `hal` feature is enabled (on by default).

mod synth_driver;

pub use synth_driver::SynthDriver;
