//! # pdm-synth
//!
//! A `no_std`, cycle-level model of a small serial-controlled synthesizer
//! that renders audio as a 1-bit pulse-density stream. One call to
//! [`Synthesizer::tick`] is one system clock: the model samples the input
//! pins, updates its registers, and drives the DAC, gate and status pins
//! exactly as the hardware does on that edge.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Bus | [`bus`] | Serial framer, clock-domain write synchronizer, simulated SPI |
//! | Registers | [`registers`] | Control/frequency/duty/volume/stream register map |
//! | DSP | [`dsp`] | Phase accumulator, waveforms, mode mux, volume, delta-sigma |
//! | I/O | [`io`] | Pin packing, gate logic, output driver, density meter |
//! | Top | [`synth`] | [`Synthesizer`]: wires everything per clock |
//! | Driver | [`driver`] | `embedded-hal` register driver (feature-gated) |
//!
//! ## Quick start
//!
//! ```ignore
//! use pdm_synth::bus::{SimulatedSpi, SpiTiming};
//! use pdm_synth::driver::SynthDriver;
//! use pdm_synth::dsp::Waveform;
//! use pdm_synth::Synthesizer;
//!
//! let spi = SimulatedSpi::new(Synthesizer::default(), SpiTiming::DEFAULT);
//! let mut synth = SynthDriver::new(spi);
//! synth.set_frequency(440.0)?;
//! synth.select_waveforms(&[Waveform::Sawtooth])?;
//! synth.set_volume(0xC0)?;
//! synth.oscillator_mode()?;
//!
//! let meter = synth.spi_mut().synth_mut().run(50_000);
//! let density = meter.density();
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `hal` | yes | [`driver`] and [`bus::SimulatedSpi`] (requires `embedded-hal`) |
//!
//! ## Clocking
//!
//! - **System clock:** 50 MHz ([`constants::SYSTEM_CLOCK_HZ`])
//! - **Phase accumulator:** 32 bits, 24-bit frequency word
//! - **Amplitude:** 8 bits, full scale [`constants::FULL_SCALE`]

#![no_std]

pub mod constants;
pub mod config;
pub mod control;
pub mod registers;
pub mod bus;
pub mod dsp;
pub mod io;
pub mod synth;

#[cfg(feature = "hal")]
pub mod driver;

pub use config::{SynthConfig, VolumeMode, WriteSync};
pub use control::SynthControl;
pub use synth::Synthesizer;
