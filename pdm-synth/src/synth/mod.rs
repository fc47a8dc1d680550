//! Top-level synthesizer: one [`Synthesizer::tick`] per system clock.
//!
//! Each tick, in order:
//!
//! 1. The signal path runs on the register values latched at the end of the
//!    previous tick: waveform from the current phase, source mux, volume,
//!    modulator. The phase then advances by the frequency word.
//! 2. The bus lines are sampled. A completed data byte enters the write
//!    synchronizer; whatever leaves it is written to the register file.
//!
//! A write therefore never races the accumulator: the word used in step 1 is
//! always the previous tick's value.
//!
//! Reset is asynchronous: asserting `rst_n` low (or `ui_in[1]` low) through
//! [`Synthesizer::set_pins`] clears state immediately and holds it cleared
//! until released. The gate output stays live through reset.

use log::debug;

use crate::bus::{SerialFramer, WriteSynchronizer};
use crate::config::SynthConfig;
use crate::dsp::{
    DeltaSigmaModulator, ModeMux, PhaseAccumulator, Source, VolumeScaler, WaveformBank,
};
use crate::io::{gate, CoreSignals, DensityMeter, OutputDriver, OutputPins, PinInputs};
use crate::registers::{Control, RegisterFile};

/// Cycle-level synthesizer model.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: SynthConfig,
    pins: PinInputs,
    framer: SerialFramer,
    sync: WriteSynchronizer,
    registers: RegisterFile,
    phase: PhaseAccumulator,
    bank: WaveformBank,
    mux: ModeMux,
    volume: VolumeScaler,
    modulator: DeltaSigmaModulator,
    driver: OutputDriver,
    /// Registered DAC bit from the last tick.
    dac: bool,
    /// Scaled amplitude fed to the modulator on the last tick.
    amplitude: u8,
    ticks: u64,
}

impl Synthesizer {
    /// Power-on state with the given configuration and idle pins.
    pub fn new(config: SynthConfig) -> Self {
        Synthesizer {
            config,
            pins: PinInputs::IDLE,
            framer: SerialFramer::new(),
            sync: WriteSynchronizer::new(config.write_sync),
            registers: RegisterFile::new(),
            phase: PhaseAccumulator::new(),
            bank: WaveformBank::new(),
            mux: ModeMux::new(),
            volume: VolumeScaler::new(config.volume_mode),
            modulator: DeltaSigmaModulator::new(),
            driver: OutputDriver::new(),
            dac: false,
            amplitude: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> SynthConfig {
        self.config
    }

    /// Clear registers, phase, integrator, framer and synchronizer.
    pub fn reset(&mut self) {
        debug!("synth reset at tick {}", self.ticks);
        self.framer.reset();
        self.sync.reset();
        self.registers.reset();
        self.phase.reset();
        self.modulator.reset();
        self.dac = false;
        self.amplitude = 0;
    }

    /// Current input pin levels.
    pub fn pins(&self) -> PinInputs {
        self.pins
    }

    /// Change the input pin levels. Asserting reset takes effect immediately.
    pub fn set_pins(&mut self, pins: PinInputs) {
        let entering_reset = pins.in_reset() && !self.pins.in_reset();
        self.pins = pins;
        if entering_reset {
            self.reset();
        }
    }

    /// Advance one system clock with the current pin levels.
    pub fn tick(&mut self) -> OutputPins {
        self.ticks = self.ticks.wrapping_add(1);

        if self.pins.in_reset() {
            return self.outputs();
        }

        let regs = self.registers;
        let control = regs.control();
        let waveform = self.bank.sample(control, self.phase.window(), regs.duty());
        let selected = self.mux.select(control, waveform, regs.stream_sample());
        self.amplitude = self.volume.scale(selected, regs.volume());
        self.dac = self.modulator.step(self.amplitude);
        self.phase.advance(regs.frequency_word());

        let completed = self.framer.sample(self.pins.bus());
        if let Some(write) = self.sync.clock(completed) {
            self.registers.write(write.address, write.data);
        }

        self.outputs()
    }

    /// Set the pins, then advance one clock.
    pub fn tick_with(&mut self, pins: PinInputs) -> OutputPins {
        self.set_pins(pins);
        self.tick()
    }

    /// Advance `n` clocks with the current pins, measuring the DAC pin.
    pub fn run(&mut self, n: u32) -> DensityMeter {
        let mut meter = DensityMeter::new();
        for _ in 0..n {
            meter.push(self.tick().dac());
        }
        meter
    }

    /// Output pins for the current state and pin levels.
    ///
    /// The gate output is combinational, so it follows `set_pins` without
    /// waiting for a tick.
    pub fn outputs(&self) -> OutputPins {
        let control = self.registers.control();
        self.driver.drive(
            self.pins.ena,
            CoreSignals {
                dac: self.dac,
                gate: gate(self.pins.hw_gate(), control.contains(Control::SW_GATE)),
                osc_run: control.oscillator_running(),
            },
        )
    }

    /// Register file view.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Source currently selected by the control register.
    pub fn source(&self) -> Source {
        Source::select(self.registers.control())
    }

    pub fn phase(&self) -> u32 {
        self.phase.phase()
    }

    /// Amplitude that entered the modulator on the last tick.
    pub fn amplitude(&self) -> u8 {
        self.amplitude
    }

    /// Modulator integrator.
    pub fn integrator(&self) -> u16 {
        self.modulator.error()
    }

    /// Clocks elapsed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True while a completed write is still crossing into the system clock domain.
    pub fn write_pending(&self) -> bool {
        self.sync.is_pending()
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}
