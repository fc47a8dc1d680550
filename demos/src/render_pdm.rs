//! render_pdm - program the synthesizer model and dump its DAC bitstream
//!
//! The bitstream is written one bit per system clock, packed MSB first.
//! Low-pass filtering and decimating it (e.g. with sox) recovers the audio.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use pdm_synth::bus::{SimulatedSpi, SpiTiming};
use pdm_synth::driver::SynthDriver;
use pdm_synth::dsp::{frequency_hz, Waveform};
use pdm_synth::io::DensityMeter;
use pdm_synth::{SynthConfig, Synthesizer, VolumeMode, WriteSync};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WaveformArg {
    Square,
    Saw,
    Triangle,
}

impl From<WaveformArg> for Waveform {
    fn from(arg: WaveformArg) -> Self {
        match arg {
            WaveformArg::Square => Waveform::Square,
            WaveformArg::Saw => Waveform::Sawtooth,
            WaveformArg::Triangle => Waveform::Triangle,
        }
    }
}

#[derive(Parser)]
#[command(name = "render_pdm")]
#[command(about = "Render the PDM synthesizer's DAC bitstream to a file")]
#[command(version)]
struct Cli {
    /// Output file (packed bits, MSB first)
    output: PathBuf,

    /// Waveforms to enable (comma separated)
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "saw")]
    waveform: Vec<WaveformArg>,

    /// Oscillator frequency in Hz
    #[arg(short, long, default_value_t = 440.0)]
    frequency: f32,

    /// Square-wave duty cycle, 0.0 to 1.0
    #[arg(short, long, default_value_t = 0.5)]
    duty: f32,

    /// Volume register value
    #[arg(short, long, default_value_t = 0xFF)]
    volume: u8,

    /// Stream this fixed sample instead of running the oscillator
    #[arg(short, long)]
    stream: Option<u8>,

    /// System clocks to render after programming
    #[arg(short, long, default_value_t = 1_000_000)]
    clocks: u32,

    /// Use the 8-level stepped volume curve
    #[arg(long)]
    stepped_volume: bool,

    /// Apply bus writes on the clock they complete
    #[arg(long)]
    immediate_writes: bool,

    /// Hold the software gate on
    #[arg(long)]
    gate: bool,
}

fn main() -> Result<()> {
    // Library log records are picked up through tracing-log.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = SynthConfig::new();
    if cli.stepped_volume {
        config = config.with_volume_mode(VolumeMode::Stepped);
    }
    if cli.immediate_writes {
        config = config.with_write_sync(WriteSync::Immediate);
    }

    let spi = SimulatedSpi::new(Synthesizer::new(config), SpiTiming::DEFAULT);
    let mut synth = SynthDriver::new(spi);

    let waveforms: Vec<Waveform> = cli.waveform.iter().copied().map(Waveform::from).collect();
    synth.set_frequency(cli.frequency)?;
    synth.set_duty_fraction(cli.duty)?;
    synth.select_waveforms(&waveforms)?;
    synth.set_volume(cli.volume)?;
    match cli.stream {
        Some(sample) => {
            synth.stream_sample(sample)?;
            synth.streaming_mode()?;
        }
        None => synth.oscillator_mode()?,
    }
    if cli.gate {
        synth.gate_on()?;
    }

    let model = synth.spi_mut().synth_mut();
    let word = model.registers().frequency_word();
    tracing::info!(
        "programmed in {} clocks: word {:#08x} ({:.3} Hz), control {:#04x}",
        model.ticks(),
        word,
        frequency_hz(word, pdm_synth::constants::SYSTEM_CLOCK_HZ),
        model.registers().control().bits(),
    );

    let (bytes, meter) = render(model, cli.clocks);
    std::fs::write(&cli.output, &bytes)
        .with_context(|| format!("Failed to write bitstream to {:?}", cli.output))?;

    tracing::info!(
        "wrote {} bytes to {:?}: density {:.4}, {} transitions, osc_run {}, gate {}",
        bytes.len(),
        cli.output,
        meter.density(),
        meter.transitions(),
        model.outputs().osc_run(),
        model.outputs().gate(),
    );
    Ok(())
}

/// Run `clocks` ticks, packing the DAC pin MSB first.
fn render(model: &mut Synthesizer, clocks: u32) -> (Vec<u8>, DensityMeter) {
    let mut bytes = Vec::with_capacity((clocks as usize).div_ceil(8));
    let mut meter = DensityMeter::new();
    let mut acc = 0u8;
    for n in 0..clocks {
        let bit = model.tick().dac();
        meter.push(bit);
        acc = (acc << 1) | u8::from(bit);
        if n % 8 == 7 {
            bytes.push(acc);
            acc = 0;
        }
    }
    let tail = clocks % 8;
    if tail != 0 {
        bytes.push(acc << (8 - tail));
    }
    (bytes, meter)
}
