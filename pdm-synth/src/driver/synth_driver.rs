//! Host-side register driver for the PDM synthesizer.
//!
//! The driver is generic over any [`embedded_hal::spi::SpiDevice`]. Each
//! register write is one chip-select frame; multi-byte fields use a single
//! burst frame so the part's address auto-increment fills consecutive
//! registers.
//!
//! The part has no read-back path, so the driver caches the control register
//! and performs read-modify-write against the cache.
//!
//! # Example
//!
//! ```ignore
//! let mut synth = SynthDriver::new(spi);
//! synth.select_waveforms(&[Waveform::Sawtooth])?;
//! synth.set_frequency(440.0)?;
//! synth.set_volume(0xFF)?;
//! synth.oscillator_mode()?;
//! ```

use embedded_hal::spi::{Operation, SpiDevice};

use crate::constants::SYSTEM_CLOCK_HZ;
use crate::control::SynthControl;
use crate::dsp::{frequency_word_for_hz, Waveform};
use crate::registers::{self as reg, Control};

/// Synthesizer driver.
pub struct SynthDriver<SPI> {
    spi: SPI,
    /// Last value written to the control register.
    control: Control,
    /// System clock of the part, for Hz conversions.
    clock_hz: u32,
}

impl<SPI> SynthDriver<SPI>
where
    SPI: SpiDevice,
{
    /// Create a driver for a part clocked at [`SYSTEM_CLOCK_HZ`].
    ///
    /// Assumes the part is freshly reset (control register zero).
    pub fn new(spi: SPI) -> Self {
        Self::new_with_clock(spi, SYSTEM_CLOCK_HZ)
    }

    /// Create a driver for a part with a non-default system clock.
    pub fn new_with_clock(spi: SPI, clock_hz: u32) -> Self {
        Self {
            spi,
            control: Control::empty(),
            clock_hz,
        }
    }

    // ── Low-level bus helpers ──────────────────────────────────────────

    /// Write one register in its own frame.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), SPI::Error> {
        if address == reg::CONTROL {
            self.control = Control::from_bits_truncate(value);
        }
        self.spi.write(&[address, value])
    }

    /// Write `values` to consecutive registers starting at `address`, in one frame.
    ///
    /// The address wraps from 0xFF to 0x00, so a burst may land on the
    /// control register anywhere in `values`; the last such byte is cached.
    pub fn write_burst(&mut self, address: u8, values: &[u8]) -> Result<(), SPI::Error> {
        let control = values
            .iter()
            .enumerate()
            .rev()
            .find(|&(i, _)| address.wrapping_add(i as u8) == reg::CONTROL);
        if let Some((_, &value)) = control {
            self.control = Control::from_bits_truncate(value);
        }
        self.spi
            .transaction(&mut [Operation::Write(&[address]), Operation::Write(values)])
    }

    /// Cached control register.
    pub fn control(&self) -> Control {
        self.control
    }

    /// Overwrite the control register.
    pub fn set_control(&mut self, control: Control) -> Result<(), SPI::Error> {
        self.write_register(reg::CONTROL, control.bits())
    }

    /// Read-modify-write of the cached control register: `(current & !clear) | set`.
    fn modify_control(&mut self, set: Control, clear: Control) -> Result<(), SPI::Error> {
        let next = self.control.difference(clear).union(set);
        self.set_control(next)
    }

    // ── Oscillator ─────────────────────────────────────────────────────

    /// Program the 24-bit frequency word in one burst (LSB first).
    pub fn set_frequency_word(&mut self, word: u32) -> Result<(), SPI::Error> {
        let bytes = [word as u8, (word >> 8) as u8, (word >> 16) as u8];
        self.write_burst(reg::FREQ_LO, &bytes)
    }

    /// Program the oscillator frequency in Hz (rounded, clamped to the word range).
    pub fn set_frequency(&mut self, hz: f32) -> Result<(), SPI::Error> {
        let word = frequency_word_for_hz(hz, self.clock_hz);
        self.set_frequency_word(word)
    }

    /// Square-wave duty threshold (0x80 ≈ 50 %).
    pub fn set_duty(&mut self, duty: u8) -> Result<(), SPI::Error> {
        self.write_register(reg::DUTY, duty)
    }

    /// Square-wave duty as a fraction of the period (0.0–1.0, clamped).
    pub fn set_duty_fraction(&mut self, fraction: f32) -> Result<(), SPI::Error> {
        self.set_duty(unit_to_byte(fraction))
    }

    /// Enable exactly the given waveforms; others are disabled.
    pub fn select_waveforms(&mut self, waveforms: &[Waveform]) -> Result<(), SPI::Error> {
        let set = waveforms
            .iter()
            .fold(Control::empty(), |acc, w| acc | w.enable_bit());
        let clear = Control::SQUARE_EN | Control::SAW_EN | Control::TRIANGLE_EN;
        self.modify_control(set, clear)
    }

    // ── Source selection ───────────────────────────────────────────────

    /// Oscillator drives the DAC (OSC_EN set, STREAM_MODE cleared).
    pub fn oscillator_mode(&mut self) -> Result<(), SPI::Error> {
        self.modify_control(Control::OSC_EN, Control::STREAM_MODE)
    }

    /// Streaming sample drives the DAC (STREAM_MODE set, OSC_EN cleared).
    pub fn streaming_mode(&mut self) -> Result<(), SPI::Error> {
        self.modify_control(Control::STREAM_MODE, Control::OSC_EN)
    }

    /// Write one streaming sample.
    pub fn stream_sample(&mut self, sample: u8) -> Result<(), SPI::Error> {
        self.write_register(reg::STREAM_SAMPLE, sample)
    }

    /// Write samples one frame each, in order.
    ///
    /// A burst cannot be used here: auto-increment would move past the
    /// streaming register after the first byte.
    pub fn stream_samples(&mut self, samples: &[u8]) -> Result<(), SPI::Error> {
        for &s in samples {
            self.stream_sample(s)?;
        }
        Ok(())
    }

    // ── Output level and gate ──────────────────────────────────────────

    pub fn set_volume(&mut self, volume: u8) -> Result<(), SPI::Error> {
        self.write_register(reg::VOLUME, volume)
    }

    pub fn gate_on(&mut self) -> Result<(), SPI::Error> {
        self.modify_control(Control::SW_GATE, Control::empty())
    }

    pub fn gate_off(&mut self) -> Result<(), SPI::Error> {
        self.modify_control(Control::empty(), Control::SW_GATE)
    }

    /// Borrow the SPI device.
    pub fn spi(&self) -> &SPI {
        &self.spi
    }

    /// Mutably borrow the SPI device, e.g. to step a simulated part between writes.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Release the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

/// Map 0.0–1.0 onto 0x00–0xFF, rounding and clamping.
fn unit_to_byte(level: f32) -> u8 {
    if level.is_nan() || level <= 0.0 {
        0
    } else if level >= 1.0 {
        0xFF
    } else {
        (level * 255.0 + 0.5) as u8
    }
}

// ── SynthControl trait implementation ──────────────────────────────────────

impl<SPI> SynthControl for SynthDriver<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    /// Sets OSC_EN. If STREAM_MODE is also set, streaming keeps priority.
    fn enable(&mut self) -> Result<(), Self::Error> {
        self.modify_control(Control::OSC_EN, Control::empty())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.modify_control(Control::empty(), Control::OSC_EN | Control::STREAM_MODE)
    }

    fn volume(&mut self, level: f32) -> Result<(), Self::Error> {
        self.set_volume(unit_to_byte(level))
    }

    fn gate(&mut self, on: bool) -> Result<(), Self::Error> {
        if on {
            self.gate_on()
        } else {
            self.gate_off()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{self, ErrorType, Operation, SpiDevice};

    // ── Mock SPI recording frames ─────────────────────────────────────

    #[derive(Debug)]
    struct MockError;

    impl spi::Error for MockError {
        fn kind(&self) -> spi::ErrorKind {
            spi::ErrorKind::Other
        }
    }

    /// Records each transaction as a frame of written bytes.
    struct MockSpi {
        frames: [[u8; 8]; 32],
        lens: [usize; 32],
        count: usize,
        /// Fail every transaction once set.
        fail: bool,
    }

    impl MockSpi {
        fn new() -> Self {
            Self {
                frames: [[0; 8]; 32],
                lens: [0; 32],
                count: 0,
                fail: false,
            }
        }

        fn frame(&self, idx: usize) -> &[u8] {
            &self.frames[idx][..self.lens[idx]]
        }

        fn last(&self) -> &[u8] {
            self.frame(self.count - 1)
        }
    }

    impl ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            let idx = self.count;
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    for &b in bytes.iter() {
                        self.frames[idx][self.lens[idx]] = b;
                        self.lens[idx] += 1;
                    }
                }
            }
            self.count += 1;
            Ok(())
        }
    }

    fn make_driver() -> SynthDriver<MockSpi> {
        SynthDriver::new(MockSpi::new())
    }

    // ── Register writes ───────────────────────────────────────────────

    #[test]
    fn write_register_is_one_frame() {
        let mut d = make_driver();
        d.write_register(reg::VOLUME, 0x80).unwrap();
        let spi = d.release();
        assert_eq!(spi.count, 1);
        assert_eq!(spi.frame(0), &[reg::VOLUME, 0x80]);
    }

    #[test]
    fn frequency_word_is_single_burst() {
        let mut d = make_driver();
        d.set_frequency_word(0x02_4000).unwrap();
        let spi = d.release();
        assert_eq!(spi.count, 1);
        assert_eq!(spi.frame(0), &[reg::FREQ_LO, 0x00, 0x40, 0x02]);
    }

    #[test]
    fn frequency_hz_converts() {
        let mut d = make_driver();
        d.set_frequency(440.0).unwrap();
        let spi = d.release();
        // 37796 = 0x0093A4
        assert_eq!(spi.last(), &[reg::FREQ_LO, 0xA4, 0x93, 0x00]);
    }

    #[test]
    fn duty_fraction_rounds() {
        let mut d = make_driver();
        d.set_duty_fraction(0.5).unwrap();
        d.set_duty_fraction(2.0).unwrap();
        let spi = d.release();
        assert_eq!(spi.frame(0), &[reg::DUTY, 0x80]);
        assert_eq!(spi.frame(1), &[reg::DUTY, 0xFF]);
    }

    // ── Control cache ─────────────────────────────────────────────────

    #[test]
    fn select_waveforms_replaces_set() {
        let mut d = make_driver();
        d.oscillator_mode().unwrap();
        d.select_waveforms(&[Waveform::Square, Waveform::Triangle]).unwrap();
        assert_eq!(
            d.control(),
            Control::OSC_EN | Control::SQUARE_EN | Control::TRIANGLE_EN
        );
        d.select_waveforms(&[Waveform::Sawtooth]).unwrap();
        assert_eq!(d.control(), Control::OSC_EN | Control::SAW_EN);
        let spi = d.release();
        assert_eq!(spi.last(), &[reg::CONTROL, 0x11]);
    }

    #[test]
    fn mode_switch_is_exclusive() {
        let mut d = make_driver();
        d.oscillator_mode().unwrap();
        d.streaming_mode().unwrap();
        assert_eq!(d.control(), Control::STREAM_MODE);
        d.oscillator_mode().unwrap();
        assert_eq!(d.control(), Control::OSC_EN);
    }

    #[test]
    fn gate_preserves_other_bits() {
        let mut d = make_driver();
        d.set_control(Control::OSC_EN | Control::SAW_EN).unwrap();
        d.gate_on().unwrap();
        let spi = d.release();
        assert_eq!(spi.last(), &[reg::CONTROL, 0b0001_0101]);
    }

    #[test]
    fn raw_control_write_updates_cache() {
        let mut d = make_driver();
        d.write_register(reg::CONTROL, 0xFF).unwrap();
        // Reserved bits dropped from the cache
        assert_eq!(d.control().bits(), 0x3F);
        d.write_burst(reg::CONTROL, &[0x02, 0x00]).unwrap();
        assert_eq!(d.control(), Control::STREAM_MODE);
    }

    #[test]
    fn wrapping_burst_updates_cache() {
        let mut d = make_driver();
        d.write_burst(0xFF, &[0x00, 0x11]).unwrap();
        assert_eq!(d.control(), Control::OSC_EN | Control::SAW_EN);
        assert_eq!(d.spi.last(), &[0xFF, 0x00, 0x11]);

        // Later read-modify-writes start from the burst's value.
        d.gate_on().unwrap();
        assert_eq!(d.spi.last(), &[reg::CONTROL, 0x15]);
    }

    #[test]
    fn burst_missing_control_keeps_cache() {
        let mut d = make_driver();
        d.set_control(Control::SW_GATE).unwrap();
        d.write_burst(reg::FREQ_LO, &[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(d.control(), Control::SW_GATE);
    }

    #[test]
    fn enable_only_sets_osc_en() {
        let mut d = make_driver();
        d.set_control(Control::STREAM_MODE | Control::SW_GATE).unwrap();
        SynthControl::enable(&mut d).unwrap();
        assert_eq!(
            d.control(),
            Control::OSC_EN | Control::STREAM_MODE | Control::SW_GATE
        );
        assert!(!d.control().oscillator_running());
    }

    #[test]
    fn stream_samples_one_frame_each() {
        let mut d = make_driver();
        d.stream_samples(&[0x00, 0x40, 0x80]).unwrap();
        let spi = d.release();
        assert_eq!(spi.count, 3);
        assert_eq!(spi.frame(1), &[reg::STREAM_SAMPLE, 0x40]);
    }

    // ── Errors ────────────────────────────────────────────────────────

    #[test]
    fn bus_error_propagates() {
        let mut spi = MockSpi::new();
        spi.fail = true;
        let mut d = SynthDriver::new(spi);
        assert!(d.set_volume(1).is_err());
        assert!(d.stream_samples(&[1, 2, 3]).is_err());
    }

    // ── SynthControl trait ────────────────────────────────────────────

    #[test]
    fn synth_control_delegation() {
        let mut d = make_driver();
        SynthControl::enable(&mut d).unwrap();
        assert!(d.control().contains(Control::OSC_EN));

        SynthControl::gate(&mut d, true).unwrap();
        assert!(d.control().contains(Control::SW_GATE));

        SynthControl::volume(&mut d, 1.0).unwrap();
        SynthControl::disable(&mut d).unwrap();
        assert_eq!(d.control(), Control::SW_GATE);

        let spi = d.release();
        assert_eq!(spi.frame(2), &[reg::VOLUME, 0xFF]);
    }

    #[test]
    fn unit_to_byte_boundaries() {
        assert_eq!(unit_to_byte(0.0), 0);
        assert_eq!(unit_to_byte(-1.0), 0);
        assert_eq!(unit_to_byte(f32::NAN), 0);
        assert_eq!(unit_to_byte(1.0), 0xFF);
        // 0.5 * 255 + 0.5 = 128.0
        assert_eq!(unit_to_byte(0.5), 0x80);
    }
}
