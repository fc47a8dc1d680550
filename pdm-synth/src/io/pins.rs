//! External pin bundle, gate logic and output driver.
//!
//! | Pin | Bit | Direction | Meaning |
//! |-----|-----|-----------|---------|
//! | `ui_in` | 0 | in | hardware gate |
//! | `ui_in` | 1 | in | hardware reset, active low |
//! | `uio_in` | 0..=2 | in | MOSI, SCK, CS_N |
//! | `uo_out` | 0 | out | DAC bit |
//! | `uo_out` | 1 | out | gate / LED |
//! | `uo_out` | 2 | out | oscillator running |

use bitflags::bitflags;

use crate::bus::BusLines;

/// Hardware gate input, `ui_in[0]`.
pub const UI_HW_GATE: u8 = 1 << 0;

/// Hardware reset input, `ui_in[1]`, active low.
pub const UI_HW_RESET_N: u8 = 1 << 1;

/// Sampled input pins for one system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinInputs {
    pub ui_in: u8,
    pub uio_in: u8,
    /// Module enable. Outputs are forced low while this is false.
    pub ena: bool,
    /// Asynchronous reset, active low.
    pub rst_n: bool,
}

impl PinInputs {
    /// Running, not in reset, gate low, bus idle.
    pub const IDLE: PinInputs = PinInputs {
        ui_in: UI_HW_RESET_N,
        uio_in: BusLines::IDLE.to_uio(),
        ena: true,
        rst_n: true,
    };

    pub const fn hw_gate(&self) -> bool {
        self.ui_in & UI_HW_GATE != 0
    }

    /// True when either reset input is asserted.
    pub const fn in_reset(&self) -> bool {
        !self.rst_n || self.ui_in & UI_HW_RESET_N == 0
    }

    pub const fn bus(&self) -> BusLines {
        BusLines::from_uio(self.uio_in)
    }

    pub const fn with_bus(mut self, lines: BusLines) -> Self {
        self.uio_in = (self.uio_in & !0x07) | lines.to_uio();
        self
    }

    pub const fn with_ui_in(mut self, ui_in: u8) -> Self {
        self.ui_in = ui_in;
        self
    }

    pub const fn with_ena(mut self, ena: bool) -> Self {
        self.ena = ena;
        self
    }

    pub const fn with_rst_n(mut self, rst_n: bool) -> Self {
        self.rst_n = rst_n;
        self
    }

    pub const fn with_hw_gate(mut self, on: bool) -> Self {
        if on {
            self.ui_in |= UI_HW_GATE;
        } else {
            self.ui_in &= !UI_HW_GATE;
        }
        self
    }
}

impl Default for PinInputs {
    fn default() -> Self {
        Self::IDLE
    }
}

bitflags! {
    /// Output pin byte `uo_out`. Bits 3..=7 are always 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OutputPins: u8 {
        const DAC = 1 << 0;
        const GATE = 1 << 1;
        const OSC_RUN = 1 << 2;
    }
}

impl OutputPins {
    pub const fn dac(self) -> bool {
        self.contains(OutputPins::DAC)
    }

    pub const fn gate(self) -> bool {
        self.contains(OutputPins::GATE)
    }

    pub const fn osc_run(self) -> bool {
        self.contains(OutputPins::OSC_RUN)
    }
}

/// Gate / LED: hardware gate OR software gate.
#[inline]
pub const fn gate(hw_gate: bool, sw_gate: bool) -> bool {
    hw_gate || sw_gate
}

/// Internal signals presented to the output driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoreSignals {
    pub dac: bool,
    pub gate: bool,
    pub osc_run: bool,
}

/// Maps internal signals onto `uo_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputDriver;

impl OutputDriver {
    pub const fn new() -> Self {
        OutputDriver
    }

    /// Drive the pins. `ena == false` overrides every signal to 0.
    pub fn drive(&self, ena: bool, signals: CoreSignals) -> OutputPins {
        if !ena {
            return OutputPins::empty();
        }
        let mut pins = OutputPins::empty();
        pins.set(OutputPins::DAC, signals.dac);
        pins.set(OutputPins::GATE, signals.gate);
        pins.set(OutputPins::OSC_RUN, signals.osc_run);
        pins
    }
}
