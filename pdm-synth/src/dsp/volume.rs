//! Volume attenuation.
//!
//! Both modes hold the same guarantees: volume 0x00 silences any amplitude,
//! volume 0xFF passes it unchanged, and output never decreases as volume
//! increases.

use crate::config::VolumeMode;

/// Scales the selected amplitude by the volume register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeScaler {
    mode: VolumeMode,
}

impl VolumeScaler {
    pub const fn new(mode: VolumeMode) -> Self {
        VolumeScaler { mode }
    }

    pub fn mode(&self) -> VolumeMode {
        self.mode
    }

    pub fn scale(&self, amplitude: u8, volume: u8) -> u8 {
        match self.mode {
            VolumeMode::Linear => scale_linear(amplitude, volume),
            VolumeMode::Stepped => scale_stepped(amplitude, volume),
        }
    }
}

/// `amplitude * volume / 255`, truncating.
#[inline]
pub fn scale_linear(amplitude: u8, volume: u8) -> u8 {
    (u16::from(amplitude) * u16::from(volume) / 255) as u8
}

/// Eight steps from `volume[7:5]`: step 0 mutes, step n shifts right by `7 - n`.
#[inline]
pub fn scale_stepped(amplitude: u8, volume: u8) -> u8 {
    let step = volume >> 5;
    if step == 0 {
        0
    } else {
        amplitude >> (7 - step)
    }
}
