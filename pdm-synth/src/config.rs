//! Runtime configuration for the synthesizer model.
//!
//! The defaults reproduce the canonical behaviour: continuous volume scaling
//! and a two-stage synchronizer between the serial bus and the system clock.

/// How the volume register attenuates the selected amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeMode {
    /// `amplitude * volume / 255`, 256 distinct levels.
    #[default]
    Linear,
    /// Eight power-of-two steps selected by `volume[7:5]`.
    Stepped,
}

/// When a completed serial write becomes visible to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteSync {
    /// Apply at the end of the system clock in which the byte completed.
    Immediate,
    /// Pass through two latch stages before reaching the register file.
    #[default]
    TwoStage,
}

/// Synthesizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynthConfig {
    pub volume_mode: VolumeMode,
    pub write_sync: WriteSync,
}

impl SynthConfig {
    /// Canonical configuration (linear volume, two-stage synchronizer).
    pub const fn new() -> Self {
        SynthConfig {
            volume_mode: VolumeMode::Linear,
            write_sync: WriteSync::TwoStage,
        }
    }

    pub const fn with_volume_mode(mut self, mode: VolumeMode) -> Self {
        self.volume_mode = mode;
        self
    }

    pub const fn with_write_sync(mut self, sync: WriteSync) -> Self {
        self.write_sync = sync;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_new() {
        assert_eq!(SynthConfig::default(), SynthConfig::new());
        assert_eq!(SynthConfig::new().volume_mode, VolumeMode::Linear);
        assert_eq!(SynthConfig::new().write_sync, WriteSync::TwoStage);
    }

    #[test]
    fn builders_override_fields() {
        let cfg = SynthConfig::new()
            .with_volume_mode(VolumeMode::Stepped)
            .with_write_sync(WriteSync::Immediate);
        assert_eq!(cfg.volume_mode, VolumeMode::Stepped);
        assert_eq!(cfg.write_sync, WriteSync::Immediate);
    }
}
