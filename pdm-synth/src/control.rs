/// High-level control surface shared by synthesizer front-ends.
///
/// Implemented by [`SynthDriver`](crate::driver::SynthDriver) for any SPI bus.
pub trait SynthControl {
    /// Error raised by the underlying transport.
    type Error;

    /// Turn the oscillator on. Other control bits are left as they are, so
    /// an active streaming mode keeps priority.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Silence the output, leaving frequency/duty/volume untouched.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Set the output level (0.0 = silent, 1.0 = full scale). Out-of-range values are clamped.
    fn volume(&mut self, level: f32) -> Result<(), Self::Error>;

    /// Drive the software gate bit.
    fn gate(&mut self, on: bool) -> Result<(), Self::Error>;
}
