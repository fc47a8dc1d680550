//! Serial register interface.
//!
//! ## Protocol
//!
//! Mode 0 (data sampled on SCK rising edges), MSB first, chip-select active
//! low:
//!
//! 1. CS_N falls: frame starts.
//! 2. First byte: register address.
//! 3. Each further byte: data for the current address, then address += 1.
//! 4. CS_N rises: frame ends, a partial byte is dropped.
//!
//! Completed writes cross into the system clock domain through a
//! [`WriteSynchronizer`].

pub mod framer;
pub mod sync;

#[cfg(feature = "hal")]
pub mod spi;

pub use framer::{BusLines, FrameState, SerialFramer};
pub use sync::WriteSynchronizer;

#[cfg(feature = "hal")]
pub use spi::{SimulatedSpi, SpiTiming};
