//! Clock-domain crossing for completed serial writes.
//!
//! Bytes complete on bus-clock edges, which are asynchronous to the system
//! clock. In `TwoStage` mode a completed write is shifted through two latch
//! stages, one per system clock, before it is released to the register file.

use crate::config::WriteSync;
use crate::registers::RegisterWrite;

/// Pending-write latch between the bus and the register file.
#[derive(Debug, Clone)]
pub struct WriteSynchronizer {
    mode: WriteSync,
    stages: [Option<RegisterWrite>; 2],
}

impl WriteSynchronizer {
    pub const fn new(mode: WriteSync) -> Self {
        WriteSynchronizer {
            mode,
            stages: [None, None],
        }
    }

    pub fn mode(&self) -> WriteSync {
        self.mode
    }

    /// Drop any writes in flight.
    pub fn reset(&mut self) {
        self.stages = [None, None];
    }

    /// True while a write is latched but not yet released.
    pub fn is_pending(&self) -> bool {
        self.stages.iter().any(Option::is_some)
    }

    /// Advance one system clock, latching `incoming` and releasing the
    /// write (if any) that has cleared the last stage.
    pub fn clock(&mut self, incoming: Option<RegisterWrite>) -> Option<RegisterWrite> {
        match self.mode {
            WriteSync::Immediate => incoming,
            WriteSync::TwoStage => {
                let released = self.stages[1].take();
                self.stages[1] = self.stages[0].take();
                self.stages[0] = incoming;
                released
            }
        }
    }
}
