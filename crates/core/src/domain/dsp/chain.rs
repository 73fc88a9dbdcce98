//! Serial processor chain
//!
//! Processors run in the order they were added. Bypassed slots are skipped
//! with zero overhead.

use super::Processor;
use crate::domain::error::{DynamicsError, Result};
use tracing::debug;

struct Slot {
    processor: Box<dyn Processor>,
    bypassed: bool,
}

/// Runtime chain of processors
///
/// Holds the actual processor instances with their state. Build one from a
/// [`ChainPreset`](crate::domain::config::ChainPreset) or push processors
/// directly.
#[derive(Default)]
pub struct ProcessorChain {
    slots: Vec<Slot>,
}

impl ProcessorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a processor to the end of the chain
    pub fn push(&mut self, processor: Box<dyn Processor>) {
        debug!(name = processor.name(), index = self.slots.len(), "Processor added to chain");
        self.slots.push(Slot {
            processor,
            bypassed: false,
        });
    }

    /// Process audio through every active processor in order
    pub fn process(&mut self, buffer: &mut [f32]) {
        for slot in &mut self.slots {
            if !slot.bypassed {
                slot.processor.process(buffer);
            }
        }
    }

    /// Reset every processor in the chain
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.processor.reset();
        }
    }

    /// Set bypass state for a processor by index.
    ///
    /// A processor leaving bypass is reset so stale smoothing state from
    /// before the bypass does not leak into the signal.
    pub fn set_bypass(&mut self, index: usize, bypass: bool) -> Result<()> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(DynamicsError::IndexOutOfBounds { index, len })?;

        if slot.bypassed && !bypass {
            slot.processor.reset();
        }
        slot.bypassed = bypass;
        Ok(())
    }

    /// Bypass state of a processor, `None` if the index is out of range
    pub fn is_bypassed(&self, index: usize) -> Option<bool> {
        self.slots.get(index).map(|slot| slot.bypassed)
    }

    /// Names of the processors in chain order
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.processor.name()).collect()
    }

    /// Get the number of processors
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
