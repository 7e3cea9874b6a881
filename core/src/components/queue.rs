use crate::error::{Result, SimError};
use crate::network::ServerId;
use crate::traits::NodeId;

/// Counting buffer with a notify-on-demand protocol.
///
/// Holds no payload, only counters. Listeners are idle servers waiting for
/// the next push; each push hands the whole set out and starts a new one.
#[derive(Debug, Default)]
pub struct Queue {
    pub id: NodeId,
    nwait: u64,
    narrivals: u64,
    listeners: Vec<ServerId>,
}

impl Queue {
    pub fn new(id: NodeId) -> Self {
        Self { id, ..Default::default() }
    }

    /// Counts the arrival and returns the listeners to notify.
    ///
    /// The listener set is cleared before the caller notifies anyone, so a
    /// listener that re-registers from its handler stays registered.
    pub fn push(&mut self) -> Vec<ServerId> {
        self.narrivals += 1;
        self.nwait += 1;
        std::mem::take(&mut self.listeners)
    }

    pub fn pop(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(SimError::EmptyQueue { queue: self.id });
        }
        self.nwait -= 1;
        Ok(())
    }

    pub fn listen(&mut self, listener: ServerId) {
        self.listeners.push(listener);
    }

    pub fn nwait(&self) -> u64 {
        self.nwait
    }

    pub fn narrivals(&self) -> u64 {
        self.narrivals
    }

    pub fn listeners(&self) -> &[ServerId] {
        &self.listeners
    }

    pub fn is_empty(&self) -> bool {
        self.nwait == 0
    }
}
