use crate::network::Destination;
use crate::traits::{Distribution, NodeId};

/// Arrival generator. Fires after each sampled interval, pushes to its
/// destination if it has one and reschedules itself.
pub struct Emitter {
    pub id: NodeId,
    interval: Box<dyn Distribution>,
    target: Option<Destination>,
    emitted: u64,
}

impl Emitter {
    pub fn new(id: NodeId, interval: Box<dyn Distribution>) -> Self {
        Self {
            id,
            interval,
            target: None,
            emitted: 0,
        }
    }

    pub fn next_interval(&self) -> f64 {
        self.interval.sample()
    }

    pub fn connect_to(&mut self, target: Destination) {
        self.target = Some(target);
    }

    /// Records a firing and returns where it goes, `None` means dropped.
    pub fn emit(&mut self) -> Option<Destination> {
        self.emitted += 1;
        self.target
    }

    pub fn target(&self) -> Option<Destination> {
        self.target
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}
