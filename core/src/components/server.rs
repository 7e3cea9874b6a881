use crate::network::{Destination, QueueId};
use crate::traits::{Distribution, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Registered as a listener on the source queue.
    Idle,
    /// One item in flight with its completion scheduled.
    Busy,
}

/// Pull-based single-concurrency consumer.
///
/// The server never holds a backlog of its own: excess arrivals wait in the
/// source queue and are pulled one at a time.
pub struct Server {
    pub id: NodeId,
    service: Box<dyn Distribution>,
    source: Option<QueueId>,
    next_hop: Option<Destination>,
    state: ServerState,
    served: u64,
}

impl Server {
    pub fn new(id: NodeId, service: Box<dyn Distribution>) -> Self {
        Self {
            id,
            service,
            source: None,
            next_hop: None,
            state: ServerState::Idle,
            served: 0,
        }
    }

    pub fn service_time(&self) -> f64 {
        self.service.sample()
    }

    pub fn connect_to(&mut self, next_hop: Destination) {
        self.next_hop = Some(next_hop);
    }

    pub(crate) fn set_source(&mut self, source: QueueId) {
        self.source = Some(source);
    }

    pub(crate) fn set_state(&mut self, state: ServerState) {
        self.state = state;
    }

    /// Counts a completed item and returns where it goes.
    pub(crate) fn complete(&mut self) -> Option<Destination> {
        self.served += 1;
        self.next_hop
    }

    pub fn source(&self) -> Option<QueueId> {
        self.source
    }

    pub fn next_hop(&self) -> Option<Destination> {
        self.next_hop
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    pub fn served(&self) -> u64 {
        self.served
    }
}
