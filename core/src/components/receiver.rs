use crate::traits::NodeId;

/// Terminal sink. Absorbs every push.
#[derive(Debug, Default)]
pub struct Receiver {
    pub id: NodeId,
    received: u64,
}

impl Receiver {
    pub fn new(id: NodeId) -> Self {
        Self { id, received: 0 }
    }

    pub fn push(&mut self) {
        self.received += 1;
    }

    pub fn received(&self) -> u64 {
        self.received
    }
}
