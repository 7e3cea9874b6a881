use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::network::Destination;
use crate::random::RandomSource;
use crate::traits::{ChoiceStrategy, NodeId};

/// Config-side name of a built-in choice strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BalancingStrategy {
    RoundRobin,
    Random,
}

impl BalancingStrategy {
    pub fn build(self, random: &RandomSource) -> Box<dyn ChoiceStrategy> {
        match self {
            Self::RoundRobin => Box::new(RoundRobinChoice::new()),
            Self::Random => Box::new(RandomChoice::new(random)),
        }
    }
}

/// Cycles through destinations in connection order, starting at the first.
#[derive(Debug, Default)]
pub struct RoundRobinChoice {
    next_rr_idx: usize,
}

impl RoundRobinChoice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChoiceStrategy for RoundRobinChoice {
    fn choose(&mut self, destinations: &[Destination]) -> usize {
        let idx = self.next_rr_idx % destinations.len();
        self.next_rr_idx = (idx + 1) % destinations.len();
        idx
    }
}

/// Uniform pick over destinations.
#[derive(Debug)]
pub struct RandomChoice {
    random: RandomSource,
}

impl RandomChoice {
    pub fn new(random: &RandomSource) -> Self {
        Self { random: random.clone() }
    }
}

impl ChoiceStrategy for RandomChoice {
    fn choose(&mut self, destinations: &[Destination]) -> usize {
        self.random.index(destinations.len())
    }
}

/// Routes each push to one of its destinations.
pub struct Balancer {
    pub id: NodeId,
    targets: Vec<Destination>,
    choice: Box<dyn ChoiceStrategy>,
}

impl Balancer {
    pub fn new(id: NodeId, choice: Box<dyn ChoiceStrategy>) -> Self {
        Self {
            id,
            targets: Vec::new(),
            choice,
        }
    }

    pub fn connect_to(&mut self, target: Destination) {
        self.targets.push(target);
    }

    pub fn route(&mut self) -> Result<Destination> {
        if self.targets.is_empty() {
            return Err(SimError::NoDestination { balancer: self.id });
        }
        let index = self.choice.choose(&self.targets);
        self.targets
            .get(index)
            .copied()
            .ok_or(SimError::ChoiceOutOfRange {
                balancer: self.id,
                index,
                len: self.targets.len(),
            })
    }

    pub fn targets(&self) -> &[Destination] {
        &self.targets
    }
}
