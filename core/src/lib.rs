//! Discrete-event simulation of queueing networks.
//!
//! Emitters generate arrivals, queues buffer them as backlog counts,
//! single-concurrency servers pull and serve them, balancers route them and
//! receivers absorb them. An [`Engine`] advances virtual time in fixed ticks
//! and samples every queue once per tick.

pub mod analytics;
pub mod components;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod logging;
pub mod network;
pub mod random;
pub mod scheduler;
pub mod traits;

pub use analytics::{SampleField, Sampler, SamplerSummary, Snapshot, Table};
pub use components::{
    Balancer, BalancingStrategy, Emitter, Queue, RandomChoice, Receiver, RoundRobinChoice, Server,
    ServerState,
};
pub use distribution::{Constant, DistributionConfig, Exponential, Normal, Uniform};
pub use engine::{Engine, EngineConfig};
pub use error::{Result, SimError};
pub use network::{Action, BalancerId, Destination, EmitterId, Network, Origin, QueueId, ReceiverId, ServerId};
pub use random::RandomSource;
pub use scheduler::{Scheduler, NEVER_EXPIRE};
pub use traits::{ChoiceStrategy, Distribution, NodeId, SimTime};
