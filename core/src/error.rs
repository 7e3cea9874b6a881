//! Error types for the simulation engine.
//!
//! Every variant except [`SimError::Config`] and [`SimError::Histogram`] is a
//! precondition violation: malformed wiring or misuse of the engine, never an
//! environmental fault. They are fatal for the run that raised them.

use thiserror::Error;

use crate::traits::{NodeId, SimTime};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot schedule at {at}: virtual time is already {now}")]
    ScheduleInPast { at: SimTime, now: SimTime },

    #[error("cannot move the clock backward from {from} to {to}")]
    BackwardAdvance { from: SimTime, to: SimTime },

    #[error("pop on empty queue {queue}")]
    EmptyQueue { queue: NodeId },

    #[error("balancer {balancer} has no destinations")]
    NoDestination { balancer: NodeId },

    #[error("balancer {balancer} chose destination {index} of {len}")]
    ChoiceOutOfRange { balancer: NodeId, index: usize, len: usize },

    #[error("routing balancer {from} to balancer {to} closes a cycle")]
    RoutingCycle { from: NodeId, to: NodeId },

    #[error("server can only be wired to an empty queue ({queue} holds {nwait})")]
    QueueNotEmpty { queue: NodeId, nwait: u64 },

    #[error("server {server} already has a source queue")]
    AlreadyConnected { server: NodeId },

    #[error("server {server} finished an item but has no destination")]
    ServerUnconnected { server: NodeId },

    #[error("no actor with id {id} in this network")]
    UnknownNode { id: NodeId },

    #[error("engine can run only once")]
    AlreadyRun,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("histogram: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),
}

pub type Result<T> = std::result::Result<T, SimError>;
