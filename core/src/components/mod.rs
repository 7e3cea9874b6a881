pub mod balancer;
pub mod emitter;
pub mod queue;
pub mod receiver;
pub mod server;

pub use balancer::{Balancer, BalancingStrategy, RandomChoice, RoundRobinChoice};
pub use emitter::Emitter;
pub use queue::Queue;
pub use receiver::Receiver;
pub use server::{Server, ServerState};
