//! Actor arena and the push / notify / pull protocol between actors.
//!
//! Actors never hold references to each other. They hold typed handles into
//! the [`Network`] arena, and every interaction is routed through it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::components::{Balancer, Emitter, Queue, Receiver, Server, ServerState};
use crate::error::{Result, SimError};
use crate::scheduler::Scheduler;
use crate::traits::{ChoiceStrategy, Distribution, NodeId};

macro_rules! node_handles {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
            pub struct $name(pub(crate) NodeId);

            impl $name {
                pub fn id(self) -> NodeId {
                    self.0
                }
            }
        )*
    };
}

node_handles!(EmitterId, QueueId, ServerId, BalancerId, ReceiverId);

/// Anything that accepts a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Queue(QueueId),
    Balancer(BalancerId),
    Receiver(ReceiverId),
}

/// Anything that pushes onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Emitter(EmitterId),
    Server(ServerId),
    Balancer(BalancerId),
}

macro_rules! enum_from {
    ($enum:ident { $($variant:ident($ty:ty)),* $(,)? }) => {
        $(
            impl From<$ty> for $enum {
                fn from(id: $ty) -> Self {
                    $enum::$variant(id)
                }
            }
        )*
    };
}

enum_from!(Destination { Queue(QueueId), Balancer(BalancerId), Receiver(ReceiverId) });
enum_from!(Origin { Emitter(EmitterId), Server(ServerId), Balancer(BalancerId) });

/// Scheduler payload: what happens when an item fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Emit(EmitterId),
    Complete(ServerId),
}

enum Node {
    Emitter(Emitter),
    Queue(Queue),
    Server(Server),
    Balancer(Balancer),
    Receiver(Receiver),
}

macro_rules! accessors {
    ($($get:ident, $get_mut:ident: $variant:ident($ty:ty) by $handle:ty;)*) => {
        $(
            pub fn $get(&self, handle: $handle) -> Result<&$ty> {
                match self.nodes.get(handle.0 as usize) {
                    Some(Node::$variant(node)) => Ok(node),
                    _ => Err(SimError::UnknownNode { id: handle.0 }),
                }
            }

            pub fn $get_mut(&mut self, handle: $handle) -> Result<&mut $ty> {
                match self.nodes.get_mut(handle.0 as usize) {
                    Some(Node::$variant(node)) => Ok(node),
                    _ => Err(SimError::UnknownNode { id: handle.0 }),
                }
            }
        )*
    };
}

/// Arena of every actor in a topology.
#[derive(Default)]
pub struct Network {
    nodes: Vec<Node>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> NodeId {
        self.nodes.len() as NodeId
    }

    pub fn add_emitter(&mut self, interval: Box<dyn Distribution>) -> EmitterId {
        let id = self.next_id();
        self.nodes.push(Node::Emitter(Emitter::new(id, interval)));
        EmitterId(id)
    }

    pub fn add_queue(&mut self) -> QueueId {
        let id = self.next_id();
        self.nodes.push(Node::Queue(Queue::new(id)));
        QueueId(id)
    }

    pub fn add_server(&mut self, service: Box<dyn Distribution>) -> ServerId {
        let id = self.next_id();
        self.nodes.push(Node::Server(Server::new(id, service)));
        ServerId(id)
    }

    pub fn add_balancer(&mut self, choice: Box<dyn ChoiceStrategy>) -> BalancerId {
        let id = self.next_id();
        self.nodes.push(Node::Balancer(Balancer::new(id, choice)));
        BalancerId(id)
    }

    pub fn add_receiver(&mut self) -> ReceiverId {
        let id = self.next_id();
        self.nodes.push(Node::Receiver(Receiver::new(id)));
        ReceiverId(id)
    }

    accessors! {
        emitter, emitter_mut: Emitter(Emitter) by EmitterId;
        queue, queue_mut: Queue(Queue) by QueueId;
        server, server_mut: Server(Server) by ServerId;
        balancer, balancer_mut: Balancer(Balancer) by BalancerId;
        receiver, receiver_mut: Receiver(Receiver) by ReceiverId;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn connect_to(&mut self, from: Origin, to: Destination) -> Result<()> {
        self.check(to)?;
        if let (Origin::Balancer(b), Destination::Balancer(next)) = (from, to) {
            if self.routes_to(next, b)? {
                return Err(SimError::RoutingCycle { from: b.0, to: next.0 });
            }
        }
        match from {
            Origin::Emitter(e) => self.emitter_mut(e)?.connect_to(to),
            Origin::Server(s) => self.server_mut(s)?.connect_to(to),
            Origin::Balancer(b) => self.balancer_mut(b)?.connect_to(to),
        }
        debug!(?from, ?to, "connected");
        Ok(())
    }

    /// Wires `server` to pull from `queue`. The queue must be empty; the
    /// server starts IDLE, listening on it.
    pub fn connect_from(&mut self, server: ServerId, queue: QueueId) -> Result<()> {
        let nwait = self.queue(queue)?.nwait();
        if nwait != 0 {
            return Err(SimError::QueueNotEmpty { queue: queue.0, nwait });
        }
        let srv = self.server_mut(server)?;
        if srv.source().is_some() {
            return Err(SimError::AlreadyConnected { server: server.0 });
        }
        srv.set_source(queue);
        srv.set_state(ServerState::Idle);
        self.queue_mut(queue)?.listen(server);
        debug!(?server, ?queue, "server listening");
        Ok(())
    }

    fn check(&self, to: Destination) -> Result<()> {
        match to {
            Destination::Queue(q) => self.queue(q).map(|_| ()),
            Destination::Balancer(b) => self.balancer(b).map(|_| ()),
            Destination::Receiver(r) => self.receiver(r).map(|_| ()),
        }
    }

    /// Whether a push into `start` can reach balancer `goal` through
    /// balancer-to-balancer edges alone.
    fn routes_to(&self, start: BalancerId, goal: BalancerId) -> Result<bool> {
        let mut pending = vec![start];
        let mut seen = Vec::new();
        while let Some(b) = pending.pop() {
            if b == goal {
                return Ok(true);
            }
            if seen.contains(&b) {
                continue;
            }
            seen.push(b);
            for target in self.balancer(b)?.targets() {
                if let Destination::Balancer(next) = *target {
                    pending.push(next);
                }
            }
        }
        Ok(false)
    }

    pub fn push(&mut self, sched: &mut Scheduler<Action>, target: Destination) -> Result<()> {
        match target {
            Destination::Queue(q) => {
                let listeners = self.queue_mut(q)?.push();
                for listener in listeners {
                    self.pull(sched, listener)?;
                }
            }
            Destination::Balancer(b) => {
                let next = self.balancer_mut(b)?.route()?;
                self.push(sched, next)?;
            }
            Destination::Receiver(r) => self.receiver_mut(r)?.push(),
        }
        Ok(())
    }

    /// Takes one unit from the server's source if there is one and starts
    /// serving it, otherwise goes back to listening.
    fn pull(&mut self, sched: &mut Scheduler<Action>, server: ServerId) -> Result<()> {
        let Some(source) = self.server(server)?.source() else {
            return Ok(());
        };
        let queue = self.queue_mut(source)?;
        if queue.is_empty() {
            queue.listen(server);
            self.server_mut(server)?.set_state(ServerState::Idle);
            trace!(?server, time = sched.time(), "idle");
            return Ok(());
        }

        queue.pop()?;
        let srv = self.server_mut(server)?;
        srv.set_state(ServerState::Busy);
        let delay = srv.service_time();
        sched.after(delay, Action::Complete(server))?;
        trace!(?server, time = sched.time(), delay, "busy");
        Ok(())
    }

    pub fn fire(&mut self, sched: &mut Scheduler<Action>, action: Action) -> Result<()> {
        match action {
            Action::Emit(e) => {
                if let Some(target) = self.emitter_mut(e)?.emit() {
                    self.push(sched, target)?;
                }
                let delay = self.emitter(e)?.next_interval();
                sched.after(delay, Action::Emit(e))
            }
            Action::Complete(s) => {
                let next = self
                    .server_mut(s)?
                    .complete()
                    .ok_or(SimError::ServerUnconnected { server: s.0 })?;
                self.push(sched, next)?;
                self.pull(sched, s)
            }
        }
    }
}
