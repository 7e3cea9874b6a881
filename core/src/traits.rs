use crate::network::Destination;

/// Virtual time, in whatever unit the scenario chooses.
pub type SimTime = f64;

pub type NodeId = u32;

/// A sampling policy for intervals and service times.
pub trait Distribution {
    fn sample(&self) -> f64;
}

/// Picks which of a balancer's destinations receives the next push.
///
/// `destinations` is never empty; the balancer rejects the push before
/// asking. An index out of bounds fails the push.
pub trait ChoiceStrategy {
    fn choose(&mut self, destinations: &[Destination]) -> usize;
}

impl<D: Distribution + ?Sized> Distribution for Box<D> {
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}

impl<C: ChoiceStrategy + ?Sized> ChoiceStrategy for Box<C> {
    fn choose(&mut self, destinations: &[Destination]) -> usize {
        (**self).choose(destinations)
    }
}
