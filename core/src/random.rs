use std::cell::RefCell;
use std::rc::Rc;

use rand::prelude::*;

/// Seedable uniform sample source.
///
/// Clones share one underlying stream: hand a clone to every distribution
/// and choice strategy of a topology and a single seed reproduces the
/// whole run.
#[derive(Clone)]
pub struct RandomSource {
    rng: Rc<RefCell<StdRng>>,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Rc::new(RefCell::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Rc::new(RefCell::new(StdRng::from_entropy())),
        }
    }

    /// Uniform sample in `[0, 1)`.
    pub fn sample(&self) -> f64 {
        self.rng.borrow_mut().gen::<f64>()
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&self, len: usize) -> usize {
        self.rng.borrow_mut().gen_range(0..len)
    }

    /// Restarts the shared stream; every clone observes the new sequence.
    pub fn reseed(&self, seed: u64) {
        *self.rng.borrow_mut() = StdRng::seed_from_u64(seed);
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}
