//! Observation sampling strategies
//!
//! The optimizer variants differ only in which observation indices feed
//! each iteration's gradient estimate. That choice is captured by
//! [`Sampling`] and executed by the crate-private [`Sampler`]:
//!
//! | Strategy                     | Indices per draw        | Gradient character         |
//! |------------------------------|-------------------------|----------------------------|
//! | [`Sampling::FullBatch`]      | all `N`, fixed order    | exact, expensive           |
//! | [`Sampling::SingleObservation`] | 1, uniformly random  | noisy, cheapest            |
//! | [`Sampling::MiniBatch`]      | up to `batch_size`      | intermediate               |
//!
//! Mini-batch sampling is epoch based: the index pool is shuffled, then
//! consumed in consecutive slices until exhausted, at which point the
//! pool is reshuffled and a new epoch begins. Every observation is
//! therefore visited exactly once per epoch, and the final slice of an
//! epoch may be shorter than `batch_size` when `batch_size` does not
//! divide `N`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

// =================================================================================================
// Sampling Strategy
// =================================================================================================

/// Which observations feed each iteration's gradient estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Every observation, every iteration, in storage order
    FullBatch,

    /// One uniformly random observation per iteration
    SingleObservation,

    /// Consecutive slices of a shuffled index pool, reshuffled each epoch
    MiniBatch {
        /// Maximum indices per draw; the last draw of an epoch may be shorter
        batch_size: usize,
    },
}

// =================================================================================================
// Sampler
// =================================================================================================

/// Executes a [`Sampling`] strategy over `0..n`.
///
/// Owns the index pool so that repeated draws allocate nothing. The
/// same seeded RNG replays the same sequence of draws.
pub(crate) struct Sampler {
    kind: Sampling,
    all: Vec<usize>,
    single: [usize; 1],
    cursor: usize,
}

impl Sampler {
    /// Sampler over the index range `0..n`.
    ///
    /// The cursor starts past the end of the pool so the first
    /// mini-batch draw begins a fresh epoch with a fresh shuffle.
    pub(crate) fn new(kind: Sampling, n: usize) -> Self {
        Self {
            kind,
            all: (0..n).collect(),
            single: [0],
            cursor: n,
        }
    }

    /// Indices for the next iteration
    pub(crate) fn draw(&mut self, rng: &mut StdRng) -> &[usize] {
        let n = self.all.len();
        match self.kind {
            Sampling::FullBatch => &self.all,
            Sampling::SingleObservation => {
                self.single[0] = rng.random_range(0..n);
                &self.single
            }
            Sampling::MiniBatch { batch_size } => {
                if self.cursor >= n {
                    self.all.shuffle(rng);
                    self.cursor = 0;
                }
                let end = usize::min(n, self.cursor + batch_size);
                let slice = &self.all[self.cursor..end];
                self.cursor = end;
                slice
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
