//! Per-run execution context
//!
//! Everything mutable that an estimation run needs lives here instead
//! of in globals: the random-number generator driving the sampling
//! strategy and the progress sink receiving per-iteration reports.
//! Two runs with contexts seeded identically replay the same random
//! choices, which makes stochastic fits reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

// =================================================================================================
// Progress Observer
// =================================================================================================

/// Receiver for per-iteration progress reports.
///
/// The optimizer calls [`on_iteration`](ProgressObserver::on_iteration)
/// once per applied parameter update with the full-data loss of the new
/// iterate and the best full-data loss seen so far. Implementations may
/// print, record, forward to a UI, or do nothing.
pub trait ProgressObserver {
    /// Called after iteration `iteration` updated the parameters
    fn on_iteration(&mut self, iteration: usize, loss: f64, best_loss: f64);
}

/// Observer that discards all reports; the default for batch runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_iteration(&mut self, _iteration: usize, _loss: f64, _best_loss: f64) {}
}

// =================================================================================================
// Fit Context
// =================================================================================================

/// Mutable per-run state: RNG and progress sink.
///
/// A context belongs to exactly one run. Concurrent candidate runs
/// (e.g. an initial-value sweep) each construct their own context with
/// their own seed, so no run can disturb another's random sequence.
///
/// # Examples
///
/// ```rust
/// use kinfit_rs::optimize::FitContext;
///
/// // Reproducible: the same seed replays the same run
/// let ctx = FitContext::seeded(42);
///
/// // Non-reproducible: seeded from the operating system
/// let ctx = FitContext::from_os_rng();
/// ```
pub struct FitContext {
    /// Random-number generator for index sampling and shuffling
    pub rng: StdRng,

    /// Progress sink, called once per applied update
    pub progress: Box<dyn ProgressObserver>,
}

impl FitContext {
    /// Context with a deterministic RNG; identical seeds replay
    /// identical runs bit for bit
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            progress: Box::new(NoProgress),
        }
    }

    /// Context seeded from operating-system entropy
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            progress: Box::new(NoProgress),
        }
    }

    /// Replace the progress sink, builder style
    pub fn with_progress(mut self, progress: Box<dyn ProgressObserver>) -> Self {
        self.progress = progress;
        self
    }
}

impl std::fmt::Debug for FitContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitContext").field("rng", &self.rng).finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
