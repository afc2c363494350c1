/// Shared pseudo-random source used by every range producer.
///
/// One `StdRng` sits behind a mutex so a handle can be cloned into any
/// number of producers and used from several threads. The lock only keeps
/// the engine state consistent: when threads share a source, the order in
/// which they draw from it is unspecified. Give each thread its own
/// `SharedRng` when per-thread reproducibility matters.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static GLOBAL: OnceLock<SharedRng> = OnceLock::new();

#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    /// The process-wide source, seeded from OS entropy on first use.
    pub fn global() -> Self {
        GLOBAL.get_or_init(Self::from_entropy).clone()
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A deterministic source, independent of the global one.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        // A panic while holding the lock cannot leave StdRng half-updated.
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }

    /// Draw one sample from `dist`, advancing the shared engine.
    pub fn sample<T, D: Distribution<T>>(&self, dist: &D) -> T {
        self.with(|rng| dist.sample(rng))
    }

    /// Whether both handles draw from the same engine.
    pub fn same_source(&self, other: &SharedRng) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}
