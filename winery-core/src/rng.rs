//! Injectable RNG.
//!
//! Per spec.md §9, random draws (candidate generation, lender offer
//! sampling, vineyard sampling, loan parameter sampling) must flow through
//! an injectable RNG rather than a process-global source, so tests stay
//! deterministic. Wraps `StdRng` the way the teacher wraps `rand::rng()`
//! calls in `world.rs`'s mortality phase, but threaded as a value instead
//! of reached for globally.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct EngineRng(StdRng);

impl EngineRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn gen_range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        self.0.random_range(lo..hi)
    }

    pub fn gen_range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        self.0.random_range(lo..hi)
    }

    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.random_bool(p)
    }

    /// Derives an independent child RNG. Used to hand out RNG state to
    /// weekly subsystems that run concurrently under `tokio::join!` and
    /// therefore cannot share one `&mut EngineRng` (spec.md §5: weekly
    /// subsystems have no mutual data dependency).
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.0.random())
    }

    /// Pick `count` indices out of `len` without replacement, used by the
    /// staff/lender/land search handlers to sample from a candidate pool.
    pub fn choose_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        let mut chosen = Vec::with_capacity(count);
        for _ in 0..count {
            if indices.is_empty() {
                break;
            }
            let pick = self.0.random_range(0..indices.len());
            chosen.push(indices.remove(pick));
        }
        chosen
    }
}
