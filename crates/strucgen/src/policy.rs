use rand::Rng;

/// Probability of biasing an attempt toward the sparsest bins.
const SPARSE_BIAS: f32 = 0.7;

/// Attempts-per-placed-atom ratio beyond which the fallback latches.
const FALLBACK_RATIO: usize = 50;

/// Picks the target bin for each placement attempt.
///
/// Normally the selector favors under-occupied bins 70% of the time and
/// picks uniformly otherwise, which keeps coverage uniform in expectation
/// while steering attempts away from crowded regions. With assist enabled,
/// sustained placement difficulty latches a fallback mode that always picks
/// among the sparsest bins for the rest of the run.
pub struct BinSelector {
    assist: bool,
    engaged: bool,
}

impl BinSelector {
    pub fn new(assist: bool) -> Self {
        Self {
            assist,
            engaged: false,
        }
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    /// Latch the fallback once attempts outpace placements 50:1.
    /// Returns true on the transition; the latch never releases.
    pub fn note_progress(&mut self, attempts: usize, placed: usize) -> bool {
        if self.assist && !self.engaged && attempts > placed * FALLBACK_RATIO {
            self.engaged = true;
            return true;
        }
        false
    }

    pub fn select<R: Rng + ?Sized>(&self, counts: &[u32], rng: &mut R) -> usize {
        if self.engaged || rng.gen::<f32>() < SPARSE_BIAS {
            pick_sparsest(counts, rng)
        } else {
            rng.gen_range(0..counts.len())
        }
    }
}

/// Uniform pick among the bins tied for minimum occupancy.
fn pick_sparsest<R: Rng + ?Sized>(counts: &[u32], rng: &mut R) -> usize {
    let min = match counts.iter().copied().min() {
        Some(min) => min,
        None => return 0,
    };
    let ties = counts.iter().filter(|&&c| c == min).count();
    let pick = rng.gen_range(0..ties);
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == min)
        .nth(pick)
        .map(|(i, _)| i)
        .unwrap_or(0)
}
