use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ElementRatio;

/// Build the shuffled label sequence for one generation run.
///
/// Counts are rounded per ratio; a rounding shortfall is padded with the
/// first element, a surplus is truncated from the tail. The returned plan
/// has exactly `num_atoms` labels whenever `ratios` is non-empty.
pub fn element_plan<R: Rng + ?Sized>(
    num_atoms: usize,
    ratios: &[ElementRatio],
    rng: &mut R,
) -> Vec<String> {
    let mut plan = Vec::with_capacity(num_atoms);
    for spec in ratios {
        let count = (num_atoms as f32 * spec.ratio).round() as usize;
        for _ in 0..count {
            plan.push(spec.element.clone());
        }
    }
    if let Some(first) = ratios.first() {
        while plan.len() < num_atoms {
            plan.push(first.element.clone());
        }
    }
    plan.truncate(num_atoms);
    plan.shuffle(rng);
    plan
}
