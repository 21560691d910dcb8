use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Default placement attempt budget per requested atom.
pub const DEFAULT_ATTEMPTS_PER_ATOM: usize = 1000;

/// Random close packing of equal spheres. Requests implying a higher packing
/// fraction cannot terminate and are rejected up front.
const MAX_PACKING_FRACTION: f32 = 0.64;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenConfig {
    pub num_atoms: usize,
    /// Target number density in atoms per cubic unit.
    pub density: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    /// Element mixture in declaration order; rounding shortfall is padded
    /// onto the first entry.
    pub elements: Vec<ElementRatio>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_attempts: Option<usize>,
    /// Latch the sparse-bin fallback once placement stalls.
    #[serde(default)]
    pub assist: bool,
    /// Path for a per-placement trajectory file, if wanted.
    #[serde(default)]
    pub trajectory: Option<String>,
    /// Path for the data file written by the CLI.
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementRatio {
    pub element: String,
    pub ratio: f32,
}

fn default_min_distance() -> f32 {
    1.0
}

impl GenConfig {
    /// Cell edge implied by the requested count and density.
    pub fn box_edge(&self) -> f32 {
        (self.num_atoms as f32 / self.density).cbrt()
    }

    pub fn attempt_budget(&self) -> usize {
        self.max_attempts
            .unwrap_or(self.num_atoms * DEFAULT_ATTEMPTS_PER_ATOM)
    }

    pub fn normalized(&self) -> GenResult<GenConfig> {
        let mut cfg = self.clone();
        cfg.validate()?;
        if cfg.max_attempts.is_none() {
            cfg.max_attempts = Some(cfg.num_atoms * DEFAULT_ATTEMPTS_PER_ATOM);
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.num_atoms == 0 {
            return Err(GenError::Invalid("num_atoms must be positive".into()));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(GenError::Invalid("density must be positive".into()));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(GenError::Invalid(
                "min_distance must be non-negative".into(),
            ));
        }
        if self.elements.is_empty() {
            return Err(GenError::Invalid("elements list is empty".into()));
        }
        for spec in &self.elements {
            if spec.element.is_empty() {
                return Err(GenError::Invalid("element label is empty".into()));
            }
            if !spec.ratio.is_finite() || spec.ratio <= 0.0 {
                return Err(GenError::Invalid(format!(
                    "ratio for element {} must be positive",
                    spec.element
                )));
            }
        }
        let packing = self.packing_fraction();
        if packing > MAX_PACKING_FRACTION {
            return Err(GenError::Invalid(format!(
                "min_distance {} at density {} implies packing fraction {:.3}, beyond the {:.2} feasibility bound",
                self.min_distance, self.density, packing, MAX_PACKING_FRACTION
            )));
        }
        Ok(())
    }

    /// Volume fraction occupied by non-overlapping spheres of diameter
    /// `min_distance` at the target density.
    pub fn packing_fraction(&self) -> f32 {
        let d = self.min_distance;
        self.density * std::f32::consts::PI / 6.0 * d * d * d
    }
}
