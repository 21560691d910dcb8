use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};

use strucgen_core::{PbcBox, PeriodicGrid, Vec3};

use crate::config::GenConfig;
use crate::distribution::element_plan;
use crate::error::{GenError, GenResult};
use crate::io::TrajectoryWriter;
use crate::policy::BinSelector;
use crate::streaming::{
    AtomPlacedEvent, FallbackEngagedEvent, GenerationCompleteEvent, GenerationStartedEvent,
    StreamEmitter,
};

/// A completed configuration: positions, the periodic cell, and a parallel
/// sequence of element labels.
#[derive(Clone, Debug)]
pub struct Structure {
    pub positions: Vec<Vec3>,
    pub box_size: [f32; 3],
    pub elements: Vec<String>,
    /// Placement attempts consumed by the run.
    pub attempts: usize,
    /// Seed the run was driven by; reusing it reproduces the structure.
    pub seed: u64,
}

pub fn generate(config: &GenConfig) -> GenResult<Structure> {
    generate_with_stream(config, StreamEmitter::disabled())
}

/// Grid-accelerated rejection sampling of a random structure.
///
/// Bins are sized to `min_distance * sqrt(3)` so any pair closer than the
/// minimum separation lands within one bin hop of each other, including
/// across the cube diagonal. Candidate bins come from the density-biased
/// selector; candidates are validated against neighbor-bin occupants with
/// the minimum-image metric.
pub fn generate_with_stream(config: &GenConfig, emitter: StreamEmitter) -> GenResult<Structure> {
    let cfg = config.normalized()?;
    let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let n = cfg.num_atoms;
    let edge = cfg.box_edge();
    let bounds = PbcBox::cube(edge)?;
    let box_size = bounds.length.to_array();

    let plan = element_plan(n, &cfg.elements, &mut rng);

    let cell = if cfg.min_distance > 0.0 {
        cfg.min_distance * 3.0f32.sqrt()
    } else {
        edge
    };
    let mut grid = PeriodicGrid::new(&bounds, cell, cfg.min_distance)?;

    let mut traj = match &cfg.trajectory {
        Some(path) => Some(TrajectoryWriter::create(path)?),
        None => None,
    };

    if emitter.is_enabled() {
        emitter.emit_generation_started(&GenerationStartedEvent {
            num_atoms: n,
            box_size,
            output_path: cfg.output.clone(),
        });
    }

    let started = Instant::now();
    let budget = cfg.attempt_budget();
    let min2 = cfg.min_distance * cfg.min_distance;

    let mut positions: Vec<Vec3> = Vec::with_capacity(n);
    let mut selector = BinSelector::new(cfg.assist);

    // The first atom seeds the grid without a distance check.
    let first = Vec3::new(
        rng.gen_range(0.0..edge),
        rng.gen_range(0.0..edge),
        rng.gen_range(0.0..edge),
    );
    let first_bin = grid.bin_of(first);
    positions.push(first);
    grid.insert(0, first_bin);
    if let Some(writer) = traj.as_mut() {
        writer.write_frame(&positions, &plan, box_size)?;
    }
    if emitter.is_enabled() {
        emitter.emit_atom_placed(&AtomPlacedEvent {
            atom_index: 0,
            total_atoms: n,
            element: plan[0].clone(),
        });
    }

    let mut attempts = 0usize;
    while positions.len() < n && attempts < budget {
        if selector.note_progress(attempts, positions.len()) && emitter.is_enabled() {
            emitter.emit_fallback_engaged(&FallbackEngagedEvent {
                attempts,
                placed: positions.len(),
            });
        }

        let target = selector.select(grid.counts(), &mut rng);
        let candidate = grid.sample_point_in_bin(target, &mut rng);
        // The candidate is drawn inside the target's extent, but membership
        // and the occupancy counter both key on the bin recomputed from the
        // final position so the two can never drift apart.
        let bin = grid.bin_of(candidate);

        let mut clash = false;
        grid.for_each_neighbor(bin, |idx| {
            if !clash && bounds.distance2(candidate, positions[idx]) < min2 {
                clash = true;
            }
        });

        if !clash {
            let idx = positions.len();
            positions.push(candidate);
            grid.insert(idx, bin);
            if let Some(writer) = traj.as_mut() {
                writer.write_frame(&positions, &plan, box_size)?;
            }
            if emitter.is_enabled() {
                emitter.emit_atom_placed(&AtomPlacedEvent {
                    atom_index: idx,
                    total_atoms: n,
                    element: plan[idx].clone(),
                });
            }
        }
        attempts += 1;
    }

    if positions.len() < n {
        let err = GenError::ExhaustedAttempts {
            placed: positions.len(),
            target: n,
            attempts,
        };
        if emitter.is_enabled() {
            emitter.emit_error("exhausted_attempts", &err.to_string());
        }
        return Err(err);
    }

    if emitter.is_enabled() {
        emitter.emit_generation_complete(&GenerationCompleteEvent {
            total_atoms: n,
            box_size,
            attempts,
            elapsed_ms: started.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
        });
    }

    Ok(Structure {
        positions,
        box_size,
        elements: plan,
        attempts,
        seed,
    })
}
