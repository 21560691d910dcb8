//! Periodic linked-cell grid for minimum-distance neighbor queries.
//!
//! Bins are sized so that any clash partner of a candidate point sits within
//! the search reach of the candidate's own bin, even across the periodic
//! boundary. Storage is a dense flat array of intrusive linked lists plus a
//! per-bin occupancy counter used as the density-bias signal.

use rand::Rng;

use crate::error::{CoreError, CoreResult};
use crate::geom::Vec3;
use crate::pbc::PbcBox;

const END_OF_LIST: usize = usize::MAX;

/// Maximum number of bins before the grid refuses to allocate.
///
/// At roughly 3 words per bin this keeps the dense arrays under ~400MB,
/// far above anything a sane generation run needs.
const MAX_BINS: usize = 16_000_000;

pub struct PeriodicGrid {
    cell: f32,
    dims: [usize; 3],
    box_length: [f32; 3],
    reach: usize,

    /// Head of each bin's linked list of atom indices.
    cell_first: Vec<usize>,
    /// Next atom index in the same bin, per atom.
    atom_next: Vec<usize>,
    /// Occupants per bin.
    counts: Vec<u32>,
}

impl PeriodicGrid {
    /// Build the grid for `bounds` with the given bin edge.
    ///
    /// `min_distance` sets the neighbor search reach:
    /// `max(2, ceil(min_distance / cell) + 1)` bins per axis, generous enough
    /// that partial edge bins and min_distance close to the bin edge never
    /// hide a true neighbor.
    pub fn new(bounds: &PbcBox, cell: f32, min_distance: f32) -> CoreResult<Self> {
        if !cell.is_finite() || cell <= 0.0 {
            return Err(CoreError::Invalid("grid bin size must be positive".into()));
        }
        let lengths = bounds.length.to_array();
        let dims = [
            bins_for_axis(lengths[0], cell),
            bins_for_axis(lengths[1], cell),
            bins_for_axis(lengths[2], cell),
        ];
        let n_bins = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .filter(|&n| n <= MAX_BINS)
            .ok_or_else(|| {
                CoreError::Invalid(format!(
                    "grid of {}x{}x{} bins exceeds the dense storage cap",
                    dims[0], dims[1], dims[2]
                ))
            })?;
        let reach = ((min_distance / cell).ceil() as usize + 1).max(2);
        Ok(Self {
            cell,
            dims,
            box_length: lengths,
            reach,
            cell_first: vec![END_OF_LIST; n_bins],
            atom_next: Vec::new(),
            counts: vec![0; n_bins],
        })
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn occupancy(&self, bin: usize) -> u32 {
        self.counts[bin]
    }

    fn flat(&self, ix: usize, iy: usize, iz: usize) -> usize {
        (ix * self.dims[1] + iy) * self.dims[2] + iz
    }

    fn coords(&self, bin: usize) -> (usize, usize, usize) {
        let iz = bin % self.dims[2];
        let iy = (bin / self.dims[2]) % self.dims[1];
        let ix = bin / (self.dims[1] * self.dims[2]);
        (ix, iy, iz)
    }

    /// Flat bin index of a position, with periodic wraparound of the bin
    /// coordinates.
    pub fn bin_of(&self, p: Vec3) -> usize {
        let wrap = |coord: f32, dim: usize| -> usize {
            let i = (coord / self.cell).floor() as i64;
            i.rem_euclid(dim as i64) as usize
        };
        self.flat(
            wrap(p.x, self.dims[0]),
            wrap(p.y, self.dims[1]),
            wrap(p.z, self.dims[2]),
        )
    }

    /// Spatial extent of a bin, upper edge clamped to the cell boundary.
    pub fn bin_extent(&self, bin: usize) -> (Vec3, Vec3) {
        let (ix, iy, iz) = self.coords(bin);
        let lo = Vec3::new(
            ix as f32 * self.cell,
            iy as f32 * self.cell,
            iz as f32 * self.cell,
        );
        let hi = Vec3::new(
            (lo.x + self.cell).min(self.box_length[0]),
            (lo.y + self.cell).min(self.box_length[1]),
            (lo.z + self.cell).min(self.box_length[2]),
        );
        (lo, hi)
    }

    /// Uniform random position inside a bin's spatial extent.
    pub fn sample_point_in_bin<R: Rng + ?Sized>(&self, bin: usize, rng: &mut R) -> Vec3 {
        let (lo, hi) = self.bin_extent(bin);
        Vec3::new(
            rng.gen_range(lo.x..hi.x),
            rng.gen_range(lo.y..hi.y),
            rng.gen_range(lo.z..hi.z),
        )
    }

    /// Add an atom to a bin's membership list and bump its occupancy.
    pub fn insert(&mut self, atom_idx: usize, bin: usize) {
        if atom_idx >= self.atom_next.len() {
            self.atom_next.resize(atom_idx + 1, END_OF_LIST);
        }
        self.atom_next[atom_idx] = self.cell_first[bin];
        self.cell_first[bin] = atom_idx;
        self.counts[bin] += 1;
    }

    /// Visit every occupant of every bin within the search reach of `bin`,
    /// wrapped across the periodic boundary. Each bin is visited exactly
    /// once: when the search window spans a whole axis the axis is walked
    /// directly instead of wrapping into duplicates.
    pub fn for_each_neighbor<F>(&self, bin: usize, mut f: F)
    where
        F: FnMut(usize),
    {
        let (ix, iy, iz) = self.coords(bin);
        let xs = self.axis_neighbors(ix, self.dims[0]);
        let ys = self.axis_neighbors(iy, self.dims[1]);
        let zs = self.axis_neighbors(iz, self.dims[2]);
        for &jx in &xs {
            for &jy in &ys {
                for &jz in &zs {
                    let mut idx = self.cell_first[self.flat(jx, jy, jz)];
                    while idx != END_OF_LIST {
                        f(idx);
                        idx = self.atom_next[idx];
                    }
                }
            }
        }
    }

    fn axis_neighbors(&self, center: usize, dim: usize) -> Vec<usize> {
        if 2 * self.reach + 1 >= dim {
            return (0..dim).collect();
        }
        let center = center as i64;
        let dim_i = dim as i64;
        let reach = self.reach as i64;
        (-reach..=reach)
            .map(|d| (center + d).rem_euclid(dim_i) as usize)
            .collect()
    }
}

fn bins_for_axis(span: f32, cell: f32) -> usize {
    ((span / cell).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(edge: f32, cell: f32, min_distance: f32) -> PeriodicGrid {
        let bounds = PbcBox::cube(edge).expect("cube");
        PeriodicGrid::new(&bounds, cell, min_distance).expect("grid")
    }

    #[test]
    fn bin_of_wraps_the_bin_index() {
        let g = grid(10.0, 3.0, 1.5);
        assert_eq!(g.dims(), [4, 4, 4]);
        assert_eq!(g.bin_of(Vec3::new(0.0, 0.0, 0.0)), 0);
        // 9.9 / 3.0 = 3 -> last bin, not out of range.
        let last = g.bin_of(Vec3::new(9.9, 9.9, 9.9));
        assert_eq!(g.coords(last), (3, 3, 3));
    }

    #[test]
    fn insert_bumps_occupancy() {
        let mut g = grid(10.0, 3.0, 1.5);
        let bin = g.bin_of(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(g.occupancy(bin), 0);
        g.insert(0, bin);
        g.insert(1, bin);
        assert_eq!(g.occupancy(bin), 2);
    }

    #[test]
    fn neighbors_cross_the_periodic_boundary() {
        // 7 bins per axis with reach 2: the window wraps instead of covering
        // the whole axis, and the occupant in the last bin must still show up
        // as a neighbor of the first.
        let mut g = grid(20.0, 3.0, 1.5);
        assert_eq!(g.dims(), [7, 7, 7]);
        let far = g.bin_of(Vec3::new(19.9, 0.1, 0.1));
        g.insert(0, far);
        let mut seen = Vec::new();
        g.for_each_neighbor(g.bin_of(Vec3::new(0.1, 0.1, 0.1)), |idx| seen.push(idx));
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn tiny_grid_visits_each_occupant_once() {
        // 2 bins per axis: the search window covers each axis entirely, so
        // every occupant must be reported exactly once despite wraparound.
        let mut g = grid(4.0, 2.0, 1.0);
        assert_eq!(g.n_bins(), 8);
        for bin in 0..g.n_bins() {
            g.insert(bin, bin);
        }
        let mut seen = Vec::new();
        g.for_each_neighbor(0, |idx| seen.push(idx));
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn partial_edge_bin_samples_inside_the_cell() {
        // Edge 10 with bin edge 3 leaves a 1-wide partial bin at the top.
        let g = grid(10.0, 3.0, 1.5);
        let bin = g.bin_of(Vec3::new(9.5, 9.5, 9.5));
        let (lo, hi) = g.bin_extent(bin);
        assert_eq!(lo.to_array(), [9.0, 9.0, 9.0]);
        assert_eq!(hi.to_array(), [10.0, 10.0, 10.0]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = g.sample_point_in_bin(bin, &mut rng);
            assert!(p.x >= 9.0 && p.x < 10.0);
            assert!(p.y >= 9.0 && p.y < 10.0);
            assert!(p.z >= 9.0 && p.z < 10.0);
        }
    }

    #[test]
    fn rejects_degenerate_bin_size() {
        let bounds = PbcBox::cube(10.0).expect("cube");
        assert!(PeriodicGrid::new(&bounds, 0.0, 1.0).is_err());
        assert!(PeriodicGrid::new(&bounds, f32::NAN, 1.0).is_err());
    }

    #[test]
    fn rejects_oversized_grids() {
        let bounds = PbcBox::cube(10_000.0).expect("cube");
        assert!(PeriodicGrid::new(&bounds, 0.01, 0.005).is_err());
    }
}
