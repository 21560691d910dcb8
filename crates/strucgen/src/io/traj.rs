use std::fs::File;
use std::io::Write;

use strucgen_core::Vec3;

use crate::error::GenResult;
use crate::io::assign_type_ids;

/// Incremental LAMMPS trajectory (lammpstrj) writer.
///
/// One frame per successful placement: the timestep and atom count both
/// equal the number of atoms placed so far. Creating the writer truncates
/// any existing file; frames then accumulate across the run.
pub struct TrajectoryWriter {
    file: File,
}

impl TrajectoryWriter {
    pub fn create(path: &str) -> GenResult<Self> {
        Ok(Self {
            file: File::create(path)?,
        })
    }

    pub fn write_frame(
        &mut self,
        positions: &[Vec3],
        elements: &[String],
        box_size: [f32; 3],
    ) -> GenResult<()> {
        let step = positions.len();
        let (type_ids, _) = assign_type_ids(&elements[..step]);
        writeln!(self.file, "ITEM: TIMESTEP")?;
        writeln!(self.file, "{}", step)?;
        writeln!(self.file, "ITEM: NUMBER OF ATOMS")?;
        writeln!(self.file, "{}", step)?;
        writeln!(self.file, "ITEM: BOX BOUNDS pp pp pp")?;
        for b in box_size {
            writeln!(self.file, "0.000000 {:.6}", b)?;
        }
        writeln!(self.file, "ITEM: ATOMS id type x y z")?;
        for (i, p) in positions.iter().enumerate() {
            writeln!(
                self.file,
                "{} {} {:.6} {:.6} {:.6}",
                i + 1,
                type_ids[i],
                p.x,
                p.y,
                p.z
            )?;
        }
        Ok(())
    }
}
