use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use strucgen_core::mass_or_default;

use crate::error::{GenError, GenResult};
use crate::generate::Structure;
use crate::io::assign_type_ids;

/// Write a configuration as a LAMMPS data file (`atomic` style).
///
/// Type ids are assigned by first occurrence of each distinct element label
/// in the atom sequence; the `Masses` section carries the element symbol in
/// a trailing comment so the mapping survives a round trip.
pub fn write_data(out: &Structure, path: &str) -> GenResult<()> {
    let mut file = File::create(path)?;
    let (type_ids, type_order) = assign_type_ids(&out.elements);
    writeln!(file, "strucgen lammps data")?;
    writeln!(file)?;
    writeln!(file, "{} atoms", out.positions.len())?;
    writeln!(file, "{} atom types", type_order.len())?;
    writeln!(file)?;
    let b = out.box_size;
    writeln!(file, "0.000000 {:.6} xlo xhi", b[0])?;
    writeln!(file, "0.000000 {:.6} ylo yhi", b[1])?;
    writeln!(file, "0.000000 {:.6} zlo zhi", b[2])?;
    writeln!(file)?;
    writeln!(file, "Masses")?;
    writeln!(file)?;
    for (elem, t) in &type_order {
        writeln!(file, "{} {:.4} # {}", t, mass_or_default(elem), elem)?;
    }
    writeln!(file)?;
    writeln!(file, "Atoms # atomic")?;
    writeln!(file)?;
    for (i, p) in out.positions.iter().enumerate() {
        writeln!(
            file,
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

/// Parse the `Masses` section of a data file back into an element -> mass
/// map. Types without an element comment get a `T{id}` placeholder label.
pub fn read_data_masses(path: &Path) -> GenResult<HashMap<String, f32>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut masses = HashMap::new();
    let mut section = Section::None;
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(next) = section_header(trimmed) {
            section = next;
            continue;
        }
        if section == Section::Masses {
            if let Some((element, mass)) = parse_mass_line(trimmed) {
                masses.insert(element, mass);
            }
        }
    }
    if masses.is_empty() {
        return Err(GenError::Parse("no Masses section found".into()));
    }
    Ok(masses)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    None,
    Masses,
    Atoms,
}

fn section_header(line: &str) -> Option<Section> {
    let token = line.split_whitespace().next()?;
    match token {
        "Masses" => Some(Section::Masses),
        "Atoms" => Some(Section::Atoms),
        _ => None,
    }
}

fn parse_mass_line(line: &str) -> Option<(String, f32)> {
    let mut parts = line.split('#');
    let left = parts.next()?.trim();
    let comment = parts.next().map(|s| s.trim());
    let fields: Vec<&str> = left.split_whitespace().collect();
    if fields.len() < 2 {
        return None;
    }
    let atom_type = fields[0].parse::<i32>().ok()?;
    let mass = fields[1].parse::<f32>().ok()?;
    let element = comment
        .and_then(|c| c.split_whitespace().next())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("T{atom_type}"));
    Some((element, mass))
}
