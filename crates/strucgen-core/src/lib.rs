#![forbid(unsafe_code)]

pub mod elements;
pub mod error;
pub mod geom;
pub mod grid;
pub mod pbc;

pub use elements::{element_mass, mass_or_default};
pub use error::{CoreError, CoreResult};
pub use geom::Vec3;
pub use grid::PeriodicGrid;
pub use pbc::PbcBox;
