#![forbid(unsafe_code)]

pub mod config;
pub mod distribution;
pub mod error;
pub mod generate;
pub mod io;
pub mod policy;
pub mod streaming;

pub use config::{ElementRatio, GenConfig};
pub use error::{GenError, GenResult};
pub use generate::{generate, generate_with_stream, Structure};
pub use strucgen_core::{element_mass, mass_or_default, PbcBox, PeriodicGrid, Vec3};
