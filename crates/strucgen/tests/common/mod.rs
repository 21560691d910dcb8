#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use strucgen::config::{ElementRatio, GenConfig};

pub fn temp_path(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let label_path = Path::new(label);
    let stem = label_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(label);
    let ext = label_path.extension().and_then(|s| s.to_str());
    let filename = if let Some(ext) = ext {
        format!(
            "strucgen_test_{stem}_{}_{}.{}",
            std::process::id(),
            nanos,
            ext
        )
    } else {
        format!("strucgen_test_{label}_{}_{}", std::process::id(), nanos)
    };
    path.push(filename);
    path
}

pub fn write_text(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write temp file");
}

pub fn ratios(specs: &[(&str, f32)]) -> Vec<ElementRatio> {
    specs
        .iter()
        .map(|&(element, ratio)| ElementRatio {
            element: element.into(),
            ratio,
        })
        .collect()
}

pub fn base_config() -> GenConfig {
    GenConfig {
        num_atoms: 10,
        density: 0.05,
        min_distance: 1.0,
        elements: ratios(&[("Ti", 0.5), ("Al", 0.5)]),
        seed: Some(0),
        max_attempts: None,
        assist: false,
        trajectory: None,
        output: None,
    }
}
