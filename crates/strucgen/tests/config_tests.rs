use strucgen::config::{GenConfig, DEFAULT_ATTEMPTS_PER_ATOM};
use strucgen::error::GenError;

mod common;
use common::base_config;

#[test]
fn normalized_defaults_the_attempt_budget() {
    let cfg = base_config().normalized().expect("valid");
    assert_eq!(cfg.max_attempts, Some(10 * DEFAULT_ATTEMPTS_PER_ATOM));
    assert_eq!(cfg.attempt_budget(), 10_000);
}

#[test]
fn explicit_budget_survives_normalization() {
    let mut cfg = base_config();
    cfg.max_attempts = Some(77);
    let cfg = cfg.normalized().expect("valid");
    assert_eq!(cfg.attempt_budget(), 77);
}

#[test]
fn box_edge_matches_the_density() {
    let cfg = base_config();
    // 10 atoms at 0.05 atoms/unit^3 -> volume 200.
    let edge = cfg.box_edge();
    assert!((edge * edge * edge - 200.0).abs() < 1e-2);
}

#[test]
fn invalid_fields_fail_fast() {
    let mut cfg = base_config();
    cfg.num_atoms = 0;
    assert!(matches!(cfg.normalized(), Err(GenError::Invalid(_))));

    let mut cfg = base_config();
    cfg.density = -0.1;
    assert!(matches!(cfg.normalized(), Err(GenError::Invalid(_))));

    let mut cfg = base_config();
    cfg.min_distance = f32::INFINITY;
    assert!(matches!(cfg.normalized(), Err(GenError::Invalid(_))));

    let mut cfg = base_config();
    cfg.elements.clear();
    assert!(matches!(cfg.normalized(), Err(GenError::Invalid(_))));
}

#[test]
fn yaml_config_parses() {
    let doc = r#"
num_atoms: 200
density: 0.0784
min_distance: 1.5
elements:
  - element: Fe
    ratio: 0.8
  - element: B
    ratio: 0.2
seed: 7
assist: true
output: out.data
"#;
    let cfg: GenConfig = serde_yaml::from_str(doc).expect("yaml");
    assert_eq!(cfg.num_atoms, 200);
    assert!((cfg.density - 0.0784).abs() < 1e-6);
    assert!((cfg.min_distance - 1.5).abs() < 1e-6);
    assert_eq!(cfg.elements.len(), 2);
    assert_eq!(cfg.elements[0].element, "Fe");
    assert_eq!(cfg.seed, Some(7));
    assert!(cfg.assist);
    assert_eq!(cfg.output.as_deref(), Some("out.data"));
    assert!(cfg.validate().is_ok());
}

#[test]
fn json_config_defaults_optional_fields() {
    let doc = r#"{
        "num_atoms": 10,
        "density": 0.05,
        "elements": [{"element": "Ti", "ratio": 1.0}]
    }"#;
    let cfg: GenConfig = serde_json::from_str(doc).expect("json");
    assert!((cfg.min_distance - 1.0).abs() < 1e-6);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.max_attempts, None);
    assert!(!cfg.assist);
    assert_eq!(cfg.trajectory, None);
    assert!(cfg.validate().is_ok());
}
