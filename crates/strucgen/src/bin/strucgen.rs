use std::fs;
use std::path::PathBuf;

use clap::Parser;

use strucgen::config::{ElementRatio, GenConfig};
use strucgen::error::{GenError, GenResult};
use strucgen::generate::{generate_with_stream, Structure};
use strucgen::io::write_data;
use strucgen::streaming::StreamEmitter;

#[derive(Parser)]
#[command(name = "strucgen", version, about = "Random atomic structure generator")]
struct Cli {
    /// Config file (yaml or json); flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short = 'n', long)]
    num_atoms: Option<usize>,
    /// Target number density in atoms per cubic unit.
    #[arg(short, long)]
    density: Option<f32>,
    #[arg(short, long)]
    min_distance: Option<f32>,
    /// Element mixture, e.g. "Ti=0.5,Al=0.5".
    #[arg(short, long)]
    elements: Option<String>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Data file to write on success.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Trajectory file recording one frame per placement.
    #[arg(short, long)]
    trajectory: Option<PathBuf>,
    /// Latch the sparse-bin fallback once placement stalls.
    #[arg(long)]
    assist: bool,
    /// Emit NDJSON progress events on stderr.
    #[arg(long)]
    stream: bool,
}

fn main() -> Result<(), String> {
    if let Err(err) = run_cli() {
        return Err(err.to_string());
    }
    Ok(())
}

fn run_cli() -> GenResult<()> {
    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => GenConfig {
            num_atoms: 0,
            density: 0.0,
            min_distance: 1.0,
            elements: Vec::new(),
            seed: None,
            max_attempts: None,
            assist: false,
            trajectory: None,
            output: None,
        },
    };
    if let Some(n) = cli.num_atoms {
        cfg.num_atoms = n;
    }
    if let Some(density) = cli.density {
        cfg.density = density;
    }
    if let Some(min_distance) = cli.min_distance {
        cfg.min_distance = min_distance;
    }
    if let Some(raw) = &cli.elements {
        cfg.elements = parse_elements(raw)?;
    }
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }
    if let Some(path) = &cli.output {
        cfg.output = Some(path.to_string_lossy().to_string());
    }
    if let Some(path) = &cli.trajectory {
        cfg.trajectory = Some(path.to_string_lossy().to_string());
    }
    if cli.assist {
        cfg.assist = true;
    }
    if cfg.elements.is_empty() {
        cfg.elements = vec![ElementRatio {
            element: "Ti".into(),
            ratio: 1.0,
        }];
    }

    let emitter = StreamEmitter::new(cli.stream);
    let structure = generate_with_stream(&cfg, emitter)?;
    if let Some(path) = &cfg.output {
        write_data(&structure, path)?;
    }
    print_stats(&structure, cfg.output.as_deref());
    Ok(())
}

fn load_config(path: &PathBuf) -> GenResult<GenConfig> {
    let content = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext == "yaml" || ext == "yml" {
        serde_yaml::from_str(&content).map_err(|e| GenError::Parse(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| GenError::Parse(e.to_string()))
    }
}

/// Parse "Ti=0.5,Al=0.5" into an ordered ratio list.
fn parse_elements(raw: &str) -> GenResult<Vec<ElementRatio>> {
    let mut ratios = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (element, ratio) = part
            .split_once('=')
            .ok_or_else(|| GenError::Parse(format!("bad element spec: {part}")))?;
        let ratio = ratio
            .trim()
            .parse::<f32>()
            .map_err(|_| GenError::Parse(format!("bad ratio in element spec: {part}")))?;
        ratios.push(ElementRatio {
            element: element.trim().to_string(),
            ratio,
        });
    }
    if ratios.is_empty() {
        return Err(GenError::Parse("empty element spec".into()));
    }
    Ok(ratios)
}

fn print_stats(out: &Structure, output_path: Option<&str>) {
    let n = out.positions.len();
    let b = out.box_size;
    let volume = b[0] * b[1] * b[2];
    println!("atoms: {}", n);
    println!("box: {:.3} x {:.3} x {:.3}", b[0], b[1], b[2]);
    println!("density: {:.4} atoms/unit^3", n as f32 / volume);
    println!("attempts: {}", out.attempts);
    println!("seed: {}", out.seed);
    let mut order: Vec<&str> = Vec::new();
    for elem in &out.elements {
        if !order.contains(&elem.as_str()) {
            order.push(elem);
        }
    }
    for elem in order {
        let count = out.elements.iter().filter(|e| *e == elem).count();
        println!(
            "  {}: {} atoms ({:.1}%)",
            elem,
            count,
            count as f32 / n as f32 * 100.0
        );
    }
    if let Some(path) = output_path {
        println!("data file: {}", path);
    }
}
