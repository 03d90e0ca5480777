//! `plexus` binary.
//!
//! ```text
//! plexus [CONFIG.json]
//! plexus --snapshot OUT.png [--ticks N] [CONFIG.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use plexus::{Config, Simulation};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SNAPSHOT_TICKS: usize = 120;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "plexus")]
#[command(about = "Drifting particles linked by proximity lines, pulled toward the cursor", long_about = None)]
struct Cli {
    /// JSON configuration file
    config: Option<PathBuf>,

    /// Render offscreen and write a PNG instead of opening a window
    #[arg(long, value_name = "OUT")]
    snapshot: Option<PathBuf>,

    /// Ticks to simulate before taking the snapshot
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_TICKS)]
    ticks: usize,
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;
    let simulation = Simulation::new().with_config(config);

    match cli.snapshot {
        Some(out) => {
            let (_, canvas) = simulation.run_headless(cli.ticks)?;
            canvas.save_png(&out)?;
        }
        None => simulation.run()?,
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
