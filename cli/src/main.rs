mod script;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use zoomable::{ConfigError, ZoomableConfig};

use crate::script::Script;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("animations still running after {frames} frames")]
    Unsettled { frames: usize },
}

#[derive(Parser, Debug)]
#[command(name = "zoomable-cli", about = "Replay gesture scripts against the zoomable viewport engine")]
struct Cli {
    /// Script to replay, or `-` for stdin.
    script: PathBuf,

    /// JSON widget configuration. Defaults apply when omitted.
    #[arg(long, env = "ZOOMABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Print the state after every event instead of only the final state.
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ZoomableConfig::from_json(&read_input(path)?)?,
        None => ZoomableConfig::default(),
    };
    let script = Script::from_json(&read_input(&cli.script)?)?;

    for state in script::replay(&script, config, cli.trace)? {
        println!("{}", serde_json::to_string(&state)?);
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String, ReplayError> {
    let to_error = |source| ReplayError::Io { path: path.display().to_string(), source };
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw).map_err(to_error)?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).map_err(to_error)
}
