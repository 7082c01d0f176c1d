mod replay;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use canvas::config::{ConfigError, EngineConfig};
use canvas::engine::EngineCore;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::replay::{MAX_SETTLE_FRAMES, ReplayStep};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: invalid event: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("output encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "board-replay", about = "Replay a recorded input session through the canvas engine")]
struct Cli {
    /// Session file (JSON lines, one input event per line); `-` reads stdin.
    #[arg(long, short, default_value = "-")]
    input: String,

    /// Engine config as JSON (camelCase keys; missing keys take defaults).
    #[arg(long, short, env = "BOARD_REPLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Print one JSON object per step instead of text.
    #[arg(long)]
    json: bool,

    /// After the session ends, keep delivering frames until any focus animation settles.
    #[arg(long)]
    settle: bool,
}

fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let mut core = EngineCore::with_config(config);

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&cli.input)?))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut emit = |step: &ReplayStep| -> Result<(), CliError> {
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(step)?)?;
        } else {
            writeln!(out, "{}", step.to_text())?;
        }
        Ok(())
    };

    let events = replay::replay(&mut core, reader, &mut emit)?;
    let frames = if cli.settle { replay::settle(&mut core, MAX_SETTLE_FRAMES, &mut emit)? } else { 0 };

    let camera = core.camera();
    info!(events, frames, x = camera.x, y = camera.y, zoom = camera.zoom(), "replay finished");
    Ok(())
}
