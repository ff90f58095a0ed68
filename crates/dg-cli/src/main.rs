//! dungeon-gen: command-line front end
//!
//! Loads a JSON config, applies command-line overrides, generates the
//! dungeon and writes it out as JSON.

mod cli;

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dg_core::{Dungeon, DungeonConfig, DungeonGenerator};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = match &args.config {
        Some(path) => DungeonConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DungeonConfig::default(),
    };
    args.apply_overrides(&mut config);

    let dungeon = run(&config, args.steps)?;
    let json = serde_json::to_string_pretty(&dungeon).context("serializing dungeon")?;

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote dungeon to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("writing dungeon to stdout")?;
        }
    }

    Ok(())
}

/// Generate the dungeon, logging each event when `steps` is set
fn run(config: &DungeonConfig, steps: bool) -> Result<Dungeon> {
    let mut generator = DungeonGenerator::new(config).context("invalid configuration")?;
    info!("seed {}", generator.seed());

    if steps {
        for (n, event) in generator.by_ref().enumerate() {
            debug!("step {n}: {event:?}");
        }
    }

    Ok(generator.finish())
}

/// Console logging to stderr; `RUST_LOG` overrides `level`
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_and_without_steps() {
        let config = DungeonConfig {
            width: 12,
            height: 9,
            ..DungeonConfig::with_seed(4)
        };
        let quiet = run(&config, false).unwrap();
        let stepped = run(&config, true).unwrap();
        assert_eq!(quiet, stepped);
    }

    #[test]
    fn test_run_rejects_bad_config() {
        let config = DungeonConfig {
            width: 0,
            ..DungeonConfig::default()
        };
        let err = run(&config, false).unwrap_err();
        assert!(format!("{err:#}").contains("grid dimensions"));
    }
}
