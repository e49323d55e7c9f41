use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use ouroboros::game::{GameConfig, StdRandom};
use ouroboros::modes::PlayMode;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ouroboros")]
#[command(version, about = "Grid snake for the terminal")]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width and height (odd, greater than 3)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Ticks per second
    #[arg(long)]
    speed: Option<f64>,

    /// Shortest drag, in terminal columns, that counts as a swipe
    #[arg(long)]
    swipe_distance: Option<f64>,

    /// Seed for reproducible spawns and targets
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is owned by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(speed) = self.speed {
            config.ticks_per_second = speed;
        }
        if let Some(swipe_distance) = self.swipe_distance {
            config.swipe_distance = swipe_distance;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "ouroboros=info".into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    info!(?config, seed = ?cli.seed, "Starting");

    let rng = match cli.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };

    let mut play_mode = PlayMode::new(config, rng)?;
    play_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 21, "ticks_per_second": 12 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from(["ouroboros", "--config", &path, "--speed", "5"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_size, 21);
        assert_eq!(config.ticks_per_second, 5.0);
        assert_eq!(config.swipe_distance, 4.0);
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["ouroboros"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["ouroboros", "--grid-size", "10"]);
        assert!(cli.game_config().is_err());
    }
}
