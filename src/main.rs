mod game;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use gridsnake::{config, GameConfig, Session};

/// Terminal snake on a fixed grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Grid columns
    #[arg(
        long,
        default_value_t = config::DEFAULT_COLS,
        value_parser = clap::value_parser!(i32).range(1..=game::MAX_SIDE as i64)
    )]
    cols: i32,

    /// Grid rows
    #[arg(
        long,
        default_value_t = config::DEFAULT_ROWS,
        value_parser = clap::value_parser!(i32).range(1..=game::MAX_SIDE as i64)
    )]
    rows: i32,

    /// Starting speed in ticks per second
    #[arg(long, default_value_t = config::DEFAULT_SPEED)]
    speed: f64,

    /// Speed gained per food eaten
    #[arg(long, default_value_t = config::DEFAULT_SPEED_INCREMENT)]
    speed_increment: f64,

    /// Speed cap in ticks per second
    #[arg(long, default_value_t = config::DEFAULT_MAX_SPEED)]
    max_speed: f64,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal is in raw mode while playing)
    #[arg(long, default_value = "gridsnake.log")]
    log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            cols: self.cols,
            rows: self.rows,
            initial_speed: self.speed,
            speed_increment: self.speed_increment,
            max_speed: self.max_speed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, Config::default(), log_file)
        .context("failed to initialize logger")?;

    let config = args.game_config();
    let session = match args.seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    }
    .context("invalid game configuration")?;

    info!("starting gridsnake");
    let mut game = game::Game::new(session)?;
    game.run().context("terminal error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_flags_are_range_checked() {
        assert!(Args::try_parse_from(["gridsnake", "--cols", "65535"]).is_err());
        assert!(Args::try_parse_from(["gridsnake", "--rows", "0"]).is_err());

        let args = Args::try_parse_from(["gridsnake", "--cols", "40", "--rows", "12"]).unwrap();
        let config = args.game_config();
        assert_eq!((config.cols, config.rows), (40, 12));
        assert_eq!(config.validate(), Ok(()));
    }
}
