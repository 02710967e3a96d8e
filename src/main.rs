use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use retro_snake::audio::{CuePlayer, Muted, TerminalBell};
use retro_snake::game::GameConfig;
use retro_snake::modes::HumanMode;
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retro_snake")]
#[command(version, about = "Retro Snake arcade game for the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Starting seconds between ticks
    #[arg(long)]
    interval: Option<f64>,

    /// Go back to the starting speed after a game over
    #[arg(long)]
    reset_speed_on_game_over: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound cues
    #[arg(long)]
    mute: bool,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "retro_snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Defaults, then the config file, then command line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.grid_width);
            let height = self.height.unwrap_or(config.grid_height);
            config = config.with_grid(width, height);
        }
        if let Some(interval) = self.interval {
            config.initial_interval = interval;
            config.interval_floor = config.interval_floor.min(interval);
        }
        if self.reset_speed_on_game_over {
            config.reset_speed_on_game_over = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!(
        "starting Retro Snake on a {}x{} grid, {:.3}s per tick",
        config.grid_width, config.grid_height, config.initial_interval
    );

    let cues: Box<dyn CuePlayer> = if cli.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::new(std::io::stderr()))
    };

    let mut human_mode = HumanMode::new(config, cues)?;
    human_mode.run().await?;

    let metrics = human_mode.metrics();
    info!(
        "session over: {} rounds, high score {}",
        metrics.rounds_played, metrics.high_score
    );
    println!(
        "Thanks for playing! High score {} over {} rounds.",
        metrics.high_score, metrics.rounds_played
    );

    Ok(())
}
