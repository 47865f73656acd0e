use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info};
use nibbles::config::{GameConfig, LoadError, PALETTE_CLASSIC};
use nibbles::game::GameState;
use nibbles::input::{GameInput, InputHandler};
use nibbles::terminal_runtime::TerminalSession;

/// Upper bound on how long one loop iteration waits for a key.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with game settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid height in rows, border included.
    #[arg(long)]
    height: Option<u16>,

    /// Grid width in columns, border included.
    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    start_row: Option<u16>,

    #[arg(long)]
    start_col: Option<u16>,

    #[arg(long)]
    actor_glyph: Option<char>,

    #[arg(long)]
    wall_glyph: Option<char>,

    #[arg(long)]
    health: Option<u32>,

    /// Starting delay between two steps, in milliseconds.
    #[arg(long)]
    delay: Option<u64>,

    /// Delay reduction per collectable on the endless level, in milliseconds.
    #[arg(long)]
    delay_step: Option<u64>,

    /// Floor for the step delay, in milliseconds.
    #[arg(long)]
    min_delay: Option<u64>,

    /// Size needed to unlock the second level.
    #[arg(long)]
    threshold: Option<u32>,

    /// Seed for collectable placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file (filter via RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(row) = self.start_row {
            config.start_row = row;
        }
        if let Some(col) = self.start_col {
            config.start_col = col;
        }
        if let Some(glyph) = self.actor_glyph {
            config.actor_glyph = glyph;
        }
        if let Some(glyph) = self.wall_glyph {
            config.wall_glyph = glyph;
        }
        if let Some(health) = self.health {
            config.starting_health = health;
        }
        if let Some(delay) = self.delay {
            config.base_delay_ms = delay;
        }
        if let Some(step) = self.delay_step {
            config.delay_decrement_ms = step;
        }
        if let Some(min_delay) = self.min_delay {
            config.min_delay_ms = min_delay;
        }
        if let Some(threshold) = self.threshold {
            config.score_threshold = threshold;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Cannot open log file: {error}");
        return ExitCode::FAILURE;
    }

    let state = match build_state(&cli) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return ExitCode::from(2);
        }
    };

    match run(state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(io_error) => {
            error!("terminal failure: {io_error}");
            eprintln!("Terminal error: {io_error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        // Stderr shares the screen with the game, so stay quiet unless asked.
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
        return Ok(());
    };

    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Layers defaults, the optional JSON file, and command-line flags, then
/// validates the result once.
fn resolve_config(cli: &Cli) -> Result<GameConfig, LoadError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::read_json(path)?,
        None => GameConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

fn build_state(cli: &Cli) -> Result<GameState, LoadError> {
    let config = resolve_config(cli)?;
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed)?,
        None => GameState::new(config)?,
    };
    info!("starting with {config:?}");

    Ok(state)
}

fn run(mut state: GameState) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new(INPUT_POLL_TIMEOUT);
    let mut last_tick = Instant::now();

    loop {
        session.draw(&state, &PALETTE_CLASSIC)?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                info!("quit requested");
                break;
            }

            let was_waiting = state.status().awaits_acknowledgement();
            state.apply_input(game_input);
            if was_waiting && !state.status().awaits_acknowledgement() {
                last_tick = Instant::now();
            }
        }

        if last_tick.elapsed() >= state.tick_delay() {
            state.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use nibbles::config::{DEFAULT_GRID_WIDTH, DEFAULT_HEALTH, GameConfig, LoadError};
    use nibbles::error::ConfigError;

    use super::{Cli, resolve_config};

    fn temp_config(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "nibbles-cli-{}-{name}.json",
            std::process::id()
        ));
        fs::write(&path, json).expect("test file write should succeed");
        path
    }

    #[test]
    fn every_flag_overrides_its_field() {
        let cli = Cli::try_parse_from([
            "nibbles",
            "--height",
            "30",
            "--width",
            "50",
            "--start-row",
            "4",
            "--start-col",
            "6",
            "--actor-glyph",
            "O",
            "--wall-glyph",
            "%",
            "--health",
            "7",
            "--delay",
            "300",
            "--delay-step",
            "10",
            "--min-delay",
            "40",
            "--threshold",
            "25",
        ])
        .expect("flags should parse");

        let mut config = GameConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(
            config,
            GameConfig {
                grid_height: 30,
                grid_width: 50,
                start_row: 4,
                start_col: 6,
                actor_glyph: 'O',
                wall_glyph: '%',
                starting_health: 7,
                base_delay_ms: 300,
                delay_decrement_ms: 10,
                min_delay_ms: 40,
                score_threshold: 25,
            }
        );
    }

    #[test]
    fn no_flags_keep_the_defaults() {
        let cli = Cli::try_parse_from(["nibbles"]).expect("no flags should parse");

        let mut config = GameConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn flag_beats_file_and_file_beats_default() {
        let path = temp_config("layered", r#"{ "starting_health": 5, "wall_glyph": "%" }"#);
        let path_arg = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "nibbles",
            "--config",
            path_arg.as_str(),
            "--health",
            "9",
        ])
        .expect("flags should parse");

        let config = resolve_config(&cli);
        let _ = fs::remove_file(&path);
        let config = config.expect("layered config should be valid");

        assert_eq!(config.starting_health, 9);
        assert_eq!(config.wall_glyph, '%');
        assert_eq!(config.grid_width, DEFAULT_GRID_WIDTH);
        assert_ne!(config.starting_health, DEFAULT_HEALTH);
    }

    #[test]
    fn flag_can_repair_an_invalid_file_value() {
        let path = temp_config("repair", r#"{ "score_threshold": 0 }"#);
        let path_arg = path.to_string_lossy().into_owned();

        let broken = Cli::try_parse_from(["nibbles", "--config", path_arg.as_str()])
            .expect("flags should parse");
        let repaired = Cli::try_parse_from([
            "nibbles",
            "--config",
            path_arg.as_str(),
            "--threshold",
            "4",
        ])
        .expect("flags should parse");

        let broken = resolve_config(&broken);
        let repaired = resolve_config(&repaired);
        let _ = fs::remove_file(&path);

        assert!(matches!(
            broken,
            Err(LoadError::Invalid(ConfigError::ThresholdTooSmall(0)))
        ));
        assert_eq!(
            repaired.expect("flag should fix the threshold").score_threshold,
            4
        );
    }

    #[test]
    fn invalid_flag_is_reported_after_layering() {
        let cli = Cli::try_parse_from(["nibbles", "--health", "0"]).expect("flags should parse");

        assert!(matches!(
            resolve_config(&cli),
            Err(LoadError::Invalid(ConfigError::NoHealth))
        ));
    }
}
