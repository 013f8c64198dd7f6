mod app;
mod cli;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logging;
mod util;
mod warning;
use crate::app::App;
use crate::cli::Arguments;
use crate::config::{Config, ConfigError};
use crate::game::Game;
use crate::highscore::ScoreFile;
use crate::warning::Warning;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use log::{info, warn};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = match Arguments::from_env() {
        Ok(Arguments::Run { config }) => config,
        Ok(Arguments::Help) => {
            println!("{}", Arguments::usage());
            return ExitCode::SUCCESS;
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}: {e:#}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };

    let mut warnings = Vec::new();
    let config = match load_config(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            warnings.push(Warning::from(e));
            None
        }
    };
    let config_ok = config.is_some();
    let config = config.unwrap_or_default();
    match logging::init(&config.logging) {
        Ok(Some(path)) => info!(
            "Starting {} {}; logging to {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            path.display()
        ),
        Ok(None) => (),
        Err(e) => warnings.push(Warning::from(e)),
    }
    if !config_ok {
        warn!("Failed to load configuration; using defaults");
    }

    let scores = config.score_file();
    let high_score = match scores.as_ref().map(ScoreFile::load).transpose() {
        Ok(Some(score)) => {
            info!("Loaded high score {score}");
            score
        }
        Ok(None) => {
            info!("High score file disabled; keeping high score in memory only");
            0
        }
        Err(e) => {
            warn!("Failed to load high score: {e}");
            warnings.push(Warning::from(e));
            0
        }
    };

    let mut app = App::new(Game::new(scores, high_score));
    for w in warnings {
        app.warn(w);
    }
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange).and_then(|()| app.run(terminal));
    let _ = execute!(io::stdout(), DisableFocusChange);
    ratatui::restore();
    info!("Exiting");
    io_exit(r)
}

/// Load the configuration file given on the command line, which must exist,
/// or else the one at the default location, if any
fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => Config::load(&p, false),
        None => Config::load(&Config::default_path()?, true),
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
