use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ezquiz::play::PlayMode;

#[derive(Debug, Parser)]
#[command(name = "ezquiz", about = "Quiz server and terminal quiz player")]
pub(crate) struct Cli {
    /// TOML quiz config; overrides QUIZ_CONFIG_PATH.
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Serve the HTTP API (default).
    Serve,

    /// Play one quiz in the terminal.
    Play(Play),
}

#[derive(Debug, Parser)]
pub(crate) struct Play {
    /// Quiz identifier, e.g. "math".
    pub(crate) quiz: String,
    /// Restrict to these categories (repeatable). Defaults to all.
    #[arg(short, long = "category")]
    pub(crate) categories: Vec<String>,
    #[arg(short, long, value_enum, default_value_t = PlayMode::Score)]
    pub(crate) mode: PlayMode,
    /// Threshold for the end condition (seconds for `timed`).
    #[arg(short, long, default_value_t = 10)]
    pub(crate) param: u32,
}
