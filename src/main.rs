//! ezquiz · quiz server and terminal player
//!
//! - Axum HTTP API: lobby, categories, next question, submit answer
//! - Built-in demo quizzes plus optional TOML-defined banks
//! - Static front-end fallback (./static/index.html)
//!
//! Important env variables:
//!   HOST              : bind address (default 0.0.0.0)
//!   PORT              : u16 (default 3000)
//!   QUIZ_CONFIG_PATH  : path to TOML quiz config
//!   STATIC_DIR        : front-end directory (default ./static)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod cli;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use ezquiz::config::{QuizConfig, ServerConfig};
use ezquiz::play::play;
use ezquiz::routes::build_router;
use ezquiz::state::AppState;
use ezquiz::telemetry;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let cli = Cli::parse();
  let server = ServerConfig::from_env();
  let config_path = cli.config.or_else(|| server.quiz_config.clone());

  match cli.command.unwrap_or(Commands::Serve) {
    Commands::Serve => {
      telemetry::init_tracing(false);
      let state = Arc::new(load_state(config_path)?);
      let app = build_router(state, &server.static_dir);

      let listener = TcpListener::bind(server.addr).await?;
      info!(target: "ezquiz", addr = %server.addr, "HTTP server listening");
      axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    }
    Commands::Play(opts) => {
      telemetry::init_tracing(true);
      let state = load_state(config_path)?;
      let quiz = state.registry.get(&opts.quiz)?;
      let stdin = std::io::stdin();
      play(quiz, &opts.categories, opts.mode, opts.param, stdin.lock(), std::io::stdout())?;
    }
  }
  Ok(())
}

fn load_state(path: Option<PathBuf>) -> ezquiz::Result<AppState> {
  let cfg = match path {
    Some(p) => QuizConfig::load(&p)?,
    None => QuizConfig::default(),
  };
  AppState::from_config(&cfg)
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "ezquiz", error = %e, "Failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!(target: "ezquiz", "Shutdown signal received");
}
