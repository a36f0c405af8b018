//! Configuration: server settings from the environment and quiz banks from TOML.
//!
//! TOML schema:
//!
//! ```toml
//! include_builtin = true
//!
//! [[quizzes]]
//! path = "capitals"
//! title = "World Capitals"
//!
//! [[quizzes.categories]]
//! name = "europe"
//! mode = "fill"            # "simple" (default) or "fill"
//! case_sensitive = false
//! reverse = false          # also add "europe (reversed)"
//! questions = { "The capital of France is [...]." = "Paris" }
//! ```

use std::{
  collections::BTreeMap,
  net::{IpAddr, Ipv4Addr, SocketAddr},
  path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::info;

use crate::bank::from_dicts;
use crate::domain::{Mode, SharedTemplate};
use crate::error::{QuizError, Result};
use crate::registry::Registry;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
  pub addr: SocketAddr,
  pub static_dir: PathBuf,
  pub quiz_config: Option<PathBuf>,
}

impl ServerConfig {
  /// HOST, PORT, STATIC_DIR and QUIZ_CONFIG_PATH; unparsable values fall back to defaults.
  pub fn from_env() -> Self {
    let host = std::env::var("HOST")
      .ok()
      .and_then(|h| h.parse::<IpAddr>().ok())
      .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);
    Self {
      addr: SocketAddr::new(host, port),
      static_dir: std::env::var("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("./static")),
      quiz_config: std::env::var("QUIZ_CONFIG_PATH").ok().map(PathBuf::from),
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct QuizConfig {
  #[serde(default = "default_true")]
  pub include_builtin: bool,
  #[serde(default)]
  pub quizzes: Vec<QuizCfg>,
}

impl Default for QuizConfig {
  fn default() -> Self {
    Self { include_builtin: true, quizzes: Vec::new() }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct QuizCfg {
  pub path: String,
  pub title: String,
  #[serde(default)]
  pub categories: Vec<CategoryCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CategoryCfg {
  pub name: String,
  #[serde(default)] pub mode: Mode,
  #[serde(default)] pub case_sensitive: bool,
  #[serde(default)] pub reverse: bool,
  #[serde(default)] pub questions: BTreeMap<String, String>,
}

fn default_true() -> bool { true }

impl QuizConfig {
  pub fn from_toml(s: &str) -> Result<Self> {
    Ok(toml::from_str(s)?)
  }

  pub fn load(path: &Path) -> Result<Self> {
    let s = std::fs::read_to_string(path)?;
    let cfg = Self::from_toml(&s)?;
    info!(target: "ezquiz", path = %path.display(), quizzes = cfg.quizzes.len(), "Loaded quiz config (TOML)");
    Ok(cfg)
  }

  /// Register every configured quiz as static banks.
  pub fn register_into(&self, reg: &mut Registry) -> Result<()> {
    for quiz in &self.quizzes {
      let mut categories: Vec<(String, SharedTemplate)> = Vec::new();
      for cat in &quiz.categories {
        let built = from_dicts(
          vec![cat.questions.clone()],
          vec![cat.name.clone()],
          cat.mode,
          cat.case_sensitive,
          cat.reverse,
        )
        .map_err(|e| QuizError::Configuration(format!("quiz '{}', category '{}': {}", quiz.path, cat.name, e)))?;
        categories.extend(built);
      }
      reg.register(&quiz.path, quiz.title.clone(), categories)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{QuestionTemplate, Seed};

  const SAMPLE: &str = r#"
include_builtin = false

[[quizzes]]
path = "/capitals/"
title = "World Capitals"

[[quizzes.categories]]
name = "europe"
mode = "fill"
questions = { "The capital of France is [...]." = "Paris", "The capital of Spain is [...]." = "Madrid" }

[[quizzes.categories]]
name = "words"
reverse = true
case_sensitive = true
questions = { "perro" = "dog" }
"#;

  #[test]
  fn parses_and_registers() {
    let cfg = QuizConfig::from_toml(SAMPLE).unwrap();
    assert!(!cfg.include_builtin);
    let mut reg = Registry::new();
    cfg.register_into(&mut reg).unwrap();

    let quiz = reg.get("capitals").unwrap();
    assert_eq!(quiz.title, "World Capitals");
    assert_eq!(quiz.category_names(), ["europe", "words", "words (reversed)"]);

    let europe = quiz.template("europe").unwrap();
    let seed = Seed::Key("The capital of Spain is [...].".into());
    assert_eq!(europe.prompt(&seed).unwrap().mode, Mode::Fill);
    assert!(europe.matches(&europe.solve(&seed).unwrap(), "madrid"));

    let rev = quiz.template("words (reversed)").unwrap();
    assert_eq!(rev.solve(&Seed::Key("dog".into())).unwrap(), "perro");
    assert!(!rev.matches("perro", "Perro"));
  }

  #[test]
  fn builtin_is_on_by_default() {
    let cfg = QuizConfig::from_toml("").unwrap();
    assert!(cfg.include_builtin);
    assert!(cfg.quizzes.is_empty());
  }

  #[test]
  fn empty_question_table_fails() {
    let cfg = QuizConfig::from_toml(
      r#"
[[quizzes]]
path = "x"
title = "X"
[[quizzes.categories]]
name = "empty"
"#,
    )
    .unwrap();
    let mut reg = Registry::new();
    assert!(matches!(cfg.register_into(&mut reg), Err(QuizError::Configuration(_))));
  }

  #[test]
  fn bad_toml_is_reported() {
    assert!(matches!(QuizConfig::from_toml("quizzes = 3"), Err(QuizError::Toml(_))));
  }
}
