//! Domain models: seeds, prompts, explanations and the question template contract.
//!
//! A question template describes one family of questions. It draws a random
//! `Seed`, renders it into a `Prompt`, computes the canonical answer and checks
//! submissions against it. Seeds travel to the client and back unchanged, so
//! they must stay small and serializable.

use std::{fmt, sync::Arc};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// Inline input marker used by `fill` prompts.
pub const BLANK: &str = "[...]";

/// A drawn question instance. Opaque to the client, echoed back on submit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Seed {
  /// Key into a static mapping (JSON string).
  Key(String),
  /// Integer pair (JSON `[a, b]`).
  Pair(i64, i64),
  /// Short record of strings (JSON array of strings).
  Record(Vec<String>),
}

impl Seed {
  pub fn key(&self) -> Result<&str> {
    match self {
      Seed::Key(k) => Ok(k.as_str()),
      other => Err(QuizError::InvalidSeed(format!("expected a key, got {}", other))),
    }
  }

  pub fn pair(&self) -> Result<(i64, i64)> {
    match self {
      Seed::Pair(a, b) => Ok((*a, *b)),
      other => Err(QuizError::InvalidSeed(format!("expected an integer pair, got {}", other))),
    }
  }

  /// Record fields, checked for the expected arity.
  pub fn record(&self, len: usize) -> Result<&[String]> {
    match self {
      Seed::Record(fields) if fields.len() == len => Ok(fields.as_slice()),
      other => Err(QuizError::InvalidSeed(format!("expected a record of {} fields, got {}", len, other))),
    }
  }
}

impl fmt::Display for Seed {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Seed::Key(k) => write!(f, "{:?}", k),
      Seed::Pair(a, b) => write!(f, "({}, {})", a, b),
      Seed::Record(fields) => write!(f, "{:?}", fields),
    }
  }
}

/// How the client renders the answer input.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  /// Separate answer field below the text.
  Simple,
  /// The text contains one `[...]` marker rendered as an inline input.
  Fill,
}
impl Default for Mode {
  fn default() -> Self { Mode::Simple }
}

/// What the client shows for one seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
  pub text: String,
  pub mode: Mode,
  pub context: String,
  pub hints: Vec<String>,
}

impl Prompt {
  pub fn new(text: impl Into<String>, mode: Mode) -> Self {
    Self { text: text.into(), mode, context: String::new(), hints: Vec::new() }
  }

  pub fn simple(text: impl Into<String>) -> Self { Self::new(text, Mode::Simple) }

  pub fn fill(text: impl Into<String>) -> Self { Self::new(text, Mode::Fill) }

  pub fn with_context(mut self, context: impl Into<String>) -> Self {
    self.context = context.into();
    self
  }

  pub fn with_hints(mut self, hints: Vec<String>) -> Self {
    self.hints = hints;
    self
  }
}

/// Auxiliary data shown after a submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Explanation {
  /// The caller diffs the submitted answer against the correct one.
  TextDiff,
  Text { value: String },
}

/// Answer comparison strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matcher {
  CaseInsensitive,
  CaseSensitive,
  /// Both sides parsed as `f64`; anything unparsable is a mismatch.
  Numeric,
}
impl Default for Matcher {
  fn default() -> Self { Matcher::CaseInsensitive }
}

impl Matcher {
  pub fn case_sensitive(flag: bool) -> Self {
    if flag { Matcher::CaseSensitive } else { Matcher::CaseInsensitive }
  }

  /// Total over any two strings. An empty submission never matches.
  pub fn matches(self, canonical: &str, submitted: &str) -> bool {
    if submitted.is_empty() {
      return false;
    }
    match self {
      Matcher::CaseInsensitive => canonical.to_lowercase() == submitted.to_lowercase(),
      Matcher::CaseSensitive => canonical == submitted,
      Matcher::Numeric => match (canonical.trim().parse::<f64>(), submitted.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
      },
    }
  }
}

/// One family of questions.
///
/// `prompt` and `solve` must agree on every seed `seed()` can return, so that
/// `matches(solve(s), solve(s))` always holds.
pub trait QuestionTemplate: Send + Sync {
  fn seed(&self) -> Seed;

  fn prompt(&self, seed: &Seed) -> Result<Prompt>;

  fn solve(&self, seed: &Seed) -> Result<String>;

  fn matches(&self, canonical: &str, submitted: &str) -> bool {
    Matcher::default().matches(canonical, submitted)
  }

  fn explain(&self, _seed: &Seed) -> Explanation {
    Explanation::TextDiff
  }
}

pub type SharedTemplate = Arc<dyn QuestionTemplate>;

type SeedFn = Box<dyn Fn() -> Seed + Send + Sync>;
type PromptFn = Box<dyn Fn(&Seed) -> Result<Prompt> + Send + Sync>;
type SolveFn = Box<dyn Fn(&Seed) -> Result<String> + Send + Sync>;
type ExplainFn = Box<dyn Fn(&Seed) -> Explanation + Send + Sync>;

/// Closure-backed template for quick one-off question families.
///
/// ```ignore
/// let add = Q::new(
///   || Seed::Pair(rng(1..=10), rng(1..=10)),
///   |s| { let (a, b) = s.pair()?; Ok(Prompt::simple(format!("What is {a} + {b}?"))) },
///   |s| { let (a, b) = s.pair()?; Ok((a + b).to_string()) },
/// );
/// ```
pub struct Q {
  seed_fn: SeedFn,
  prompt_fn: PromptFn,
  solve_fn: SolveFn,
  matcher: Matcher,
  explain_fn: Option<ExplainFn>,
}

impl Q {
  pub fn new<S, P, C>(seed: S, prompt: P, solve: C) -> Self
  where
    S: Fn() -> Seed + Send + Sync + 'static,
    P: Fn(&Seed) -> Result<Prompt> + Send + Sync + 'static,
    C: Fn(&Seed) -> Result<String> + Send + Sync + 'static,
  {
    Self {
      seed_fn: Box::new(seed),
      prompt_fn: Box::new(prompt),
      solve_fn: Box::new(solve),
      matcher: Matcher::default(),
      explain_fn: None,
    }
  }

  pub fn with_matcher(mut self, matcher: Matcher) -> Self {
    self.matcher = matcher;
    self
  }

  pub fn with_explain<E>(mut self, explain: E) -> Self
  where
    E: Fn(&Seed) -> Explanation + Send + Sync + 'static,
  {
    self.explain_fn = Some(Box::new(explain));
    self
  }

  pub fn shared(self) -> SharedTemplate { Arc::new(self) }
}

impl QuestionTemplate for Q {
  fn seed(&self) -> Seed { (self.seed_fn)() }

  fn prompt(&self, seed: &Seed) -> Result<Prompt> { (self.prompt_fn)(seed) }

  fn solve(&self, seed: &Seed) -> Result<String> { (self.solve_fn)(seed) }

  fn matches(&self, canonical: &str, submitted: &str) -> bool {
    self.matcher.matches(canonical, submitted)
  }

  fn explain(&self, seed: &Seed) -> Explanation {
    match &self.explain_fn {
      Some(f) => f(seed),
      None => Explanation::TextDiff,
    }
  }
}

/// Uniform draw from `1..=10` for both halves of a pair.
pub fn small_pair() -> Seed {
  let mut rng = rand::thread_rng();
  Seed::Pair(rng.gen_range(1..=10), rng.gen_range(1..=10))
}
