//! Templates built from static prompt -> answer mappings.
//!
//! `StaticBank::from_dict` covers the common case of a fixed question list.
//! `from_dicts` builds several named banks at once and can add reversed banks
//! (answer becomes the prompt) for vocabulary-pair drilling.

use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
};

use rand::Rng;
use tracing::debug;

use crate::domain::{Matcher, Mode, Prompt, QuestionTemplate, Seed, SharedTemplate, BLANK};
use crate::error::{QuizError, Result};

/// Suffix appended to the category name of a reversed bank.
pub const REVERSED_SUFFIX: &str = " (reversed)";

#[derive(Clone, Debug)]
pub struct StaticBank {
  entries: Vec<(String, String)>,
  index: HashMap<String, usize>,
  mode: Mode,
  matcher: Matcher,
}

impl StaticBank {
  /// Build a bank from `prompt -> answer` pairs. A repeated prompt keeps the last answer.
  pub fn from_dict<I, K, V>(mapping: I, mode: Mode, case_sensitive: bool) -> Result<Self>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (k, v) in mapping {
      let prompt: String = k.into();
      let answer: String = v.into();
      if answer.is_empty() {
        return Err(QuizError::Configuration(format!("empty answer for prompt {:?}", prompt)));
      }
      if mode == Mode::Fill && prompt.matches(BLANK).count() != 1 {
        return Err(QuizError::Configuration(format!(
          "fill prompt {:?} must contain exactly one {}",
          prompt, BLANK
        )));
      }
      match index.get(&prompt) {
        Some(&i) => entries[i].1 = answer,
        None => {
          index.insert(prompt.clone(), entries.len());
          entries.push((prompt, answer));
        }
      }
    }
    if entries.is_empty() {
      return Err(QuizError::Configuration("question bank is empty".into()));
    }
    Ok(Self { entries, index, mode, matcher: Matcher::case_sensitive(case_sensitive) })
  }

  /// Swap prompts and answers. Reversed banks always use `simple` mode, and a
  /// repeated answer keeps its first prompt.
  pub fn reversed(&self) -> Result<Self> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::with_capacity(self.entries.len());
    for (prompt, answer) in &self.entries {
      if seen.insert(answer.as_str()) {
        pairs.push((answer.clone(), prompt.clone()));
      }
    }
    let case_sensitive = self.matcher == Matcher::CaseSensitive;
    Self::from_dict(pairs, Mode::Simple, case_sensitive)
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn prompts(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(p, _)| p.as_str())
  }

  fn lookup(&self, seed: &Seed) -> Result<&(String, String)> {
    let key = seed.key()?;
    self
      .index
      .get(key)
      .map(|&i| &self.entries[i])
      .ok_or_else(|| QuizError::InvalidSeed(format!("unknown prompt {:?}", key)))
  }
}

impl QuestionTemplate for StaticBank {
  fn seed(&self) -> Seed {
    let i = rand::thread_rng().gen_range(0..self.entries.len());
    Seed::Key(self.entries[i].0.clone())
  }

  fn prompt(&self, seed: &Seed) -> Result<Prompt> {
    let (text, _) = self.lookup(seed)?;
    Ok(Prompt::new(text.clone(), self.mode))
  }

  fn solve(&self, seed: &Seed) -> Result<String> {
    let (_, answer) = self.lookup(seed)?;
    Ok(answer.clone())
  }

  fn matches(&self, canonical: &str, submitted: &str) -> bool {
    self.matcher.matches(canonical, submitted)
  }
}

/// Build one named template per mapping. With `reverse`, every bank is followed
/// by its reversed twin named `"<name> (reversed)"`.
pub fn from_dicts<M, K, V, N>(
  mappings: Vec<M>,
  names: Vec<N>,
  mode: Mode,
  case_sensitive: bool,
  reverse: bool,
) -> Result<Vec<(String, SharedTemplate)>>
where
  M: IntoIterator<Item = (K, V)>,
  K: Into<String>,
  V: Into<String>,
  N: Into<String>,
{
  if mappings.len() != names.len() {
    return Err(QuizError::Configuration(format!(
      "got {} mappings but {} names",
      mappings.len(),
      names.len()
    )));
  }

  let mut out: Vec<(String, SharedTemplate)> = Vec::new();
  for (mapping, name) in mappings.into_iter().zip(names) {
    let name = name.into();
    let bank = StaticBank::from_dict(mapping, mode, case_sensitive)?;
    debug!(target: "quiz", %name, size = bank.len(), reverse, "Built static bank");
    if reverse {
      let rev = bank.reversed()?;
      out.push((name.clone(), Arc::new(bank) as SharedTemplate));
      out.push((format!("{}{}", name, REVERSED_SUFFIX), Arc::new(rev) as SharedTemplate));
    } else {
      out.push((name, Arc::new(bank) as SharedTemplate));
    }
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Explanation;

  fn capitals() -> StaticBank {
    StaticBank::from_dict(
      [("The capital of France is [...].", "Paris"), ("The largest planet is [...].", "Jupiter")],
      Mode::Fill,
      false,
    )
    .unwrap()
  }

  #[test]
  fn every_key_round_trips() {
    let bank = capitals();
    let keys: Vec<String> = bank.prompts().map(String::from).collect();
    for key in keys {
      let seed = Seed::Key(key);
      let answer = bank.solve(&seed).unwrap();
      assert!(bank.matches(&answer, &answer));
    }
  }

  #[test]
  fn seeds_come_from_the_bank() {
    let bank = capitals();
    for _ in 0..20 {
      let seed = bank.seed();
      let prompt = bank.prompt(&seed).unwrap();
      assert_eq!(prompt.mode, Mode::Fill);
      assert_eq!(Seed::Key(prompt.text.clone()), seed);
      assert!(prompt.context.is_empty() && prompt.hints.is_empty());
    }
  }

  #[test]
  fn insensitive_by_default() {
    let bank = capitals();
    let seed = Seed::Key("The capital of France is [...].".into());
    let answer = bank.solve(&seed).unwrap();
    assert!(bank.matches(&answer, "paris"));
    assert!(!bank.matches(&answer, "pariss"));
    assert_eq!(bank.explain(&seed), Explanation::TextDiff);
  }

  #[test]
  fn case_sensitive_bank() {
    let bank = StaticBank::from_dict([("Enter the secret code:", "ABC123")], Mode::Simple, true).unwrap();
    assert!(!bank.matches("ABC123", "abc123"));
    assert!(bank.matches("ABC123", "ABC123"));
  }

  #[test]
  fn empty_bank_is_a_configuration_error() {
    let empty: Vec<(String, String)> = Vec::new();
    assert!(matches!(StaticBank::from_dict(empty, Mode::Simple, false), Err(QuizError::Configuration(_))));
  }

  #[test]
  fn fill_prompt_needs_one_blank() {
    let res = StaticBank::from_dict([("No blank here", "x")], Mode::Fill, false);
    assert!(matches!(res, Err(QuizError::Configuration(_))));
  }

  #[test]
  fn unknown_key_is_an_invalid_seed() {
    let bank = capitals();
    assert!(matches!(bank.solve(&Seed::Key("nope".into())), Err(QuizError::InvalidSeed(_))));
    assert!(matches!(bank.prompt(&Seed::Pair(1, 2)), Err(QuizError::InvalidSeed(_))));
  }

  #[test]
  fn from_dicts_with_reverse() {
    let built = from_dicts(
      vec![vec![("hola", "hello"), ("adiós", "goodbye")], vec![("uno", "one")]],
      vec!["greetings", "numbers"],
      Mode::Simple,
      false,
      true,
    )
    .unwrap();
    let names: Vec<&str> = built.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["greetings", "greetings (reversed)", "numbers", "numbers (reversed)"]);

    let reversed = &built[1].1;
    let seed = Seed::Key("hello".into());
    assert_eq!(reversed.prompt(&seed).unwrap().text, "hello");
    assert_eq!(reversed.solve(&seed).unwrap(), "hola");
  }

  #[test]
  fn from_dicts_rejects_mismatched_lengths() {
    let res = from_dicts(vec![vec![("a", "b")]], Vec::<String>::new(), Mode::Simple, false, false);
    assert!(matches!(res, Err(QuizError::Configuration(_))));
  }

  #[test]
  fn reversed_keeps_first_prompt_for_shared_answers() {
    let bank = StaticBank::from_dict([("2 + 2", "4"), ("3 + 1", "4")], Mode::Simple, false).unwrap();
    let rev = bank.reversed().unwrap();
    assert_eq!(rev.len(), 1);
    assert_eq!(rev.solve(&Seed::Key("4".into())).unwrap(), "2 + 2");
  }
}
