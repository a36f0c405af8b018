//! Core request behaviors shared by the HTTP handlers and play mode.
//!
//! Both operations are stateless: the seed handed out by `next_question` is
//! the only thing `submit_answer` needs, and it is trusted as-is.

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, instrument};

use crate::domain::Seed;
use crate::error::{QuizError, Result};
use crate::protocol::{QuestionOut, SubmitOut};
use crate::registry::QuizEntry;

/// Pick one of `categories` uniformly, draw a seed from its template and render it.
#[instrument(level = "info", skip(quiz, rng), fields(quiz = %quiz.identifier, selected = categories.len()))]
pub fn next_question_with<R: Rng + ?Sized>(quiz: &QuizEntry, categories: &[String], rng: &mut R) -> Result<QuestionOut> {
  // Validate the whole selection up front so a bad name never hides behind a lucky draw.
  for c in categories {
    quiz.template(c)?;
  }
  let category = categories
    .choose(rng)
    .ok_or_else(|| QuizError::InvalidCategory("no categories selected".into()))?;

  let template = quiz.template(category)?;
  let seed = template.seed();
  let prompt = template.prompt(&seed)?;
  debug!(target: "quiz", %category, %seed, "Drew question");
  Ok(QuestionOut::new(category.clone(), seed, prompt))
}

pub fn next_question(quiz: &QuizEntry, categories: &[String]) -> Result<QuestionOut> {
  next_question_with(quiz, categories, &mut rand::thread_rng())
}

/// Score `answer` against the canonical answer for `seed`.
#[instrument(level = "info", skip(quiz, answer), fields(quiz = %quiz.identifier, %category, answer_len = answer.len()))]
pub fn submit_answer(quiz: &QuizEntry, category: &str, seed: &Seed, answer: &str) -> Result<SubmitOut> {
  let template = quiz.template(category)?;
  let canonical = template.solve(seed)?;
  let correct = template.matches(&canonical, answer);
  let explanation = template.explain(seed);
  debug!(target: "quiz", %category, %seed, %correct, "Scored answer");
  Ok(SubmitOut {
    correct,
    submitted_answer: answer.to_string(),
    correct_answer: canonical,
    explanation,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bank::StaticBank;
  use crate::catalog::addition;
  use crate::domain::{Explanation, Mode, SharedTemplate};
  use crate::registry::Registry;
  use rand::{rngs::StdRng, SeedableRng};
  use std::sync::Arc;

  fn math() -> Registry {
    let spanish: SharedTemplate = Arc::new(
      StaticBank::from_dict([("How do you say 'Hello' in Spanish?", "Hola")], Mode::Simple, false).unwrap(),
    );
    let mut reg = Registry::new();
    reg.register("math", "Math", [("addition", addition().shared())]).unwrap();
    reg.register("spanish", "Spanish", [("basics", spanish)]).unwrap();
    reg
  }

  #[test]
  fn next_draws_from_the_selected_category() {
    let reg = math();
    let quiz = reg.get("math").unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
      let q = next_question_with(quiz, &["addition".to_string()], &mut rng).unwrap();
      assert_eq!(q.category, "addition");
      let (a, b) = q.seed.pair().unwrap();
      assert!((1..=10).contains(&a) && (1..=10).contains(&b));
      assert_eq!(q.mode, Mode::Simple);
      assert_eq!(q.text, format!("What is {} + {}?", a, b));
    }
  }

  #[test]
  fn empty_selection_is_rejected() {
    let reg = math();
    let res = next_question(reg.get("math").unwrap(), &[]);
    assert!(matches!(res, Err(QuizError::InvalidCategory(_))));
  }

  #[test]
  fn unknown_category_is_rejected_even_if_mixed_with_valid_ones() {
    let reg = math();
    let quiz = reg.get("math").unwrap();
    let res = next_question(quiz, &["addition".to_string(), "basics".to_string()]);
    assert!(matches!(res, Err(QuizError::InvalidCategory(_))));
  }

  #[test]
  fn submit_scores_answers() {
    let reg = math();
    let quiz = reg.get("math").unwrap();
    let ok = submit_answer(quiz, "addition", &Seed::Pair(2, 2), "4").unwrap();
    assert!(ok.correct);
    assert_eq!(ok.correct_answer, "4");
    assert_eq!(ok.submitted_answer, "4");
    assert_eq!(ok.explanation, Explanation::TextDiff);

    let bad = submit_answer(quiz, "addition", &Seed::Pair(2, 2), "5").unwrap();
    assert!(!bad.correct);
    assert_eq!(bad.correct_answer, "4");
  }

  #[test]
  fn submit_never_crosses_quizzes() {
    let reg = math();
    let res = submit_answer(reg.get("math").unwrap(), "basics", &Seed::Key("x".into()), "Hola");
    assert!(matches!(res, Err(QuizError::InvalidCategory(_))));
  }

  #[test]
  fn submit_rejects_foreign_seeds() {
    let reg = math();
    let res = submit_answer(reg.get("math").unwrap(), "addition", &Seed::Key("2 + 2".into()), "4");
    assert!(matches!(res, Err(QuizError::InvalidSeed(_))));
  }
}
