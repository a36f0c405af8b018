//! Built-in quizzes that make the server useful without any config file.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::info;

use crate::bank::{from_dicts, StaticBank};
use crate::domain::{small_pair, Explanation, Mode, Prompt, QuestionTemplate, Q, Seed, SharedTemplate, BLANK};
use crate::error::{QuizError, Result};
use crate::registry::Registry;

/// Register every built-in quiz.
pub fn register_builtin(reg: &mut Registry) -> Result<()> {
  reg.register("math", "Basic Mathematics", math_categories())?;
  reg.register("fill", "Fill Mode", fill_categories()?)?;
  reg.register("geography", "World Geography", geography_categories()?)?;
  reg.register("spanish", "Spanish Basics", spanish_categories())?;
  info!(target: "ezquiz", quizzes = reg.len(), "Built-in catalog registered");
  Ok(())
}

pub fn addition() -> Q {
  Q::new(
    small_pair,
    |s| {
      let (a, b) = s.pair()?;
      Ok(Prompt::simple(format!("What is {} + {}?", a, b)))
    },
    |s| {
      let (a, b) = s.pair()?;
      a.checked_add(b)
        .map(|n| n.to_string())
        .ok_or_else(|| QuizError::InvalidSeed(format!("{} + {} overflows", a, b)))
    },
  )
}

pub fn multiplication() -> Q {
  Q::new(
    small_pair,
    |s| {
      let (a, b) = s.pair()?;
      Ok(Prompt::simple(format!("What is {} * {}?", a, b)))
    },
    |s| {
      let (a, b) = s.pair()?;
      a.checked_mul(b)
        .map(|n| n.to_string())
        .ok_or_else(|| QuizError::InvalidSeed(format!("{} * {} overflows", a, b)))
    },
  )
}

fn math_categories() -> Vec<(&'static str, SharedTemplate)> {
  vec![("addition", addition().shared()), ("multiplication", multiplication().shared())]
}

fn fill_categories() -> Result<Vec<(String, SharedTemplate)>> {
  let misc = StaticBank::from_dict(
    [
      ("The capital of France is [...].", "Paris"),
      ("The largest planet in our solar system is [...].", "Jupiter"),
      ("Water freezes at [...] degrees Celsius.", "0"),
      ("The chemical symbol for gold is [...].", "Au"),
      ("Shakespeare wrote [...].", "Hamlet"),
    ],
    Mode::Fill,
    false,
  )?;
  let math_fill = StaticBank::from_dict(
    [
      ("2 + [...] = 5", "3"),
      ("[...] * 7 = 49", "7"),
      ("The square root of [...] is 8.", "64"),
      ("10 - [...] = 3", "7"),
      ("[...] + 15 = 30", "15"),
    ],
    Mode::Fill,
    false,
  )?;
  let word_problems = StaticBank::from_dict(
    [
      ("If you have 3 apples and get [...] more, you'll have 7 apples.", "4"),
      ("A rectangle has width 5 and length [...], so its area is 35.", "7"),
      ("The temperature was 20°C, then dropped [...] degrees to reach 12°C.", "8"),
    ],
    Mode::Fill,
    false,
  )?;

  let mut out: Vec<(String, SharedTemplate)> = vec![
    ("misc_fill".into(), Arc::new(misc) as SharedTemplate),
    ("math_fill".into(), Arc::new(math_fill) as SharedTemplate),
    ("fill_word_problems".into(), Arc::new(word_problems) as SharedTemplate),
  ];
  out.extend(from_dicts(
    vec![
      vec![("What is 2 + 2?", "4"), ("What is 5 + 3?", "8"), ("What is 10 + 5?", "15")],
      vec![("What is 3 * 4?", "12"), ("What is 6 * 7?", "42"), ("What is 8 * 9?", "72")],
    ],
    vec!["easy_addition", "easy_multiplication"],
    Mode::Simple,
    false,
    false,
  )?);
  Ok(out)
}

fn geography_categories() -> Result<Vec<(String, SharedTemplate)>> {
  from_dicts(
    vec![
      vec![
        ("What is the capital of France?", "Paris"),
        ("What is the capital of Japan?", "Tokyo"),
        ("What is the capital of Brazil?", "Brasília"),
      ],
      vec![("Which continent is Egypt in?", "Africa"), ("Which continent is Australia in?", "Australia")],
    ],
    vec!["basics", "regions"],
    Mode::Simple,
    false,
    true,
  )
}

const PHRASES: [(&str, &str, &str); 3] = [
  ("Mi [...] es John!", "nombre", "My name is John!"),
  ("Hola, ¿cómo [...]?", "estás", "Hello, how are you?"),
  ("Buenos [...]", "días", "Good morning"),
];

/// Fill-in phrases shown with their English translation as context.
pub fn phrases() -> Q {
  Q::new(
    || {
      let (text, answer, context) = PHRASES.choose(&mut rand::thread_rng()).copied().unwrap_or(PHRASES[0]);
      Seed::Record(vec![text.into(), answer.into(), context.into()])
    },
    |s| {
      let f = s.record(3)?;
      Ok(Prompt::fill(f[0].clone()).with_context(f[2].clone()))
    },
    |s| Ok(s.record(3)?[1].clone()),
  )
}

const VERBS: [&str; 12] = [
  "hablar", "comprar", "estudiar", "trabajar",
  "comer", "beber", "leer", "aprender",
  "vivir", "escribir", "abrir", "recibir",
];

const CLASSES: [&str; 3] = ["ar", "er", "ir"];

// Endings per subject, indexed like CLASSES.
const SUBJECTS: [(&str, [&str; 3]); 5] = [
  ("Yo", ["o", "o", "o"]),
  ("Tú", ["as", "es", "es"]),
  ("Él/Ella", ["a", "e", "e"]),
  ("Nosotros", ["amos", "emos", "imos"]),
  ("Ellos", ["an", "en", "en"]),
];

/// Present-tense conjugation of regular -ar/-er/-ir verbs.
pub struct Conjugation;

impl Conjugation {
  /// `(stem, class, ending)` for a `[verb, subject]` seed.
  fn parts(seed: &Seed) -> Result<(String, &'static str, &'static str)> {
    let f = seed.record(2)?;
    let (verb, subject) = (&f[0], &f[1]);
    let endings = SUBJECTS
      .iter()
      .find(|(s, _)| s == subject)
      .map(|(_, e)| e)
      .ok_or_else(|| QuizError::InvalidSeed(format!("unknown subject {:?}", subject)))?;
    for (i, class) in CLASSES.iter().enumerate() {
      if let Some(stem) = verb.strip_suffix(class) {
        return Ok((stem.to_string(), *class, endings[i]));
      }
    }
    Err(QuizError::InvalidSeed(format!("{:?} is not a regular verb", verb)))
  }
}

impl QuestionTemplate for Conjugation {
  fn seed(&self) -> Seed {
    let mut rng = rand::thread_rng();
    let verb = VERBS.choose(&mut rng).copied().unwrap_or(VERBS[0]);
    let (subject, _) = SUBJECTS.choose(&mut rng).copied().unwrap_or(SUBJECTS[0]);
    Seed::Record(vec![verb.into(), subject.into()])
  }

  fn prompt(&self, seed: &Seed) -> Result<Prompt> {
    let f = seed.record(2)?;
    Ok(
      Prompt::fill(format!("{} {} ({})", f[1], BLANK, f[0]))
        .with_context(format!("Conjugate the verb '{}' for '{}'", f[0], f[1])),
    )
  }

  fn solve(&self, seed: &Seed) -> Result<String> {
    let (stem, _, ending) = Self::parts(seed)?;
    Ok(format!("{}{}", stem, ending))
  }

  fn explain(&self, seed: &Seed) -> Explanation {
    match Self::parts(seed) {
      Ok((stem, class, ending)) => Explanation::Text {
        value: format!("-{} verb: stem '{}' + ending '{}'", class, stem, ending),
      },
      Err(_) => Explanation::TextDiff,
    }
  }
}

fn spanish_categories() -> Vec<(&'static str, SharedTemplate)> {
  let conjugation: SharedTemplate = Arc::new(Conjugation);
  vec![("phrases", phrases().shared()), ("regular verbs", conjugation)]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_catalog_registers() {
    let mut reg = Registry::new();
    register_builtin(&mut reg).unwrap();
    let ids: Vec<&str> = reg.quizzes().map(|q| q.identifier.as_str()).collect();
    assert_eq!(ids, ["math", "fill", "geography", "spanish"]);
    assert_eq!(
      reg.get("geography").unwrap().category_names(),
      ["basics", "basics (reversed)", "regions", "regions (reversed)"]
    );
  }

  #[test]
  fn addition_solves_pairs() {
    let q = addition();
    assert_eq!(q.solve(&Seed::Pair(2, 2)).unwrap(), "4");
    assert!(!q.matches("4", "5"));
    assert_eq!(multiplication().solve(&Seed::Pair(6, 7)).unwrap(), "42");
  }

  #[test]
  fn overflowing_pairs_are_invalid_seeds() {
    let seed = Seed::Pair(i64::MAX, 1);
    assert!(matches!(addition().solve(&seed), Err(QuizError::InvalidSeed(_))));
    let seed = Seed::Pair(i64::MIN, -1);
    assert!(matches!(multiplication().solve(&seed), Err(QuizError::InvalidSeed(_))));
    assert_eq!(addition().solve(&Seed::Pair(-3, 1)).unwrap(), "-2");
  }

  #[test]
  fn conjugates_regular_verbs() {
    let c = Conjugation;
    let seed = Seed::Record(vec!["hablar".into(), "Nosotros".into()]);
    assert_eq!(c.solve(&seed).unwrap(), "hablamos");
    let seed = Seed::Record(vec!["vivir".into(), "Tú".into()]);
    assert_eq!(c.solve(&seed).unwrap(), "vives");
    let p = c.prompt(&seed).unwrap();
    assert_eq!(p.text, "Tú [...] (vivir)");
    assert_eq!(p.mode, Mode::Fill);
    assert_eq!(
      c.explain(&seed),
      Explanation::Text { value: "-ir verb: stem 'viv' + ending 'es'".into() }
    );
  }

  #[test]
  fn conjugation_round_trips_for_every_draw() {
    let c = Conjugation;
    for _ in 0..100 {
      let seed = c.seed();
      let answer = c.solve(&seed).unwrap();
      assert!(c.matches(&answer, &answer));
      assert_eq!(c.prompt(&seed).unwrap().text.matches(BLANK).count(), 1);
    }
  }

  #[test]
  fn phrases_carry_context() {
    let q = phrases();
    let seed = q.seed();
    let p = q.prompt(&seed).unwrap();
    assert!(!p.context.is_empty());
    let answer = q.solve(&seed).unwrap();
    assert!(q.matches(&answer, &answer.to_uppercase()));
  }

  #[test]
  fn bad_conjugation_seed() {
    let c = Conjugation;
    let seed = Seed::Record(vec!["ser".into(), "Zorro".into()]);
    assert!(matches!(c.solve(&seed), Err(QuizError::InvalidSeed(_))));
    assert_eq!(c.explain(&seed), Explanation::TextDiff);
  }
}
