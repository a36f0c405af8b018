//! Quiz registry: identifier -> `{title, categories}`.
//!
//! Filled once at startup, then shared read-only behind `Arc<AppState>`.
//! Category names are scoped per quiz, so two quizzes may both define `basics`.

use std::fmt;

use tracing::info;

use crate::domain::SharedTemplate;
use crate::error::{QuizError, Result};

pub struct QuizEntry {
    pub identifier: String,
    pub title: String,
    categories: Vec<(String, SharedTemplate)>,
}

impl QuizEntry {
    /// Category names in registration order.
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn template(&self, category: &str) -> Result<&SharedTemplate> {
        self.categories
            .iter()
            .find(|(n, _)| n == category)
            .map(|(_, t)| t)
            .ok_or_else(|| {
                QuizError::InvalidCategory(format!("'{}' is not a category of quiz '{}'", category, self.identifier))
            })
    }
}

impl fmt::Debug for QuizEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEntry")
            .field("identifier", &self.identifier)
            .field("title", &self.title)
            .field("categories", &self.category_names())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    quizzes: Vec<QuizEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quiz under `path` with leading/trailing slashes trimmed.
    pub fn register<I, N>(&mut self, path: &str, title: impl Into<String>, categories: I) -> Result<&QuizEntry>
    where
        I: IntoIterator<Item = (N, SharedTemplate)>,
        N: Into<String>,
    {
        let identifier = normalize_path(path)?;
        if self.quizzes.iter().any(|q| q.identifier == identifier) {
            return Err(QuizError::Configuration(format!("quiz '{}' is already registered", identifier)));
        }

        let mut cats: Vec<(String, SharedTemplate)> = Vec::new();
        for (name, template) in categories {
            let name = name.into();
            if name.is_empty() {
                return Err(QuizError::Configuration(format!("quiz '{}' has an empty category name", identifier)));
            }
            if cats.iter().any(|(n, _)| *n == name) {
                return Err(QuizError::Configuration(format!(
                    "quiz '{}' defines category '{}' twice",
                    identifier, name
                )));
            }
            cats.push((name, template));
        }
        if cats.is_empty() {
            return Err(QuizError::Configuration(format!("quiz '{}' has no categories", identifier)));
        }

        let entry = QuizEntry { identifier, title: title.into(), categories: cats };
        info!(target: "ezquiz", identifier = %entry.identifier, title = %entry.title, categories = entry.categories.len(), "Registered quiz");
        self.quizzes.push(entry);
        Ok(&self.quizzes[self.quizzes.len() - 1])
    }

    pub fn get(&self, identifier: &str) -> Result<&QuizEntry> {
        self.quizzes
            .iter()
            .find(|q| q.identifier == identifier)
            .ok_or_else(|| QuizError::UnknownQuiz(identifier.to_string()))
    }

    /// Quizzes in registration order.
    pub fn quizzes(&self) -> impl Iterator<Item = &QuizEntry> {
        self.quizzes.iter()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

/// Trim surrounding slashes; the result must be one non-empty path segment.
pub fn normalize_path(path: &str) -> Result<String> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(QuizError::Configuration("quiz path cannot be empty".into()));
    }
    if trimmed.contains('/') {
        return Err(QuizError::Configuration(format!("quiz path '{}' must be a single segment", trimmed)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::StaticBank;
    use crate::domain::{Mode, QuestionTemplate, Seed};
    use std::sync::Arc;

    fn bank(q: &str, a: &str) -> SharedTemplate {
        Arc::new(StaticBank::from_dict([(q, a)], Mode::Simple, false).unwrap())
    }

    #[test]
    fn trims_slashes() {
        let mut reg = Registry::new();
        reg.register("/math/", "Math", [("addition", bank("1 + 1", "2"))]).unwrap();
        assert_eq!(reg.get("math").unwrap().identifier, "math");
    }

    #[test]
    fn rejects_bad_paths() {
        assert!(matches!(normalize_path("///"), Err(QuizError::Configuration(_))));
        assert!(matches!(normalize_path(""), Err(QuizError::Configuration(_))));
        assert!(matches!(normalize_path("a/b"), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn rejects_duplicates() {
        let mut reg = Registry::new();
        reg.register("math", "Math", [("a", bank("1 + 1", "2"))]).unwrap();
        let again = reg.register("/math", "Math again", [("a", bank("1 + 1", "2"))]);
        assert!(matches!(again, Err(QuizError::Configuration(_))));

        let twice = reg.register("geo", "Geo", [("x", bank("q", "a")), ("x", bank("q", "a"))]);
        assert!(matches!(twice, Err(QuizError::Configuration(_))));

        let none: Vec<(String, SharedTemplate)> = Vec::new();
        assert!(matches!(reg.register("empty", "Empty", none), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn category_names_are_scoped_per_quiz() {
        let mut reg = Registry::new();
        reg.register("math", "Math", [("basics", bank("What is 2 + 2?", "4"))]).unwrap();
        reg.register("spanish", "Spanish", [("basics", bank("Hello?", "Hola"))]).unwrap();

        let math = reg.get("math").unwrap().template("basics").unwrap();
        let spanish = reg.get("spanish").unwrap().template("basics").unwrap();
        assert_eq!(math.solve(&Seed::Key("What is 2 + 2?".into())).unwrap(), "4");
        assert!(spanish.solve(&Seed::Key("What is 2 + 2?".into())).is_err());
    }

    #[test]
    fn unknown_lookups() {
        let mut reg = Registry::new();
        reg.register("math", "Math", [("basics", bank("1 + 1", "2"))]).unwrap();
        assert!(matches!(reg.get("nope"), Err(QuizError::UnknownQuiz(_))));
        assert!(matches!(reg.get("math").unwrap().template("nope"), Err(QuizError::InvalidCategory(_))));
    }

    #[test]
    fn keeps_registration_order() {
        let mut reg = Registry::new();
        for id in ["zeta", "alpha", "mid"] {
            reg.register(id, id.to_uppercase(), [("c", bank("q", "a"))]).unwrap();
        }
        let ids: Vec<&str> = reg.quizzes().map(|q| q.identifier.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }
}
