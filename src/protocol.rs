//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable so the front-end can evolve independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Explanation, Mode, Prompt, Seed};
use crate::registry::QuizEntry;

/// Lobby entry.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizSummary {
    pub identifier: String,
    pub title: String,
}

impl From<&QuizEntry> for QuizSummary {
    fn from(q: &QuizEntry) -> Self {
        Self {
            identifier: q.identifier.clone(),
            title: q.title.clone(),
        }
    }
}

/// Quiz landing data.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesOut {
    pub title: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextIn {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextOut {
    pub complete: bool,
    pub question: QuestionOut,
}

/// One drawn question. `seed` must come back unchanged on submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOut {
    pub category: String,
    pub seed: Seed,
    pub text: String,
    #[serde(rename = "type")]
    pub mode: Mode,
    pub context: String,
    pub hints: Vec<String>,
}

impl QuestionOut {
    pub fn new(category: String, seed: Seed, prompt: Prompt) -> Self {
        Self {
            category,
            seed,
            text: prompt.text,
            mode: prompt.mode,
            context: prompt.context,
            hints: prompt.hints,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitIn {
    pub category: String,
    pub seed: Seed,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOut {
    pub correct: bool,
    pub submitted_answer: String,
    pub correct_answer: String,
    pub explanation: Explanation,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
