//! Terminal play mode: one player, one quiz, counters kept in memory.
//!
//! Drives the same `next_question` / `submit_answer` pair the HTTP API uses,
//! so the seed round-trip is exercised exactly as a web client would.

use std::{
    io::{BufRead, Write},
    time::{Duration, Instant},
};

use clap::ValueEnum;
use tracing::{info, warn};

use crate::diff;
use crate::domain::{Explanation, Mode};
use crate::error::{QuizError, Result};
use crate::logic::{next_question, submit_answer};
use crate::registry::QuizEntry;

/// When a session ends. The numeric parameter is passed separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayMode {
    /// Stop after N seconds (checked between questions).
    Timed,
    /// Stop after N correct answers.
    Score,
    /// Stop after N mistakes.
    Mistakes,
    /// Stop after N questions.
    Total,
    /// Stop after N correct answers in a row.
    Streak,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub category: String,
    pub prompt: String,
    pub submitted: String,
    pub correct_answer: String,
    pub correct: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    pub score: u32,
    pub mistakes: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub history: Vec<HistoryEntry>,
}

impl Session {
    pub fn record(&mut self, entry: HistoryEntry) {
        if entry.correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.mistakes += 1;
            self.streak = 0;
        }
        self.history.push(entry);
    }

    pub fn total(&self) -> u32 {
        self.score + self.mistakes
    }

    pub fn finished(&self, mode: PlayMode, param: u32, elapsed: Duration) -> bool {
        match mode {
            PlayMode::Timed => elapsed >= Duration::from_secs(u64::from(param)),
            PlayMode::Score => self.score >= param,
            PlayMode::Mistakes => self.mistakes >= param,
            PlayMode::Total => self.total() >= param,
            PlayMode::Streak => self.streak >= param,
        }
    }
}

/// Run a session until `mode`/`param` says stop or `input` hits EOF.
/// An empty `categories` selection plays every category of the quiz.
pub fn play<R: BufRead, W: Write>(
    quiz: &QuizEntry,
    categories: &[String],
    mode: PlayMode,
    param: u32,
    mut input: R,
    mut out: W,
) -> Result<Session> {
    let selected = if categories.is_empty() { quiz.category_names() } else { categories.to_vec() };
    // Fail before the first prompt rather than mid-session.
    for c in &selected {
        quiz.template(c)?;
    }

    writeln!(out, "== {} ==", quiz.title)?;
    let started = Instant::now();
    let mut session = Session::default();

    while !session.finished(mode, param, started.elapsed()) {
        let q = next_question(quiz, &selected)?;
        writeln!(out)?;
        writeln!(out, "[{}]", q.category)?;
        if !q.context.is_empty() {
            writeln!(out, "  ({})", q.context)?;
        }
        match q.mode {
            Mode::Simple => writeln!(out, "{}", q.text)?,
            Mode::Fill => writeln!(out, "Fill in the blank: {}", q.text)?,
        }
        for hint in &q.hints {
            writeln!(out, "  hint: {}", hint)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let answer = line.trim();

        let result = match submit_answer(quiz, &q.category, &q.seed, answer) {
            Ok(r) => r,
            Err(e @ QuizError::InvalidSeed(_)) => {
                warn!(target: "quiz", category = %q.category, error = %e, "Template rejected its own seed; skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        if result.correct {
            writeln!(out, "Correct!")?;
        } else {
            writeln!(out, "Incorrect. Correct answer: {}", result.correct_answer)?;
            match &result.explanation {
                Explanation::TextDiff => writeln!(out, "{}", diff::render(answer, &result.correct_answer))?,
                Explanation::Text { value } => writeln!(out, "Explanation: {}", value)?,
            }
        }

        session.record(HistoryEntry {
            category: q.category,
            prompt: q.text,
            submitted: result.submitted_answer,
            correct_answer: result.correct_answer,
            correct: result.correct,
        });
    }

    writeln!(
        out,
        "\nscore {} | mistakes {} | best streak {} | questions {}",
        session.score,
        session.mistakes,
        session.best_streak,
        session.total()
    )?;
    info!(target: "quiz", quiz = %quiz.identifier, score = session.score, mistakes = session.mistakes, "Play session finished");
    Ok(session)
}
