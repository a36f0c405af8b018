//! ezquiz: question templates and a small HTTP quiz server.
//!
//! A `QuestionTemplate` draws a seed, renders it, and scores answers. The
//! `Registry` groups templates into quizzes by category, and `routes` exposes
//! them over HTTP with two stateless calls (`next`, `submit`).

pub mod bank;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod domain;
pub mod error;
pub mod logic;
pub mod play;
pub mod protocol;
pub mod registry;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use domain::{Explanation, Matcher, Mode, Prompt, QuestionTemplate, Seed, SharedTemplate, Q};
pub use error::{QuizError, Result};
pub use registry::{QuizEntry, Registry};
