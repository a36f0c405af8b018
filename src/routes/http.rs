//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{
  async_trait,
  extract::{FromRequest, FromRequestParts, Path, State},
  http::request::Parts,
  Json,
  response::IntoResponse,
};
use tracing::{info, instrument};

use crate::error::{QuizError, Result};
use crate::logic::{next_question, submit_answer};
use crate::protocol::*;
use crate::state::AppState;

/// JSON body extractor whose rejections use our JSON error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(QuizError))]
pub struct AppJson<T>(pub T);

/// `/:quiz` path segment naming a registered quiz. Resolved from the request
/// parts, so an unknown quiz is reported before the body is parsed.
pub struct QuizPath(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for QuizPath {
  type Rejection = QuizError;

  async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self> {
    let Path(quiz) = Path::<String>::from_request_parts(parts, state)
      .await
      .map_err(|e| QuizError::BadRequest(e.body_text()))?;
    state.registry.get(&quiz)?;
    Ok(Self(quiz))
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_list_quizzes(State(state): State<Arc<AppState>>) -> Json<Vec<QuizSummary>> {
  Json(state.registry.quizzes().map(QuizSummary::from).collect())
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_categories(
  State(state): State<Arc<AppState>>,
  Path(quiz): Path<String>,
) -> Result<Json<CategoriesOut>> {
  let entry = state.registry.get(&quiz)?;
  Ok(Json(CategoriesOut { title: entry.title.clone(), categories: entry.category_names() }))
}

#[instrument(level = "info", skip(state, body), fields(selected = ?body.categories))]
pub async fn http_post_next(
  State(state): State<Arc<AppState>>,
  QuizPath(quiz): QuizPath,
  AppJson(body): AppJson<NextIn>,
) -> Result<Json<NextOut>> {
  let entry = state.registry.get(&quiz)?;
  let question = next_question(entry, &body.categories)?;
  info!(target: "quiz", %quiz, category = %question.category, "HTTP next question served");
  Ok(Json(NextOut { complete: false, question }))
}

#[instrument(level = "info", skip(state, body), fields(category = %body.category, answer_len = body.answer.len()))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  QuizPath(quiz): QuizPath,
  AppJson(body): AppJson<SubmitIn>,
) -> Result<Json<SubmitOut>> {
  let entry = state.registry.get(&quiz)?;
  let out = submit_answer(entry, &body.category, &body.seed, &body.answer)?;
  info!(target: "quiz", %quiz, category = %body.category, correct = out.correct, "HTTP answer evaluated");
  Ok(Json(out))
}
