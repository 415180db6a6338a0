use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::extract::AccessToken;
use crate::api::state::AppState;
use crate::error::AppError;
use crate::service::{AnswerDetails, Outcome};

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerEditRequest {
    pub content: String,
}

/// POST /question/{question_id}/answer/create (requires auth)
pub async fn create(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(question_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<(StatusCode, Json<Outcome>), AppError> {
    let outcome = state.answers.create(&token, &question_id, &req.answer).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// PUT /answer/edit/{answer_id} (requires auth)
pub async fn edit(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(answer_id): Path<String>,
    Json(req): Json<AnswerEditRequest>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state.answers.edit(&token, &answer_id, &req.content).await?;
    Ok(Json(outcome))
}

/// DELETE /answer/delete/{answer_id} (requires auth)
pub async fn delete(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(answer_id): Path<String>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state.answers.delete(&token, &answer_id).await?;
    Ok(Json(outcome))
}

/// GET /answer/all/{question_id} (requires auth)
pub async fn list_by_question(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(question_id): Path<String>,
) -> Result<Json<Vec<AnswerDetails>>, AppError> {
    let answers = state.answers.list_by_question(&token, &question_id).await?;
    Ok(Json(answers))
}
