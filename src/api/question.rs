use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::extract::AccessToken;
use crate::api::state::AppState;
use crate::db::Question;
use crate::error::AppError;
use crate::service::Outcome;

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionDetailsResponse {
    pub id: String,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.uuid,
            content: question.content,
        }
    }
}

fn details(questions: Vec<Question>) -> Vec<QuestionDetailsResponse> {
    questions.into_iter().map(Into::into).collect()
}

/// POST /question/create (requires auth)
pub async fn create(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(req): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<Outcome>), AppError> {
    let outcome = state.questions.create(&token, &req.content).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /question/all (requires auth)
pub async fn list(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<Json<Vec<QuestionDetailsResponse>>, AppError> {
    let questions = state.questions.list(&token).await?;
    Ok(Json(details(questions)))
}

/// PUT /question/edit/{question_id} (requires auth)
pub async fn edit(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(question_id): Path<String>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state.questions.edit(&token, &question_id, &req.content).await?;
    Ok(Json(outcome))
}

/// DELETE /question/delete/{question_id} (requires auth)
pub async fn delete(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(question_id): Path<String>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state.questions.delete(&token, &question_id).await?;
    Ok(Json(outcome))
}

/// GET /question/all/{user_id} (requires auth)
pub async fn list_by_user(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, AppError> {
    let questions = state.questions.list_by_user(&token, &user_id).await?;
    Ok(Json(details(questions)))
}
