use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::extract::AccessToken;
use crate::api::state::AppState;
use crate::error::AppError;
use crate::service::Outcome;

/// DELETE /admin/user/{user_id} (requires admin)
pub async fn delete_user(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(user_id): Path<String>,
) -> Result<Json<Outcome>, AppError> {
    let outcome = state.admin.delete_user(&token, &user_id).await?;
    Ok(Json(outcome))
}
