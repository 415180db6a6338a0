use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;

use crate::api::extract::{bearer_token, AccessToken, BasicCredentials};
use crate::api::state::AppState;
use crate::db::{User, UserDraft};
use crate::error::AppError;
use crate::service::{Outcome, SIGNED_IN, SIGNED_OUT, USER_REGISTERED};

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub id: String,
    pub message: &'static str,
    pub access_token: String,
    pub expires_at: i64,
}

/// POST /user/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<Outcome>), AppError> {
    let user = state.auth.sign_up(&draft).await?;
    Ok((StatusCode::CREATED, Json(Outcome::new(user.uuid, USER_REGISTERED))))
}

/// POST /user/signin
pub async fn signin(
    State(state): State<AppState>,
    credentials: BasicCredentials,
) -> Result<([(&'static str, String); 1], Json<SigninResponse>), AppError> {
    let principal = state
        .auth
        .sign_in(&credentials.username, &credentials.password)
        .await?;

    let token = principal.session.access_token;
    Ok((
        [("access-token", token.clone())],
        Json(SigninResponse {
            id: principal.user.uuid,
            message: SIGNED_IN,
            access_token: token,
            expires_at: principal.session.expires_at,
        }),
    ))
}

/// POST /user/signout
pub async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Outcome>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::NotSignedInForSignOut)?;
    let user_uuid = state.auth.sign_out(token).await?;
    Ok(Json(Outcome::new(user_uuid, SIGNED_OUT)))
}

/// GET /userprofile/{user_id} (requires auth)
pub async fn profile(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = state.profiles.get(&token, &user_id).await?;
    Ok(Json(user))
}
