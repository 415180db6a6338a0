use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::error::AppError;

/// Bearer token from the Authorization header. Both `Bearer <token>` and a
/// bare token are accepted.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Token presented on a protected route; absent means not signed in.
pub struct AccessToken(pub String);

impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(&parts.headers)
            .map(|token| AccessToken(token.to_string()))
            .ok_or(AppError::NotSignedIn)
    }
}

/// `Authorization: Basic base64(username:password)` used by sign-in.
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("Missing Authorization header".to_string()))?;

        let encoded = auth_header
            .strip_prefix("Basic ")
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization format".to_string()))?;

        let decoded = base64_simd::STANDARD
            .decode_to_vec(encoded.trim())
            .map_err(|e| AppError::BadRequest(format!("Invalid credentials encoding: {}", e)))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AppError::BadRequest("Credentials are not valid UTF-8".to_string()))?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| AppError::BadRequest("Credentials must be username:password".to_string()))?;

        Ok(BasicCredentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_forms() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
