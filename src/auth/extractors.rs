use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::repo_types::User;
use crate::auth::services::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the bearer token, validates it and resolves the subject to its
/// user record. Protected handlers take this as an argument.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::InvalidToken)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::InvalidToken)?;

        let claims = JwtKeys::from_ref(state).verify(token)?;

        let user = User::find_by_identifier(&state.db, &claims.sub)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        Ok(AuthUser(user))
    }
}
