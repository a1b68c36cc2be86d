use axum::{
    extract::{FromRef, Path, State},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginHistoryItem, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        extractors::AuthUser,
        repo_types::{LoginEvent, User},
        services::{
            ensure_self_or_admin, hash_password, validate_identifier, validate_password,
            verify_password, JwtKeys,
        },
    },
    clock,
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/login-history/:identifier", get(login_history))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Form(mut payload): Form<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    payload.username = payload.username.trim().to_string();

    validate_identifier(&state.config, &payload.username)?;
    validate_password(&payload.password)?;

    let hash = hash_password(&payload.password)?;

    // No existence pre-check: the unique index decides racing registrations.
    let user = User::create(&state.db, &payload.username, &hash, clock::now_ist()).await?;

    info!(identifier = %user.identifier, "user registered");
    Ok(Json(RegisterResponse {
        msg: "User registered",
        registered_at: user.registered_at.to_offset(clock::IST),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Form(mut payload): Form<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.username = payload.username.trim().to_string();

    validate_identifier(&state.config, &payload.username)?;

    // Unknown identifier and wrong password are indistinguishable to the caller.
    let user = match User::find_by_identifier(&state.db, &payload.username).await? {
        Some(u) => u,
        None => {
            warn!(identifier = %payload.username, "login unknown identifier");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(identifier = %user.identifier, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let now = clock::now_ist();
    User::record_login(&state.db, user.id, now).await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.identifier)?;

    info!(identifier = %user.identifier, "user logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        last_login: now,
        role: user.role,
    }))
}

#[instrument(skip(state, actor))]
pub async fn login_history(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(identifier): Path<String>,
) -> Result<Json<Vec<LoginHistoryItem>>, ApiError> {
    ensure_self_or_admin(&actor, &identifier)?;

    let user = User::find_by_identifier(&state.db, &identifier)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let events = LoginEvent::history(&state.db, user.id).await?;
    let items = events
        .into_iter()
        .map(|e| LoginHistoryItem {
            login_time: e.login_time.to_offset(clock::IST),
        })
        .collect();
    Ok(Json(items))
}
