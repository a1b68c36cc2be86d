use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        extractors::AuthUser,
        repo_types::{Role, User},
        services::ensure_self_or_admin,
    },
    clock,
    error::ApiError,
    inference::classify_or_neutral,
    sentiments::{
        dto::{AllUsersSentiments, AnalyzeResponse, SentimentHistoryItem, TextInput},
        repo::SentimentEntry,
        services::validate_text,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/chat-history/:identifier", get(chat_history))
        .route("/admin/all-users-sentiments", get(all_users_sentiments))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

#[instrument(skip(state, user, payload))]
pub async fn analyze(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<TextInput>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    validate_text(&payload.text)?;

    let sentiment = classify_or_neutral(state.classifier.as_ref(), &payload.text).await;

    let now = clock::now_ist();
    SentimentEntry::record(&state.db, user.id, &payload.text, sentiment.as_str(), now).await?;

    info!(identifier = %user.identifier, sentiment = %sentiment, "sentiment entry recorded");
    Ok(Json(AnalyzeResponse {
        sentiment,
        timestamp: now,
    }))
}

#[instrument(skip(state, actor))]
pub async fn chat_history(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(identifier): Path<String>,
) -> Result<Json<Vec<SentimentHistoryItem>>, ApiError> {
    ensure_self_or_admin(&actor, &identifier)?;

    let user = User::find_by_identifier(&state.db, &identifier)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let entries = SentimentEntry::history_for(&state.db, user.id).await?;
    let items = entries
        .into_iter()
        .map(|e| SentimentHistoryItem {
            text: e.text,
            sentiment: e.sentiment,
            timestamp: e.timestamp.to_offset(clock::IST),
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, actor))]
pub async fn all_users_sentiments(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<AllUsersSentiments>, ApiError> {
    if actor.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }

    let rows = SentimentEntry::all_with_owners(&state.db).await?;
    let mut result = AllUsersSentiments::new();
    for row in rows {
        result
            .entry(row.identifier)
            .or_default()
            .insert(row.text, row.sentiment);
    }
    Ok(Json(result))
}
