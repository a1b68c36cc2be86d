use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;

/// Stored analysis record. The label is kept as text, exactly as produced
/// by the inference collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SentimentEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub sentiment: String,
    pub timestamp: OffsetDateTime,
}

/// One row of the admin aggregation join.
#[derive(Debug, FromRow)]
pub struct UserSentimentRow {
    pub identifier: String,
    pub text: String,
    pub sentiment: String,
}

impl SentimentEntry {
    pub async fn record(
        db: &PgPool,
        user_id: Uuid,
        text: &str,
        sentiment: &str,
        timestamp: OffsetDateTime,
    ) -> Result<SentimentEntry, ApiError> {
        let entry = sqlx::query_as::<_, SentimentEntry>(
            r#"
            INSERT INTO sentiments (user_id, text, sentiment, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, text, sentiment, timestamp
            "#,
        )
        .bind(user_id)
        .bind(text)
        .bind(sentiment)
        .bind(timestamp)
        .fetch_one(db)
        .await?;
        Ok(entry)
    }

    /// Analysis history for a user, newest first.
    pub async fn history_for(db: &PgPool, user_id: Uuid) -> Result<Vec<SentimentEntry>, ApiError> {
        let rows = sqlx::query_as::<_, SentimentEntry>(
            r#"
            SELECT id, user_id, text, sentiment, timestamp
            FROM sentiments
            WHERE user_id = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Every stored entry joined with its owner, oldest first per user, so a
    /// repeated text keeps its latest label when folded into a map.
    pub async fn all_with_owners(db: &PgPool) -> Result<Vec<UserSentimentRow>, ApiError> {
        let rows = sqlx::query_as::<_, UserSentimentRow>(
            r#"
            SELECT u.identifier, s.text, s.sentiment
            FROM sentiments s
            JOIN users u ON u.id = s.user_id
            ORDER BY u.identifier, s.timestamp
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
