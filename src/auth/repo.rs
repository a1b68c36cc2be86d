use crate::auth::repo_types::{LoginEvent, User};
use crate::error::ApiError;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

impl User {
    /// Find a user by login identifier.
    pub async fn find_by_identifier(db: &PgPool, identifier: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, identifier, password_hash, role, registered_at, last_login
            FROM users
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. Racing registrations are
    /// decided by the unique index on `identifier`; the losing insert
    /// surfaces as `DuplicateIdentifier`.
    pub async fn create(
        db: &PgPool,
        identifier: &str,
        password_hash: &str,
        registered_at: OffsetDateTime,
    ) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (identifier, password_hash, registered_at)
            VALUES ($1, $2, $3)
            RETURNING id, identifier, password_hash, role, registered_at, last_login
            "#,
        )
        .bind(identifier)
        .bind(password_hash)
        .bind(registered_at)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                ApiError::DuplicateIdentifier
            } else {
                ApiError::from(e)
            }
        })?;
        Ok(user)
    }

    /// Stamp `last_login` and append the audit event in one transaction,
    /// both with the same instant. Either both persist or neither does.
    pub async fn record_login(
        db: &PgPool,
        user_id: Uuid,
        now: OffsetDateTime,
    ) -> Result<(), ApiError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"
            UPDATE users SET last_login = $2 WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO login_events (user_id, login_time)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

impl LoginEvent {
    /// Login history for a user, newest first.
    pub async fn history(db: &PgPool, user_id: Uuid) -> Result<Vec<LoginEvent>, ApiError> {
        let rows = sqlx::query_as::<_, LoginEvent>(
            r#"
            SELECT id, user_id, login_time
            FROM login_events
            WHERE user_id = $1
            ORDER BY login_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
