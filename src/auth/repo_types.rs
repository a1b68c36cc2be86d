use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User role. `ADMIN` unlocks the cross-user aggregation view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub identifier: String,           // login identifier (username or email)
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
    pub role: Role,
    pub registered_at: OffsetDateTime,
    pub last_login: Option<OffsetDateTime>, // null until first login
}

/// Immutable audit record, one per successful login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoginEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub login_time: OffsetDateTime,
}
