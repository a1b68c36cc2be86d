use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo_types::Role;

/// Form body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Form body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub msg: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    pub role: Role,
}

/// One login audit entry.
#[derive(Debug, Serialize)]
pub struct LoginHistoryItem {
    #[serde(with = "time::serde::rfc3339")]
    pub login_time: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn login_response_shape() {
        let response = LoginResponse {
            access_token: "tok".into(),
            token_type: "bearer",
            last_login: datetime!(2025-06-01 12:00:00 +5:30),
            role: Role::User,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"token_type\":\"bearer\""));
        assert!(json.contains("\"role\":\"USER\""));
        assert!(json.contains("+05:30"));
    }

    #[test]
    fn register_response_shape() {
        let response = RegisterResponse {
            msg: "User registered",
            registered_at: datetime!(2025-06-01 12:00:00 +5:30),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("User registered"));
        assert!(json.contains("registered_at"));
    }
}
