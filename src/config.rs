use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Endpoint of the external sentiment inference service.
    pub inference_url: String,
    /// When true, login identifiers must be email-shaped.
    pub email_identifier: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // DATABASE_URL and JWT_SECRET are secrets; no literal defaults.
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sentimind".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "sentimind-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        let inference_url = std::env::var("INFERENCE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/classify".into());
        let email_identifier = std::env::var("IDENTIFIER_EMAIL")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        Ok(Self {
            database_url,
            jwt,
            inference_url,
            email_identifier,
        })
    }
}
