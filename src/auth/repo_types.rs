use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub date_of_birth: Option<Date>,
    pub education_level: Option<String>,
    pub career_goal: Option<String>,
    pub current_role: Option<String>,
    pub current_level: Option<String>,
    pub strength: Option<String>,
    pub created_at: OffsetDateTime,
    pub last_login: Option<OffsetDateTime>,
}

/// Pending one-time code for a password reset.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordReset {
    pub otp_hash: String,
    pub expires_at: OffsetDateTime,
}
