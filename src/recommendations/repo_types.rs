use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted result of the first scoring pass for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub career_id: Uuid,
    /// Name of the career at read time; `None` if it could not be joined.
    pub career_name: Option<String>,
    pub explanation: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct CareerRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
}
