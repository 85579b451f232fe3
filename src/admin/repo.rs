use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DashboardStats {
    pub total_users: i64,
    pub new_signups: i64,
    pub daily_active_users: i64,
    pub skills: i64,
    pub careers: i64,
    pub professionals: i64,
    pub communities: i64,
}

impl Admin {
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<Admin>> {
        sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, role, created_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Admin>> {
        sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, role, created_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Inserts a `super` admin unless the email is already present.
    /// Returns whether a row was created.
    pub async fn ensure(db: &PgPool, email: &str, password_hash: &str) -> sqlx::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash, role)
            VALUES ($1, $2, 'super')
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}

pub async fn dashboard_stats(db: &PgPool) -> sqlx::Result<DashboardStats> {
    sqlx::query_as::<_, DashboardStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users) AS total_users,
            (SELECT COUNT(*) FROM users WHERE created_at >= now() - interval '7 days') AS new_signups,
            (SELECT COUNT(*) FROM users WHERE last_login >= now() - interval '1 day') AS daily_active_users,
            (SELECT COUNT(*) FROM skills) AS skills,
            (SELECT COUNT(*) FROM careers) AS careers,
            (SELECT COUNT(*) FROM professionals) AS professionals,
            (SELECT COUNT(*) FROM communities) AS communities
        "#,
    )
    .fetch_one(db)
    .await
}
