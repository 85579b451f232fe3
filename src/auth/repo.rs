use crate::auth::repo_types::{PasswordReset, User};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, full_name, email, password_hash, date_of_birth, education_level, \
     career_goal, \"current_role\", current_level, strength, created_at, last_login";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (full_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    pub async fn touch_last_login(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl PasswordReset {
    /// Stores a code for `email`, replacing any earlier one.
    pub async fn upsert(
        db: &PgPool,
        email: &str,
        otp_hash: &str,
        expires_at: OffsetDateTime,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (email, otp_hash, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email)
            DO UPDATE SET otp_hash = EXCLUDED.otp_hash, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(email)
        .bind(otp_hash)
        .bind(expires_at)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find(db: &PgPool, email: &str) -> sqlx::Result<Option<PasswordReset>> {
        sqlx::query_as::<_, PasswordReset>(
            "SELECT otp_hash, expires_at FROM password_resets WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Sets the new password hash and consumes the code in one transaction.
    pub async fn complete(db: &PgPool, email: &str, password_hash: &str) -> sqlx::Result<()> {
        let mut tx = db.begin().await?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
            .bind(password_hash)
            .bind(email)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}
