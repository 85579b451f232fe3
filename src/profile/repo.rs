use sqlx::PgPool;
use uuid::Uuid;

use crate::{auth::repo_types::User, profile::services::ProfileUpdate};

const RETURNING: &str = "RETURNING id, full_name, email, password_hash, date_of_birth, \
     education_level, career_goal, \"current_role\", current_level, strength, created_at, last_login";

pub async fn set_education_level(db: &PgPool, user_id: Uuid, level: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET education_level = $2 WHERE id = $1 {RETURNING}"
    ))
    .bind(user_id)
    .bind(level)
    .fetch_optional(db)
    .await
}

pub async fn set_career_goal(db: &PgPool, user_id: Uuid, goal: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET career_goal = $2 WHERE id = $1 {RETURNING}"
    ))
    .bind(user_id)
    .bind(goal)
    .fetch_optional(db)
    .await
}

pub async fn set_strength(db: &PgPool, user_id: Uuid, strength: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET strength = $2 WHERE id = $1 {RETURNING}"
    ))
    .bind(user_id)
    .bind(strength)
    .fetch_optional(db)
    .await
}

pub async fn apply_update(db: &PgPool, user_id: Uuid, update: &ProfileUpdate) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
           SET full_name = COALESCE($2, full_name),
               career_goal = COALESCE($3, career_goal),
               strength = COALESCE($4, strength),
               education_level = COALESCE($5, education_level)
         WHERE id = $1
        {RETURNING}
        "#
    ))
    .bind(user_id)
    .bind(update.full_name.as_deref())
    .bind(update.career_goal.as_deref())
    .bind(update.strength.as_deref())
    .bind(update.education_level.as_deref())
    .fetch_optional(db)
    .await
}
