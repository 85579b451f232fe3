use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    engine::{CareerCandidate, Profile},
    repo_types::{CareerRow, Recommendation},
};

/// Everything the dashboard flow reads from or writes to persistence.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// `None` when the user no longer exists.
    async fn profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    async fn existing_recommendation(&self, user_id: Uuid) -> anyhow::Result<Option<Recommendation>>;
    /// All careers in catalog order, with their skill names.
    async fn list_careers(&self) -> anyhow::Result<Vec<CareerCandidate>>;
    /// Stores the recommendation unless one already exists for the user, in
    /// which case the existing record is returned untouched.
    async fn save_recommendation(
        &self,
        user_id: Uuid,
        career_id: Uuid,
        explanation: &str,
        generated_at: OffsetDateTime,
    ) -> anyhow::Result<Recommendation>;
}

#[derive(Clone)]
pub struct PgRecommendationStore {
    db: PgPool,
}

impl PgRecommendationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    async fn profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT career_goal, strength FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .context("load profile")
    }

    async fn existing_recommendation(&self, user_id: Uuid) -> anyhow::Result<Option<Recommendation>> {
        sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT r.id, r.user_id, r.career_id, c.name AS career_name, r.explanation, r.generated_at
              FROM career_recommendations r
              LEFT JOIN careers c ON c.id = r.career_id
             WHERE r.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("load recommendation")
    }

    async fn list_careers(&self) -> anyhow::Result<Vec<CareerCandidate>> {
        let rows = sqlx::query_as::<_, CareerRow>(
            r#"
            SELECT c.id, c.name, c.description,
                   COALESCE(
                       array_agg(s.name ORDER BY s.name) FILTER (WHERE s.name IS NOT NULL),
                       '{}'
                   )::text[] AS skills
              FROM careers c
              LEFT JOIN career_skills cs ON cs.career_id = c.id
              LEFT JOIN skills s ON s.id = cs.skill_id
             GROUP BY c.id
             ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list careers")?;

        Ok(rows
            .into_iter()
            .map(|r| CareerCandidate {
                id: r.id,
                name: r.name,
                description: r.description,
                skills: r.skills,
            })
            .collect())
    }

    async fn save_recommendation(
        &self,
        user_id: Uuid,
        career_id: Uuid,
        explanation: &str,
        generated_at: OffsetDateTime,
    ) -> anyhow::Result<Recommendation> {
        // UNIQUE(user_id) turns a concurrent first visit into a no-op insert.
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO career_recommendations (user_id, career_id, explanation, generated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(career_id)
        .bind(explanation)
        .bind(generated_at)
        .fetch_optional(&self.db)
        .await
        .context("insert recommendation")?;

        if inserted.is_none() {
            tracing::info!(%user_id, "recommendation already stored by a concurrent request");
        }

        self.existing_recommendation(user_id)
            .await?
            .context("recommendation missing after insert")
    }
}
