use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    engine::{self, Outcome},
    repo_types::Recommendation,
    store::RecommendationStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardOutcome {
    /// Returned verbatim from an earlier visit.
    Cached(Recommendation),
    /// Computed and stored during this call.
    Fresh(Recommendation),
    InsufficientProfile,
    NoCandidates,
    UserNotFound,
}

/// Lookup-then-create: a stored recommendation always wins over recomputing,
/// even when the profile or catalog changed since it was generated.
pub async fn dashboard(
    store: &dyn RecommendationStore,
    user_id: Uuid,
) -> anyhow::Result<DashboardOutcome> {
    if let Some(existing) = store.existing_recommendation(user_id).await? {
        debug!(%user_id, recommendation_id = %existing.id, "serving stored recommendation");
        return Ok(DashboardOutcome::Cached(existing));
    }

    let Some(profile) = store.profile(user_id).await? else {
        return Ok(DashboardOutcome::UserNotFound);
    };
    if profile.keywords().is_empty() {
        return Ok(DashboardOutcome::InsufficientProfile);
    }

    let careers = store.list_careers().await?;
    match engine::recommend(&profile, &careers) {
        Outcome::InsufficientProfile => Ok(DashboardOutcome::InsufficientProfile),
        Outcome::NoCandidates => Ok(DashboardOutcome::NoCandidates),
        Outcome::Recommended(m) => {
            let saved = store
                .save_recommendation(user_id, m.career.id, &m.explanation, OffsetDateTime::now_utc())
                .await?;
            info!(
                %user_id,
                career = %m.career.name,
                score = m.score,
                candidates = careers.len(),
                "recommendation generated"
            );
            Ok(DashboardOutcome::Fresh(saved))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;
    use crate::recommendations::engine::{CareerCandidate, Profile};

    fn career(name: &str, description: &str) -> CareerCandidate {
        CareerCandidate {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            skills: vec![],
        }
    }

    fn profile(goal: &str, strength: &str) -> Profile {
        Profile {
            career_goal: Some(goal.into()),
            strength: Some(strength.into()),
        }
    }

    #[tokio::test]
    async fn first_visit_stores_recommendation() {
        let user_id = Uuid::new_v4();
        let careers = vec![
            career("Software Engineer", "builds software systems"),
            career("Nurse", "patient care"),
        ];
        let store = MemoryStore::with_user(user_id, profile("software", "systems"), careers.clone());

        let outcome = dashboard(&store, user_id).await.unwrap();
        let DashboardOutcome::Fresh(rec) = outcome else {
            panic!("expected fresh recommendation, got {outcome:?}");
        };
        assert_eq!(rec.career_id, careers[0].id);
        assert_eq!(rec.career_name.as_deref(), Some("Software Engineer"));
        assert!(rec.explanation.starts_with("Recommended Career: Software Engineer."));
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn second_visit_returns_identical_record_even_if_catalog_changes() {
        let user_id = Uuid::new_v4();
        let store = MemoryStore::with_user(
            user_id,
            profile("care", ""),
            vec![career("Nurse", "patient care")],
        );

        let DashboardOutcome::Fresh(first) = dashboard(&store, user_id).await.unwrap() else {
            panic!("expected fresh recommendation");
        };

        *store.careers.lock().unwrap() = vec![career("Caregiver", "care care care")];
        store
            .profiles
            .lock()
            .unwrap()
            .insert(user_id, profile("software", ""));

        let DashboardOutcome::Cached(second) = dashboard(&store, user_id).await.unwrap() else {
            panic!("expected cached recommendation");
        };
        assert_eq!(first, second);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn empty_profile_writes_nothing() {
        let user_id = Uuid::new_v4();
        let store = MemoryStore::with_user(
            user_id,
            Profile::default(),
            vec![career("Nurse", "patient care")],
        );
        assert_eq!(
            dashboard(&store, user_id).await.unwrap(),
            DashboardOutcome::InsufficientProfile
        );
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn empty_catalog_writes_nothing() {
        let user_id = Uuid::new_v4();
        let store = MemoryStore::with_user(user_id, profile("nursing", ""), vec![]);
        assert_eq!(
            dashboard(&store, user_id).await.unwrap(),
            DashboardOutcome::NoCandidates
        );
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn unknown_user_is_reported() {
        let store = MemoryStore::default();
        assert_eq!(
            dashboard(&store, Uuid::new_v4()).await.unwrap(),
            DashboardOutcome::UserNotFound
        );
    }

    #[tokio::test]
    async fn second_save_keeps_first_record() {
        let user_id = Uuid::new_v4();
        let careers = vec![career("Nurse", "patient care"), career("Chef", "cooks")];
        let store = MemoryStore::with_user(user_id, profile("care", ""), careers.clone());

        let now = OffsetDateTime::now_utc();
        let a = store
            .save_recommendation(user_id, careers[0].id, "first", now)
            .await
            .unwrap();
        let b = store
            .save_recommendation(user_id, careers[1].id, "second", now)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(b.explanation, "first");
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_visits_share_one_record() {
        let user_id = Uuid::new_v4();
        let careers = vec![career("Nurse", "patient care"), career("Chef", "cooks")];
        let store = MemoryStore::with_user(user_id, profile("care", ""), careers);

        let (a, b) = tokio::join!(dashboard(&store, user_id), dashboard(&store, user_id));
        let rec = |o: DashboardOutcome| match o {
            DashboardOutcome::Fresh(r) | DashboardOutcome::Cached(r) => r,
            other => panic!("expected a recommendation, got {other:?}"),
        };
        let (a, b) = (rec(a.unwrap()), rec(b.unwrap()));
        assert_eq!(a, b);
        assert_eq!(a.career_name.as_deref(), Some("Nurse"));
        assert_eq!(store.writes(), 1);
    }
}
