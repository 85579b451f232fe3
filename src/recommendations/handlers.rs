use axum::{extract::State, routing::get, Json, Router};
use tracing::{instrument, warn};

use super::{
    dto::DashboardResponse,
    services::{dashboard, DashboardOutcome},
    store::PgRecommendationStore,
};
use crate::{
    auth::jwt::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<DashboardResponse>> {
    let store = PgRecommendationStore::new(state.db.clone());
    let outcome = dashboard(&store, user_id).await?;
    if outcome == DashboardOutcome::UserNotFound {
        warn!(%user_id, "token for a deleted user");
        return Err(AppError::Unauthorized("Please log in to continue.".into()));
    }
    Ok(Json(DashboardResponse::from_outcome(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn dashboard_requires_login() {
        let res = build_app(AppState::fake())
            .oneshot(Request::get("/api/v1/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers()["cache-control"],
            "no-cache, no-store, must-revalidate"
        );
    }
}
