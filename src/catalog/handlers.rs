use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CareerRequest, CommunityRequest, ProfessionalRequest, SearchQuery, SkillRequest},
    repo::{self, CatalogTable, COMMUNITY_DIRECTORY_LIMIT},
    repo_types::{Career, Community, CommunityHit, Professional, Skill},
};
use crate::{
    auth::jwt::AdminUser,
    error::{map_write_error, AppError, AppResult},
    state::AppState,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/careers", get(list_careers))
        .route("/professionals", get(list_professionals))
        .route("/communities", get(community_directory))
        .route("/communities/search", get(search_communities))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/skills", get(admin_list_skills).post(create_skill))
        .route("/admin/skills/:id", put(update_skill).delete(delete_skill))
        .route("/admin/careers", get(admin_list_careers).post(create_career))
        .route("/admin/careers/:id", put(update_career).delete(delete_career))
        .route(
            "/admin/professionals",
            get(admin_list_professionals).post(create_professional),
        )
        .route(
            "/admin/professionals/:id",
            put(update_professional).delete(delete_professional),
        )
        .route(
            "/admin/communities",
            get(admin_list_communities).post(create_community),
        )
        .route(
            "/admin/communities/:id",
            put(update_community).delete(delete_community),
        )
}

// --- public ---

#[instrument(skip(state))]
pub async fn list_careers(State(state): State<AppState>) -> AppResult<Json<Vec<Career>>> {
    Ok(Json(repo::list_careers(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn list_professionals(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Professional>>> {
    Ok(Json(repo::list_professionals(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn community_directory(State(state): State<AppState>) -> AppResult<Json<Vec<Community>>> {
    Ok(Json(
        repo::list_communities(&state.db, Some(COMMUNITY_DIRECTORY_LIMIT)).await?,
    ))
}

#[instrument(skip(state))]
pub async fn search_communities(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<CommunityHit>>> {
    let q = params.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(repo::search_communities(&state.db, q).await?))
}

// --- admin: skills ---

#[instrument(skip(state))]
pub async fn admin_list_skills(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> AppResult<Json<Vec<Skill>>> {
    Ok(Json(repo::list_skills(&state.db).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_skill(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(payload): Json<SkillRequest>,
) -> AppResult<(StatusCode, Json<Skill>)> {
    let input = payload.validate()?;
    let skill = repo::insert_skill(&state.db, &input)
        .await
        .map_err(|e| map_write_error(e, "Skill already exists.", "Unknown reference."))?;
    info!(%admin_id, skill_id = %skill.id, name = %skill.skill_name, "skill added");
    Ok((StatusCode::CREATED, Json(skill)))
}

#[instrument(skip(state, payload))]
pub async fn update_skill(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SkillRequest>,
) -> AppResult<Json<Skill>> {
    let input = payload.validate()?;
    let skill = repo::update_skill(&state.db, id, &input)
        .await
        .map_err(|e| map_write_error(e, "Skill already exists.", "Unknown reference."))?
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))?;
    info!(%admin_id, skill_id = %id, "skill updated");
    Ok(Json(skill))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete(&state, admin_id, CatalogTable::Skills, id, "Skill not found").await
}

// --- admin: careers ---

#[instrument(skip(state))]
pub async fn admin_list_careers(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> AppResult<Json<Vec<Career>>> {
    Ok(Json(repo::list_careers(&state.db).await?))
}

const CAREER_EXISTS: &str = "Career already exists.";
const UNKNOWN_SKILL: &str = "Unknown skill.";

#[instrument(skip(state, payload))]
pub async fn create_career(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(payload): Json<CareerRequest>,
) -> AppResult<(StatusCode, Json<Career>)> {
    let input = payload.validate()?;
    let id = repo::insert_career(&state.db, &input)
        .await
        .map_err(|e| map_write_error(e, CAREER_EXISTS, UNKNOWN_SKILL))?;
    let career = repo::get_career(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("career {id} vanished after insert")))?;
    info!(%admin_id, career_id = %id, name = %career.career_name, "career added");
    Ok((StatusCode::CREATED, Json(career)))
}

#[instrument(skip(state, payload))]
pub async fn update_career(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CareerRequest>,
) -> AppResult<Json<Career>> {
    let input = payload.validate()?;
    let updated = repo::update_career(&state.db, id, &input)
        .await
        .map_err(|e| map_write_error(e, CAREER_EXISTS, UNKNOWN_SKILL))?;
    if !updated {
        return Err(AppError::NotFound("Career not found".into()));
    }
    let career = repo::get_career(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Career not found".into()))?;
    info!(%admin_id, career_id = %id, "career updated");
    Ok(Json(career))
}

#[instrument(skip(state))]
pub async fn delete_career(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete(&state, admin_id, CatalogTable::Careers, id, "Career not found").await
}

// --- admin: professionals ---

const PROFESSIONAL_EXISTS: &str = "A professional with that email or LinkedIn ID already exists.";
const UNKNOWN_CAREER: &str = "Unknown career.";

#[instrument(skip(state))]
pub async fn admin_list_professionals(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> AppResult<Json<Vec<Professional>>> {
    Ok(Json(repo::list_professionals(&state.db).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_professional(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(payload): Json<ProfessionalRequest>,
) -> AppResult<(StatusCode, Json<Professional>)> {
    let input = payload.validate()?;
    let id = repo::insert_professional(&state.db, &input)
        .await
        .map_err(|e| map_write_error(e, PROFESSIONAL_EXISTS, UNKNOWN_CAREER))?;
    let professional = repo::get_professional(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("professional {id} vanished after insert")))?;
    info!(
        %admin_id,
        professional_id = %id,
        name = %format!("{} {}", professional.first_name, professional.last_name),
        "professional added"
    );
    Ok((StatusCode::CREATED, Json(professional)))
}

#[instrument(skip(state, payload))]
pub async fn update_professional(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfessionalRequest>,
) -> AppResult<Json<Professional>> {
    let input = payload.validate()?;
    let updated = repo::update_professional(&state.db, id, &input)
        .await
        .map_err(|e| map_write_error(e, PROFESSIONAL_EXISTS, UNKNOWN_CAREER))?;
    if !updated {
        return Err(AppError::NotFound("Professional not found".into()));
    }
    let professional = repo::get_professional(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Professional not found".into()))?;
    info!(%admin_id, professional_id = %id, "professional updated");
    Ok(Json(professional))
}

#[instrument(skip(state))]
pub async fn delete_professional(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete(&state, admin_id, CatalogTable::Professionals, id, "Professional not found").await
}

// --- admin: communities ---

const COMMUNITY_EXISTS: &str = "Community already exists.";

#[instrument(skip(state))]
pub async fn admin_list_communities(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> AppResult<Json<Vec<Community>>> {
    Ok(Json(repo::list_communities(&state.db, None).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_community(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(payload): Json<CommunityRequest>,
) -> AppResult<(StatusCode, Json<Community>)> {
    let input = payload.validate()?;
    let id = repo::insert_community(&state.db, &input)
        .await
        .map_err(|e| map_write_error(e, COMMUNITY_EXISTS, UNKNOWN_CAREER))?;
    let community = repo::get_community(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("community {id} vanished after insert")))?;
    info!(%admin_id, community_id = %id, name = %community.community_name, "community added");
    Ok((StatusCode::CREATED, Json(community)))
}

#[instrument(skip(state, payload))]
pub async fn update_community(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CommunityRequest>,
) -> AppResult<Json<Community>> {
    let input = payload.validate()?;
    let updated = repo::update_community(&state.db, id, &input)
        .await
        .map_err(|e| map_write_error(e, COMMUNITY_EXISTS, UNKNOWN_CAREER))?;
    if !updated {
        return Err(AppError::NotFound("Community not found".into()));
    }
    let community = repo::get_community(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Community not found".into()))?;
    info!(%admin_id, community_id = %id, "community updated");
    Ok(Json(community))
}

#[instrument(skip(state))]
pub async fn delete_community(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete(&state, admin_id, CatalogTable::Communities, id, "Community not found").await
}

async fn delete(
    state: &AppState,
    admin_id: Uuid,
    table: CatalogTable,
    id: Uuid,
    not_found: &str,
) -> AppResult<StatusCode> {
    if !repo::delete_row(&state.db, table, id).await? {
        return Err(AppError::NotFound(not_found.into()));
    }
    info!(%admin_id, ?table, %id, "catalog row deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::{
        app::build_app,
        auth::{claims::Role, jwt::JwtKeys},
        state::AppState,
    };
    use axum::{
        body::Body,
        extract::FromRef,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn bearer(state: &AppState, role: Role) -> String {
        let token = JwtKeys::from_ref(state)
            .sign_access(uuid::Uuid::new_v4(), role)
            .unwrap();
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn blank_search_returns_empty_list_without_db() {
        let res = build_app(AppState::fake())
            .oneshot(
                Request::get("/api/v1/communities/search?q=%20%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"[]");
    }

    #[tokio::test]
    async fn admin_catalog_rejects_user_tokens() {
        let state = AppState::fake();
        let auth = bearer(&state, Role::User);
        let res = build_app(state)
            .oneshot(
                Request::get("/api/v1/admin/skills")
                    .header("authorization", auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_catalog_requires_token() {
        let res = build_app(AppState::fake())
            .oneshot(
                Request::delete(format!("/api/v1/admin/careers/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_skill_is_rejected_before_db() {
        let state = AppState::fake();
        let auth = bearer(&state, Role::Admin);
        let res = build_app(state)
            .oneshot(
                Request::post("/api/v1/admin/skills")
                    .header("authorization", auth)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"skill_name":"Rust","category":"Magic"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
