use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub skill_name: String,
    pub category: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CareerRow {
    pub id: Uuid,
    pub career_name: String,
    pub description: String,
    pub demand_level: String,
    pub average_salary: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CareerSkillRow {
    pub career_id: Uuid,
    pub skill_id: Uuid,
    pub skill_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRef {
    pub id: Uuid,
    pub skill_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Career {
    pub id: Uuid,
    pub career_name: String,
    pub description: String,
    pub demand_level: String,
    pub average_salary: Option<f64>,
    pub skills: Vec<SkillRef>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Professional {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub linkedin_id: Option<String>,
    pub career_id: Option<Uuid>,
    pub career_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Community {
    pub id: Uuid,
    pub community_name: String,
    pub description: Option<String>,
    pub career_id: Uuid,
    pub career_name: Option<String>,
    pub community_link: Option<String>,
}

/// Shape returned by the public community search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CommunityHit {
    pub community_name: String,
    pub description: Option<String>,
    pub community_link: Option<String>,
}
