use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::auth::repo_types::User;

pub const EDUCATION_LEVELS: [&str; 5] = ["Secondary", "Diploma", "BSc", "MSc", "PhD"];

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub date_of_birth: Option<Date>,
    pub education_level: Option<String>,
    pub career_goal: Option<String>,
    pub current_role: Option<String>,
    pub current_level: Option<String>,
    pub strength: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            date_of_birth: u.date_of_birth,
            education_level: u.education_level,
            career_goal: u.career_goal,
            current_role: u.current_role,
            current_level: u.current_level,
            strength: u.strength,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EducationLevelRequest {
    pub education_level: String,
}

#[derive(Debug, Deserialize)]
pub struct CareerGoalRequest {
    pub career_goal: String,
}

#[derive(Debug, Deserialize)]
pub struct StrengthsRequest {
    #[serde(default)]
    pub strengths: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub career_goal: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub education_level: String,
}
