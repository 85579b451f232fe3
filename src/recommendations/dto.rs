use serde::Serialize;
use time::OffsetDateTime;

use super::services::DashboardOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Empty when no recommendation exists.
    pub recommended_career: String,
    pub message: Option<String>,
    pub level: MessageLevel,
    #[serde(with = "time::serde::rfc3339::option")]
    pub generated_at: Option<OffsetDateTime>,
}

pub const INCOMPLETE_PROFILE_MSG: &str =
    "Complete your profile (career goal & strengths) to get personalized recommendations.";
pub const NO_CAREERS_MSG: &str = "No careers available for recommendation.";

impl DashboardResponse {
    /// `UserNotFound` is mapped to an auth error by the handler and never reaches here.
    pub fn from_outcome(outcome: DashboardOutcome) -> Self {
        match outcome {
            DashboardOutcome::Cached(rec) => Self {
                recommended_career: rec.career_name.unwrap_or_default(),
                message: Some(rec.explanation),
                level: MessageLevel::Info,
                generated_at: Some(rec.generated_at),
            },
            DashboardOutcome::Fresh(rec) => Self {
                recommended_career: rec.career_name.unwrap_or_default(),
                message: Some(rec.explanation),
                level: MessageLevel::Success,
                generated_at: Some(rec.generated_at),
            },
            DashboardOutcome::InsufficientProfile => Self::warning(INCOMPLETE_PROFILE_MSG),
            DashboardOutcome::NoCandidates => Self::warning(NO_CAREERS_MSG),
            DashboardOutcome::UserNotFound => Self::warning("User not found."),
        }
    }

    fn warning(msg: &str) -> Self {
        Self {
            recommended_career: String::new(),
            message: Some(msg.to_string()),
            level: MessageLevel::Warning,
            generated_at: None,
        }
    }
}
