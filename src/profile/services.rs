use crate::{
    error::AppError,
    profile::dto::{UpdateProfileRequest, EDUCATION_LEVELS},
};

pub const MAX_CAREER_GOAL_LEN: usize = 100;
pub const MAX_FREE_TEXT_LEN: usize = 255;

/// Validated profile edit. `None` keeps the stored value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub career_goal: Option<String>,
    pub strength: Option<String>,
    pub education_level: Option<String>,
}

pub fn parse_education_level(raw: &str) -> Result<String, AppError> {
    let level = raw.trim();
    EDUCATION_LEVELS
        .iter()
        .find(|l| **l == level)
        .map(|l| l.to_string())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Education level must be one of: {}.",
                EDUCATION_LEVELS.join(", ")
            ))
        })
}

pub fn check_career_goal(goal: &str) -> Result<(), AppError> {
    if goal.chars().count() > MAX_CAREER_GOAL_LEN {
        return Err(AppError::Validation(
            "Career goal must be at most 100 characters.".into(),
        ));
    }
    Ok(())
}

pub fn check_free_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.chars().count() > MAX_FREE_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most 255 characters."
        )));
    }
    Ok(())
}

fn non_empty(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Builds the edit for the full profile form. At least one of career goal or
/// strengths must be present; blank fields leave the stored value untouched.
pub fn build_profile_update(req: &UpdateProfileRequest) -> Result<ProfileUpdate, AppError> {
    let career_goal = non_empty(&req.career_goal);
    let strength = non_empty(&req.strength);
    if career_goal.is_none() && strength.is_none() {
        return Err(AppError::Validation(
            "Please fill in at least your career goal or strengths.".into(),
        ));
    }
    if let Some(goal) = &career_goal {
        check_career_goal(goal)?;
    }
    if let Some(s) = &strength {
        check_free_text(s, "Strengths")?;
    }

    let full_name = non_empty(&req.full_name);
    if let Some(name) = &full_name {
        check_free_text(name, "Full name")?;
    }

    let education_level = match non_empty(&req.education_level) {
        Some(level) => Some(parse_education_level(&level)?),
        None => None,
    };

    Ok(ProfileUpdate {
        full_name,
        career_goal,
        strength,
        education_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_level_must_be_known() {
        assert_eq!(parse_education_level(" MSc ").unwrap(), "MSc");
        assert!(parse_education_level("msc").is_err());
        assert!(parse_education_level("Bootcamp").is_err());
    }

    #[test]
    fn profile_update_requires_goal_or_strength() {
        let req = UpdateProfileRequest {
            full_name: "Ada".into(),
            ..Default::default()
        };
        let err = build_profile_update(&req).unwrap_err();
        assert!(err.to_string().contains("career goal or strengths"));
    }

    #[test]
    fn blank_fields_keep_stored_values() {
        let req = UpdateProfileRequest {
            full_name: "   ".into(),
            career_goal: String::new(),
            strength: "  problem solving ".into(),
            education_level: String::new(),
        };
        let update = build_profile_update(&req).unwrap();
        assert_eq!(
            update,
            ProfileUpdate {
                full_name: None,
                career_goal: None,
                strength: Some("problem solving".into()),
                education_level: None,
            }
        );
    }

    #[test]
    fn invalid_education_level_rejected_in_full_update() {
        let req = UpdateProfileRequest {
            career_goal: "data science".into(),
            education_level: "Kindergarten".into(),
            ..Default::default()
        };
        assert!(build_profile_update(&req).is_err());
    }

    #[test]
    fn overlong_goal_rejected() {
        let req = UpdateProfileRequest {
            career_goal: "x".repeat(101),
            ..Default::default()
        };
        assert!(build_profile_update(&req).is_err());
    }
}
