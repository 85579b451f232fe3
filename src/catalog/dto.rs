use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    validation::{char_len_between, is_valid_url, normalize_email, optional, required},
};

pub const SKILL_CATEGORIES: [&str; 3] = ["Technical", "Soft", "Other"];
pub const DEMAND_LEVELS: [&str; 3] = ["High", "Medium", "Low"];
/// Upper bound of NUMERIC(12, 2).
const MAX_SALARY: f64 = 9_999_999_999.99;

fn one_of(value: &str, allowed: &[&str], field: &str) -> Result<String, AppError> {
    let v = value.trim();
    allowed
        .iter()
        .find(|a| **a == v)
        .map(|a| a.to_string())
        .ok_or_else(|| {
            AppError::Validation(format!("{field} must be one of: {}.", allowed.join(", ")))
        })
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill_name: String,
    pub category: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SkillInput {
    pub skill_name: String,
    pub category: String,
}

impl SkillRequest {
    pub fn validate(self) -> Result<SkillInput, AppError> {
        let skill_name = required(&self.skill_name, "Skill name")?;
        char_len_between(&skill_name, 1, 100, "Skill name must be at most 100 characters.")?;
        Ok(SkillInput {
            skill_name,
            category: one_of(&self.category, &SKILL_CATEGORIES, "Category")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CareerRequest {
    pub career_name: String,
    pub description: String,
    pub demand_level: String,
    pub average_salary: Option<f64>,
    /// Omitted on update keeps the current skill links.
    pub skill_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, PartialEq)]
pub struct CareerInput {
    pub career_name: String,
    pub description: String,
    pub demand_level: String,
    pub average_salary: Option<f64>,
    pub skill_ids: Option<Vec<Uuid>>,
}

impl CareerRequest {
    pub fn validate(self) -> Result<CareerInput, AppError> {
        let career_name = required(&self.career_name, "Career name")?;
        char_len_between(
            &career_name,
            2,
            100,
            "Career name must be between 2 and 100 characters.",
        )?;
        let description = required(&self.description, "Description")?;
        char_len_between(
            &description,
            10,
            usize::MAX,
            "Description must be at least 10 characters long.",
        )?;
        let demand_level = one_of(&self.demand_level, &DEMAND_LEVELS, "Demand level")?;

        if let Some(salary) = self.average_salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(AppError::Validation(
                    "Salary must be a positive number.".into(),
                ));
            }
            if salary > MAX_SALARY {
                return Err(AppError::Validation("Salary is too large.".into()));
            }
        }

        let skill_ids = self.skill_ids.map(|mut ids| {
            ids.sort();
            ids.dedup();
            ids
        });

        Ok(CareerInput {
            career_name,
            description,
            demand_level,
            average_salary: self.average_salary.map(|s| (s * 100.0).round() / 100.0),
            skill_ids,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfessionalRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub linkedin_id: Option<String>,
    pub career_id: Option<Uuid>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProfessionalInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub linkedin_id: Option<String>,
    pub career_id: Option<Uuid>,
}

impl ProfessionalRequest {
    pub fn validate(self) -> Result<ProfessionalInput, AppError> {
        let first_name = required(&self.first_name, "First name")?;
        char_len_between(&first_name, 1, 45, "First name must be at most 45 characters.")?;
        let last_name = required(&self.last_name, "Last name")?;
        char_len_between(&last_name, 1, 45, "Last name must be at most 45 characters.")?;
        Ok(ProfessionalInput {
            first_name,
            last_name,
            email: normalize_email(&self.email)?,
            linkedin_id: optional(self.linkedin_id),
            career_id: self.career_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CommunityRequest {
    pub community_name: String,
    pub description: Option<String>,
    pub career_id: Uuid,
    pub community_link: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CommunityInput {
    pub community_name: String,
    pub description: Option<String>,
    pub career_id: Uuid,
    pub community_link: Option<String>,
}

impl CommunityRequest {
    pub fn validate(self) -> Result<CommunityInput, AppError> {
        let community_name = required(&self.community_name, "Community name")?;
        char_len_between(
            &community_name,
            1,
            100,
            "Community name must be at most 100 characters.",
        )?;
        let community_link = optional(self.community_link);
        if let Some(link) = &community_link {
            if link.len() > 2083 || !is_valid_url(link) {
                return Err(AppError::Validation("Please enter a valid URL".into()));
            }
        }
        Ok(CommunityInput {
            community_name,
            description: optional(self.description),
            career_id: self.career_id,
            community_link,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_category_must_be_known() {
        let ok = SkillRequest {
            skill_name: " Rust ".into(),
            category: "Technical".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.skill_name, "Rust");

        let err = SkillRequest {
            skill_name: "Rust".into(),
            category: "Magic".into(),
        }
        .validate();
        assert!(err.is_err());
    }

    fn career_req() -> CareerRequest {
        CareerRequest {
            career_name: "Data Analyst".into(),
            description: "Analyzes business data".into(),
            demand_level: "High".into(),
            average_salary: Some(1234.567),
            skill_ids: None,
        }
    }

    #[test]
    fn career_salary_rounds_to_cents() {
        let input = career_req().validate().unwrap();
        assert_eq!(input.average_salary, Some(1234.57));
    }

    #[test]
    fn career_rejects_negative_salary_and_short_description() {
        let mut req = career_req();
        req.average_salary = Some(-1.0);
        assert!(req.validate().is_err());

        let mut req = career_req();
        req.description = "too short".into();
        assert!(req.validate().is_err());

        let mut req = career_req();
        req.career_name = "X".into();
        assert!(req.validate().is_err());

        let mut req = career_req();
        req.demand_level = "Extreme".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn career_skill_ids_are_deduplicated() {
        let id = Uuid::new_v4();
        let mut req = career_req();
        req.skill_ids = Some(vec![id, id]);
        assert_eq!(req.validate().unwrap().skill_ids, Some(vec![id]));
    }

    #[test]
    fn omitted_skill_ids_stay_unset() {
        let req: CareerRequest = serde_json::from_str(
            r#"{"career_name":"Nurse","description":"patient care on wards","demand_level":"High","average_salary":null}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap().skill_ids, None);

        let req: CareerRequest = serde_json::from_str(
            r#"{"career_name":"Nurse","description":"patient care on wards","demand_level":"High","average_salary":null,"skill_ids":[]}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap().skill_ids, Some(vec![]));
    }

    #[test]
    fn professional_email_is_checked() {
        let req = ProfessionalRequest {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "Grace@Navy.mil".into(),
            linkedin_id: Some("  ".into()),
            career_id: None,
        };
        let input = req.validate().unwrap();
        assert_eq!(input.email, "grace@navy.mil");
        assert_eq!(input.linkedin_id, None);

        let bad = ProfessionalRequest {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace".into(),
            linkedin_id: None,
            career_id: None,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn community_blank_strings_become_null_and_link_is_checked() {
        let career_id = Uuid::new_v4();
        let input = CommunityRequest {
            community_name: "  Rustaceans ".into(),
            description: Some("   ".into()),
            career_id,
            community_link: Some("".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(
            input,
            CommunityInput {
                community_name: "Rustaceans".into(),
                description: None,
                career_id,
                community_link: None,
            }
        );

        let bad = CommunityRequest {
            community_name: "Rustaceans".into(),
            description: None,
            career_id,
            community_link: Some("not a url".into()),
        }
        .validate();
        assert!(bad.is_err());
    }
}
