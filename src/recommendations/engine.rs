//! Keyword matching between a user's profile and the career catalog.
//!
//! Scoring is deliberately crude: each profile keyword adds one point when it
//! occurs anywhere inside a career's combined text, including inside longer
//! words ("data" matches "database"). Changing this to whole-word matching
//! changes which career wins, so it stays substring-based.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The free-text fields of a user that drive the recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct Profile {
    pub career_goal: Option<String>,
    pub strength: Option<String>,
}

impl Profile {
    /// Lower-cased whitespace tokens of the career goal followed by the strengths.
    pub fn keywords(&self) -> Vec<String> {
        [self.career_goal.as_deref(), self.strength.as_deref()]
            .into_iter()
            .flatten()
            .flat_map(|field| {
                field
                    .to_lowercase()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerCandidate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
}

impl CareerCandidate {
    fn comparison_text(&self) -> String {
        let mut text = format!("{} {}", self.name, self.description);
        if !self.skills.is_empty() {
            text.push(' ');
            text.push_str(&self.skills.join(" "));
        }
        text.to_lowercase()
    }

    /// Number of keywords found as substrings of the combined text.
    /// Repeated keywords count once per occurrence in `keywords`.
    pub fn score(&self, keywords: &[String]) -> u32 {
        let text = self.comparison_text();
        keywords.iter().filter(|k| text.contains(k.as_str())).count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    pub career: &'a CareerCandidate,
    pub score: u32,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Neither career goal nor strengths contain a keyword.
    InsufficientProfile,
    /// The catalog is empty.
    NoCandidates,
    Recommended(Match<'a>),
}

pub fn explanation(career_name: &str) -> String {
    format!(
        "Recommended Career: {career_name}. You can edit your profile to change this \
         recommendation anytime. This recommendation is just to get you started, to get \
         more personalized recommendation; kindly update your profile"
    )
}

/// Picks the best-scoring career. Ties keep the earliest candidate, and a
/// non-empty catalog always yields a winner even when every score is zero.
pub fn recommend<'a>(profile: &Profile, careers: &'a [CareerCandidate]) -> Outcome<'a> {
    let keywords = profile.keywords();
    if keywords.is_empty() {
        return Outcome::InsufficientProfile;
    }

    let mut best: Option<(&CareerCandidate, u32)> = None;
    for career in careers {
        let score = career.score(&keywords);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((career, score)),
        }
    }

    match best {
        None => Outcome::NoCandidates,
        Some((career, score)) => Outcome::Recommended(Match {
            career,
            score,
            explanation: explanation(&career.name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn career(name: &str, description: &str, skills: &[&str]) -> CareerCandidate {
        CareerCandidate {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn profile(goal: &str, strength: &str) -> Profile {
        Profile {
            career_goal: Some(goal.into()),
            strength: Some(strength.into()),
        }
    }

    fn winner<'o, 'a>(outcome: &'o Outcome<'a>) -> &'o Match<'a> {
        match outcome {
            Outcome::Recommended(m) => m,
            other => panic!("expected a recommendation, got {other:?}"),
        }
    }

    #[test]
    fn keywords_lowercase_and_split_both_fields() {
        let p = profile("Software  Engineering", "Problem\tSolving\n");
        assert_eq!(
            p.keywords(),
            vec!["software", "engineering", "problem", "solving"]
        );
    }

    #[test]
    fn empty_profile_is_insufficient() {
        let careers = vec![career("Nurse", "patient care", &[])];
        assert_eq!(recommend(&Profile::default(), &careers), Outcome::InsufficientProfile);
        assert_eq!(recommend(&profile("", "   "), &careers), Outcome::InsufficientProfile);
    }

    #[test]
    fn insufficient_profile_wins_over_empty_catalog() {
        assert_eq!(recommend(&Profile::default(), &[]), Outcome::InsufficientProfile);
    }

    #[test]
    fn either_field_alone_is_enough() {
        let careers = vec![career("Nurse", "patient care", &[])];
        let goal_only = Profile {
            career_goal: Some("care".into()),
            strength: None,
        };
        let strength_only = Profile {
            career_goal: None,
            strength: Some("patient".into()),
        };
        assert_eq!(winner(&recommend(&goal_only, &careers)).score, 1);
        assert_eq!(winner(&recommend(&strength_only, &careers)).score, 1);
    }

    #[test]
    fn empty_catalog_has_no_candidates() {
        assert_eq!(recommend(&profile("software", ""), &[]), Outcome::NoCandidates);
    }

    #[test]
    fn software_engineer_beats_nurse() {
        let careers = vec![
            career("Software Engineer", "builds software systems", &[]),
            career("Nurse", "patient care", &[]),
        ];
        let outcome = recommend(&profile("software systems", ""), &careers);
        let m = winner(&outcome);
        assert_eq!(m.career.name, "Software Engineer");
        assert_eq!(m.score, 2);
        assert_eq!(careers[1].score(&["software".into(), "systems".into()]), 0);
    }

    #[test]
    fn lone_candidate_wins_with_zero_score() {
        let careers = vec![career("Data Analyst", "analyzes data", &[])];
        let outcome = recommend(&profile("banking", ""), &careers);
        let m = winner(&outcome);
        assert_eq!(m.career.name, "Data Analyst");
        assert_eq!(m.score, 0);
    }

    #[test]
    fn all_zero_scores_pick_first_candidate() {
        let careers = vec![
            career("Chef", "cooks food", &[]),
            career("Pilot", "flies planes", &[]),
        ];
        let m = winner(&recommend(&profile("astronomy", ""), &careers)).clone();
        assert_eq!(m.career.name, "Chef");
    }

    #[test]
    fn ties_go_to_earlier_candidate() {
        let careers = vec![
            career("Data Analyst", "works with data", &[]),
            career("Data Engineer", "moves data", &[]),
        ];
        let m = winner(&recommend(&profile("data", ""), &careers)).clone();
        assert_eq!(m.career.name, "Data Analyst");

        let reversed: Vec<_> = careers.iter().rev().cloned().collect();
        let m = winner(&recommend(&profile("data", ""), &reversed)).clone();
        assert_eq!(m.career.name, "Data Engineer");
    }

    #[test]
    fn later_strictly_higher_score_wins() {
        let careers = vec![
            career("Teacher", "educates students", &[]),
            career("Data Scientist", "statistics and machine learning", &["Python"]),
        ];
        let m = winner(&recommend(&profile("machine learning", "python"), &careers)).clone();
        assert_eq!(m.career.name, "Data Scientist");
        assert_eq!(m.score, 3);
    }

    #[test]
    fn substring_inside_longer_word_counts() {
        let c = career("Database Administrator", "keeps databases healthy", &[]);
        assert_eq!(c.score(&["data".into()]), 1);
        assert_eq!(c.score(&["admin".into()]), 1);
    }

    #[test]
    fn skills_are_part_of_the_text() {
        let c = career("Accountant", "prepares reports", &["Excel", "Auditing"]);
        assert_eq!(c.score(&["excel".into(), "auditing".into()]), 2);
        let bare = career("Accountant", "prepares reports", &[]);
        assert_eq!(bare.score(&["excel".into()]), 0);
    }

    #[test]
    fn repeated_keywords_count_each_time() {
        let c = career("Designer", "visual design", &[]);
        assert_eq!(c.score(&["design".into(), "design".into()]), 2);
    }

    #[test]
    fn name_and_description_are_joined_with_space() {
        // "writerdrafts" would contain "rd".
        let c = career("Writer", "drafts copy", &[]);
        assert_eq!(c.score(&["rd".into()]), 0);
        assert_eq!(c.score(&["r d".into()]), 1);
    }

    #[test]
    fn winner_is_always_from_input_and_deterministic() {
        let careers = vec![
            career("Nurse", "patient care", &["Empathy"]),
            career("Electrician", "wires buildings", &["Safety"]),
            career("Lawyer", "legal advice", &["Negotiation"]),
        ];
        for goal in ["care", "wires", "legal", "nothing", "safety empathy"] {
            let p = profile(goal, "negotiation");
            let first = recommend(&p, &careers);
            let second = recommend(&p, &careers);
            assert_eq!(first, second);
            let m = winner(&first);
            assert!(careers.iter().any(|c| std::ptr::eq(c, m.career)));
        }
    }

    #[test]
    fn explanation_names_the_career() {
        let text = explanation("Nurse");
        assert!(text.starts_with("Recommended Career: Nurse. "));
        assert!(text.contains("kindly update your profile"));
        assert!(!text.contains("  "));
    }
}
