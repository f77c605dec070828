use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Applied,
    Screen,
    Tech,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Applied,
        Stage::Screen,
        Stage::Tech,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "applied",
            Stage::Screen => "screen",
            Stage::Tech => "tech",
            Stage::Offer => "offer",
            Stage::Hired => "hired",
            Stage::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub stage: Stage,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    pub stage: Stage,
    pub date_applied: DateTime<Utc>,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

impl Candidate {
    /// Moves the candidate to `stage`, recording the transition.
    /// Returns `false` when the candidate is already in that stage.
    pub fn transition_to(&mut self, stage: Stage, at: DateTime<Utc>) -> bool {
        if self.stage == stage {
            return false;
        }
        self.stage = stage;
        self.timeline.push(TimelineEntry { stage, date: at });
        true
    }
}

/// Partial edit of a candidate. The timeline is never written directly; a
/// stage change appends to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub stage: Option<Stage>,
    pub experience_years: Option<u32>,
    pub skills: Option<Vec<String>>,
    pub notes: Option<Vec<String>>,
}

impl CandidatePatch {
    pub fn apply(&self, candidate: &mut Candidate, at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            candidate.name = name.trim().to_string();
        }
        if let Some(email) = &self.email {
            candidate.email = normalize_email(email);
        }
        if let Some(phone) = &self.phone {
            candidate.phone = phone.clone();
        }
        if let Some(location) = &self.location {
            candidate.location = location.clone();
        }
        if let Some(resume_url) = &self.resume_url {
            candidate.resume_url = Some(resume_url.clone());
        }
        if let Some(linkedin) = &self.linkedin {
            candidate.linkedin = Some(linkedin.clone());
        }
        if let Some(portfolio) = &self.portfolio {
            candidate.portfolio = Some(portfolio.clone());
        }
        if let Some(years) = self.experience_years {
            candidate.experience_years = years;
        }
        if let Some(skills) = &self.skills {
            candidate.skills = skills.clone();
        }
        if let Some(notes) = &self.notes {
            candidate.notes = notes.clone();
        }
        if let Some(stage) = self.stage {
            candidate.transition_to(stage, at);
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
