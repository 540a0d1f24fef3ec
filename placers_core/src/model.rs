//! Typed record schemas for each backend collection.
//!
//! Field names follow the camelCase wire format of the hosted database.
//! Optional academic fields stay `Option` so that an absent value is
//! distinguishable from a zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Collection, Record};

/// Recruitment pipeline stage. Declaration order is pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PipelineStatus {
    Applied,
    Aptitude,
    Interview,
    Selected,
}

impl PipelineStatus {
    pub const STEPS: [Self; 4] = [
        Self::Applied,
        Self::Aptitude,
        Self::Interview,
        Self::Selected,
    ];

    /// Zero-based position in the pipeline.
    #[must_use]
    pub const fn step_index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Aptitude => "Aptitude",
            Self::Interview => "Interview",
            Self::Selected => "Selected",
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Branch restriction: the wildcard or one named branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BranchFilter {
    #[default]
    All,
    Only(String),
}

impl BranchFilter {
    pub const WILDCARD: &'static str = "All";

    /// Whether a candidate's branch passes. An absent branch only passes the wildcard.
    #[must_use]
    pub fn admits(&self, branch: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => branch == Some(wanted.as_str()),
        }
    }
}

impl From<String> for BranchFilter {
    fn from(s: String) -> Self {
        if s == Self::WILDCARD {
            Self::All
        } else {
            Self::Only(s)
        }
    }
}

impl From<&str> for BranchFilter {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<BranchFilter> for String {
    fn from(b: BranchFilter) -> Self {
        match b {
            BranchFilter::All => BranchFilter::WILDCARD.to_string(),
            BranchFilter::Only(s) => s,
        }
    }
}

impl std::fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(Self::WILDCARD),
            Self::Only(s) => f.write_str(s),
        }
    }
}

/// One entry in a student's application list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub drive_id: String,
    pub company: String,
    pub role: String,
    pub status: PipelineStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub backlogs: Option<u32>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: Option<PipelineStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks12: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Record for Student {
    const COLLECTION: Collection = Collection::Students;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A recruitment drive posted by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub package: String,
    pub min_cgpa: f64,
    pub max_backlogs: u32,
    #[serde(default)]
    pub branches: Vec<BranchFilter>,
    #[serde(default)]
    pub req_skills: Vec<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Drive {
    /// Whether the drive's branch list admits `branch`.
    #[must_use]
    pub fn admits_branch(&self, branch: Option<&str>) -> bool {
        self.branches.iter().any(|b| b.admits(branch))
    }
}

impl Record for Drive {
    const COLLECTION: Collection = Collection::Drives;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumnus {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub batch: Option<String>,
    pub company: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub available: bool,
}

impl Record for Alumnus {
    const COLLECTION: Collection = Collection::Alumni;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A job lead posted by an alumnus outside the formal drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alumni_id: Option<String>,
    pub alumni_name: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub posted_on: NaiveDate,
    pub deadline: NaiveDate,
}

impl Record for Referral {
    const COLLECTION: Collection = Collection::Referrals;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipSlot {
    pub id: String,
    #[serde(default)]
    pub alumni_id: Option<String>,
    pub alumni_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: String,
    #[serde(default)]
    pub booked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<String>,
}

impl Record for MentorshipSlot {
    const COLLECTION: Collection = Collection::MentorshipSlots;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Dashboard role, which also picks the default view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "TPO")]
    PlacementOffice,
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "alumni")]
    Alumni,
}

impl std::str::FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TPO" | "tpo" => Ok(Self::PlacementOffice),
            "student" => Ok(Self::Student),
            "alumni" => Ok(Self::Alumni),
            _ => Err(anyhow::anyhow!("unknown role: {s}")),
        }
    }
}

/// Signed-in account profile stored under `users/<uid>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub backlogs: Option<u32>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Record for UserProfile {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use serde_json::json;

    #[test]
    fn pipeline_order_matches_steps() {
        assert!(PipelineStatus::Applied < PipelineStatus::Selected);
        for (i, step) in PipelineStatus::STEPS.iter().enumerate() {
            assert_eq!(step.step_index(), i);
        }
    }

    #[test]
    fn branch_filter_serializes_as_plain_string() {
        let all: BranchFilter = serde_json::from_value(json!("All")).unwrap_or_default();
        assert_eq!(all, BranchFilter::All);
        let cse = BranchFilter::from("CSE");
        assert_eq!(serde_json::to_value(&cse).ok(), Some(json!("CSE")));
        assert!(cse.admits(Some("CSE")));
        assert!(!cse.admits(Some("IT")));
        assert!(!cse.admits(None));
        assert!(BranchFilter::All.admits(None));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn drive_decodes_from_wire_document() {
        let doc = Document::from_value(json!({
            "id": "drive_3",
            "company": "Accenture",
            "role": "Associate",
            "package": "6.5 LPA",
            "minCgpa": 6.5,
            "maxBacklogs": 1,
            "branches": ["All"],
            "reqSkills": ["Communication", "SQL"],
            "date": "2025-08-22"
        }))
        .expect("valid document");
        let drive: Drive = doc.decode().expect("valid drive");
        assert_eq!(drive.id, "drive_3");
        assert_eq!(drive.branches, vec![BranchFilter::All]);
        assert!(drive.admits_branch(Some("MCA")));
        assert_eq!(drive.date, NaiveDate::from_ymd_opt(2025, 8, 22));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn student_missing_academics_decodes_as_none() {
        let doc = Document::from_value(json!({"id": "s1", "name": "Student 1"}))
            .expect("valid document");
        let student: Student = doc.decode().expect("valid student");
        assert_eq!(student.cgpa, None);
        assert_eq!(student.backlogs, None);
        assert!(student.skills.is_empty());
    }

    #[test]
    fn slot_kind_uses_type_on_the_wire() {
        let slot = json!({
            "id": "1", "alumniName": "Priya Sharma", "type": "Mock Interview",
            "date": "2025-08-03", "time": "4:00 PM", "duration": "45 min", "booked": false
        });
        let slot: Option<MentorshipSlot> = serde_json::from_value(slot).ok();
        assert_eq!(slot.map(|s| s.kind), Some("Mock Interview".to_string()));
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(
            serde_json::to_value(UserRole::PlacementOffice).ok(),
            Some(json!("TPO"))
        );
        assert_eq!("alumni".parse::<UserRole>().ok(), Some(UserRole::Alumni));
    }
}
