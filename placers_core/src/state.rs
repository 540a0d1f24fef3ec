//! Explicit dashboard state and its reducer.
//!
//! Everything the UI would otherwise keep in scattered mutable cells lives in
//! [`AppState`], and changes only through [`reduce`].

use crate::actions::{ProfileForm, ReferralForm};
use crate::eligibility::EligibilityCriteria;
use crate::model::{BranchFilter, UserProfile, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    PlacementOffice,
    Student,
    Alumni,
}

impl From<UserRole> for View {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::PlacementOffice => Self::PlacementOffice,
            UserRole::Student => Self::Student,
            UserRole::Alumni => Self::Alumni,
        }
    }
}

/// Buffer behind the resume wizard. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub branch: String,
    pub cgpa: String,
    pub marks10: String,
    pub marks12: String,
    /// Comma-separated skills.
    pub skills: String,
    pub projects: String,
    pub github: String,
}

impl ResumeForm {
    /// Pre-fill from the signed-in profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            branch: profile.branch.clone().unwrap_or_default(),
            cgpa: profile.cgpa.map(|c| c.to_string()).unwrap_or_default(),
            skills: profile.skills.join(", "),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeField {
    Name,
    Email,
    Phone,
    Branch,
    Cgpa,
    Marks10,
    Marks12,
    Skills,
    Projects,
    Github,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Phone,
    Branch,
    Cgpa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralField {
    Company,
    Role,
    Package,
    Skills,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub view: View,
    pub criteria: EligibilityCriteria,
    pub resume: ResumeForm,
    pub referral: ReferralForm,
    pub profile: ProfileForm,
    pub notice: Option<Notice>,
}

impl AppState {
    /// Initial state for a signed-in user: default view follows the role.
    #[must_use]
    pub fn for_profile(profile: &UserProfile, criteria: EligibilityCriteria) -> Self {
        Self {
            view: View::from(profile.role),
            criteria,
            resume: ResumeForm::from_profile(profile),
            referral: ReferralForm::default(),
            profile: ProfileForm::from_profile(profile),
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SwitchView(View),
    SetMinCgpa(f64),
    SetMaxBacklogs(u32),
    SetBranch(BranchFilter),
    EditResume(ResumeField, String),
    EditReferral(ReferralField, String),
    EditProfile(ProfileField, String),
    /// Clear the referral form after a successful post.
    ResetReferral,
    Notify(Notice),
    DismissNotice,
}

/// Pure state transition. Changing any criterion clears a pending notice.
#[must_use]
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SwitchView(view) => state.view = view,
        Action::SetMinCgpa(min) => {
            state.criteria.min_cgpa = min.clamp(0.0, 10.0);
            state.notice = None;
        }
        Action::SetMaxBacklogs(max) => {
            state.criteria.max_backlogs = max;
            state.notice = None;
        }
        Action::SetBranch(branch) => {
            state.criteria.branch = branch;
            state.notice = None;
        }
        Action::EditResume(field, value) => {
            let slot = match field {
                ResumeField::Name => &mut state.resume.name,
                ResumeField::Email => &mut state.resume.email,
                ResumeField::Phone => &mut state.resume.phone,
                ResumeField::Branch => &mut state.resume.branch,
                ResumeField::Cgpa => &mut state.resume.cgpa,
                ResumeField::Marks10 => &mut state.resume.marks10,
                ResumeField::Marks12 => &mut state.resume.marks12,
                ResumeField::Skills => &mut state.resume.skills,
                ResumeField::Projects => &mut state.resume.projects,
                ResumeField::Github => &mut state.resume.github,
            };
            *slot = value;
        }
        Action::EditReferral(field, value) => {
            let slot = match field {
                ReferralField::Company => &mut state.referral.company,
                ReferralField::Role => &mut state.referral.role,
                ReferralField::Package => &mut state.referral.package,
                ReferralField::Skills => &mut state.referral.skills,
            };
            *slot = value;
        }
        Action::EditProfile(field, value) => {
            let slot = match field {
                ProfileField::Name => &mut state.profile.name,
                ProfileField::Phone => &mut state.profile.phone,
                ProfileField::Branch => &mut state.profile.branch,
                ProfileField::Cgpa => &mut state.profile.cgpa,
            };
            *slot = value;
        }
        Action::ResetReferral => state.referral = ReferralForm::default(),
        Action::Notify(notice) => state.notice = Some(notice),
        Action::DismissNotice => state.notice = None,
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: UserRole) -> UserProfile {
        UserProfile {
            uid: "u".to_string(),
            name: "Gana R.".to_string(),
            email: "gana.r@college.edu".to_string(),
            role,
            cgpa: Some(7.8),
            branch: Some("MCA".to_string()),
            backlogs: Some(0),
            phone: None,
            skills: vec!["React".to_string(), "Node.js".to_string()],
            applications: vec![],
            created_at: None,
        }
    }

    #[test]
    fn default_view_follows_role() {
        let state = AppState::for_profile(&profile(UserRole::Alumni), EligibilityCriteria::default());
        assert_eq!(state.view, View::Alumni);
        let state =
            AppState::for_profile(&profile(UserRole::PlacementOffice), EligibilityCriteria::default());
        assert_eq!(state.view, View::PlacementOffice);
    }

    #[test]
    fn resume_prefilled_from_profile() {
        let state = AppState::for_profile(&profile(UserRole::Student), EligibilityCriteria::default());
        assert_eq!(state.resume.skills, "React, Node.js");
        assert_eq!(state.resume.cgpa, "7.8");
        assert!(state.resume.phone.is_empty());
    }

    #[test]
    fn criteria_change_clears_notice() {
        let state = AppState::for_profile(&profile(UserRole::PlacementOffice), EligibilityCriteria::default());
        let state = reduce(state, Action::Notify(Notice::Info("sent".to_string())));
        assert!(state.notice.is_some());
        let state = reduce(state, Action::SetBranch(BranchFilter::from("IT")));
        assert!(state.notice.is_none());
        assert_eq!(state.criteria.branch, BranchFilter::Only("IT".to_string()));

        let state = reduce(state, Action::SetMinCgpa(12.0));
        assert!((state.criteria.min_cgpa - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn form_edits_and_reset() {
        let state = AppState::for_profile(&profile(UserRole::Alumni), EligibilityCriteria::default());
        let state = reduce(state, Action::EditReferral(ReferralField::Company, "Amazon".to_string()));
        let state = reduce(state, Action::EditResume(ResumeField::Phone, "98765".to_string()));
        assert_eq!(state.referral.company, "Amazon");
        assert_eq!(state.resume.phone, "98765");
        let state = reduce(state, Action::ResetReferral);
        assert_eq!(state.referral, ReferralForm::default());
    }

    #[test]
    fn profile_editor_starts_from_profile() {
        let state = AppState::for_profile(&profile(UserRole::Student), EligibilityCriteria::default());
        assert_eq!(state.profile.name, "Gana R.");
        assert_eq!(state.profile.cgpa, "7.8");
        let state = reduce(state, Action::EditProfile(ProfileField::Phone, "98765".to_string()));
        assert_eq!(state.profile.phone, "98765");
        assert_eq!(state.profile.branch, "MCA");
    }
}
