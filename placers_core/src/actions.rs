//! Pure builders for the dashboard's write actions.
//!
//! Each function validates its inputs and returns the field updates to send
//! through the collection cache. None of them performs I/O.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::ValidationError;
use crate::model::{Application, Drive, MentorshipSlot, PipelineStatus, Referral, UserProfile};
use crate::skills::parse_skill_list;

/// Update written to a mentorship slot when a student claims it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotBooking {
    pub booked: bool,
    pub booked_by: String,
}

/// Claim `slot` for `student_email`. Booking an already-booked slot is a no-op
/// and yields `None`.
#[must_use]
pub fn book_slot(slot: &MentorshipSlot, student_email: &str) -> Option<SlotBooking> {
    if slot.booked {
        return None;
    }
    Some(SlotBooking {
        booked: true,
        booked_by: student_email.to_string(),
    })
}

/// Apply the booking locally; unchanged when `booking` is `None`.
#[must_use]
pub fn with_booking(slot: &MentorshipSlot, booking: Option<&SlotBooking>) -> MentorshipSlot {
    let mut slot = slot.clone();
    if let Some(b) = booking {
        slot.booked = b.booked;
        slot.booked_by = Some(b.booked_by.clone());
    }
    slot
}

/// Replacement application list written to `users/<uid>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationsUpdate {
    pub applications: Vec<Application>,
}

pub fn apply_to_drive(
    profile: &UserProfile,
    drive: &Drive,
) -> Result<ApplicationsUpdate, ValidationError> {
    if profile.applications.iter().any(|a| a.drive_id == drive.id) {
        return Err(ValidationError::AlreadyApplied {
            company: drive.company.clone(),
        });
    }
    let mut applications = profile.applications.clone();
    applications.push(Application {
        drive_id: drive.id.clone(),
        company: drive.company.clone(),
        role: drive.role.clone(),
        status: PipelineStatus::Applied,
    });
    Ok(ApplicationsUpdate { applications })
}

/// Buffer behind the alumni "post referral" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferralForm {
    pub company: String,
    pub role: String,
    pub package: String,
    /// Comma-separated skills.
    pub skills: String,
}

/// Build a referral from the form. Company and role are required.
pub fn new_referral(
    poster: &UserProfile,
    form: &ReferralForm,
    today: NaiveDate,
    deadline_days: u64,
) -> Result<Referral, ValidationError> {
    if form.company.trim().is_empty() || form.role.trim().is_empty() {
        return Err(ValidationError::MissingField("Please fill Company and Role."));
    }
    let deadline = today
        .checked_add_days(Days::new(deadline_days))
        .unwrap_or(today);
    Ok(Referral {
        id: String::new(),
        alumni_id: Some(poster.uid.clone()),
        alumni_name: poster.name.clone(),
        company: form.company.trim().to_string(),
        role: form.role.trim().to_string(),
        package: form.package.trim().to_string(),
        skills: parse_skill_list(&form.skills),
        posted_on: today,
        deadline,
    })
}

/// Buffer behind the profile editor. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
    pub branch: String,
    pub cgpa: String,
}

impl ProfileForm {
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            branch: profile.branch.clone().unwrap_or_default(),
            cgpa: profile.cgpa.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

/// Fields overwritten on `users/<uid>` when the profile editor is saved.
/// Blank optional fields are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEdit {
    pub name: String,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
}

impl ProfileEdit {
    /// Mirror the saved fields onto a local copy of the profile.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        profile.name.clone_from(&self.name);
        profile.phone.clone_from(&self.phone);
        profile.branch.clone_from(&self.branch);
        profile.cgpa = self.cgpa;
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Validate the editor buffer. Name is required; CGPA, when given, must lie in 0..=10.
pub fn edit_profile(form: &ProfileForm) -> Result<ProfileEdit, ValidationError> {
    let Some(name) = non_blank(&form.name) else {
        return Err(ValidationError::MissingField("Please enter your name."));
    };
    let cgpa = match non_blank(&form.cgpa) {
        None => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(c) if (0.0..=10.0).contains(&c) => Some(c),
            _ => {
                return Err(ValidationError::InvalidScore {
                    field: "CGPA",
                    value: raw,
                });
            }
        },
    };
    Ok(ProfileEdit {
        name,
        phone: non_blank(&form.phone),
        branch: non_blank(&form.branch),
        cgpa,
    })
}

/// Confirmation shown after notifying the eligible students of a drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveNotice {
    pub drive_name: String,
    pub recipients: usize,
}

impl std::fmt::Display for DriveNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Notification sent to {} eligible students for {}!",
            self.recipients, self.drive_name
        )
    }
}

pub fn notify_eligible(drive_name: &str, recipients: usize) -> Result<DriveNotice, ValidationError> {
    let drive_name = drive_name.trim();
    if drive_name.is_empty() {
        return Err(ValidationError::MissingField("Please enter a Drive Name first."));
    }
    Ok(DriveNotice {
        drive_name: drive_name.to_string(),
        recipients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BranchFilter, UserRole};

    fn slot(booked: bool) -> MentorshipSlot {
        MentorshipSlot {
            id: "slot_2".to_string(),
            alumni_id: None,
            alumni_name: "Priya Sharma".to_string(),
            kind: "Resume Review".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap_or_default(),
            time: "5:00 PM".to_string(),
            duration: "30 min".to_string(),
            booked,
            booked_by: booked.then(|| "first@college.edu".to_string()),
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            uid: "u1".to_string(),
            name: "Gana R.".to_string(),
            email: "gana.r@college.edu".to_string(),
            role: UserRole::Student,
            cgpa: Some(7.8),
            branch: Some("MCA".to_string()),
            backlogs: Some(0),
            phone: None,
            skills: vec![],
            applications: vec![],
            created_at: None,
        }
    }

    fn drive(id: &str) -> Drive {
        Drive {
            id: id.to_string(),
            company: "TCS Digital".to_string(),
            role: "SDE".to_string(),
            package: "7.5 LPA".to_string(),
            min_cgpa: 7.0,
            max_backlogs: 0,
            branches: vec![BranchFilter::All],
            req_skills: vec![],
            date: None,
        }
    }

    #[test]
    fn booking_open_slot_claims_it() {
        let open = slot(false);
        let booking = book_slot(&open, "me@college.edu");
        assert_eq!(
            booking,
            Some(SlotBooking {
                booked: true,
                booked_by: "me@college.edu".to_string()
            })
        );
        let after = with_booking(&open, booking.as_ref());
        assert!(after.booked);
        assert_eq!(after.booked_by.as_deref(), Some("me@college.edu"));
    }

    #[test]
    fn booking_booked_slot_is_noop() {
        let taken = slot(true);
        let booking = book_slot(&taken, "me@college.edu");
        assert!(booking.is_none());
        assert_eq!(with_booking(&taken, booking.as_ref()), taken);
    }

    #[test]
    fn applying_twice_is_rejected() {
        let mut me = profile();
        let update = apply_to_drive(&me, &drive("drive_1"));
        let Ok(update) = update else {
            panic!("first application should succeed");
        };
        assert_eq!(update.applications.len(), 1);
        assert_eq!(update.applications[0].status, PipelineStatus::Applied);

        me.applications = update.applications;
        assert_eq!(
            apply_to_drive(&me, &drive("drive_1")),
            Err(ValidationError::AlreadyApplied {
                company: "TCS Digital".to_string()
            })
        );
        assert!(apply_to_drive(&me, &drive("drive_2")).is_ok());
    }

    #[test]
    fn referral_requires_company_and_role() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap_or_default();
        let form = ReferralForm {
            company: "Google".to_string(),
            ..ReferralForm::default()
        };
        assert!(matches!(
            new_referral(&profile(), &form, today, 30),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn referral_parses_skills_and_deadline() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap_or_default();
        let form = ReferralForm {
            company: "Microsoft".to_string(),
            role: "Cloud Associate".to_string(),
            package: "18 LPA".to_string(),
            skills: "Azure, SQL ,".to_string(),
        };
        let Ok(referral) = new_referral(&profile(), &form, today, 30) else {
            panic!("valid form should build a referral");
        };
        assert_eq!(referral.skills, vec!["Azure", "SQL"]);
        assert_eq!(referral.posted_on, today);
        assert_eq!(referral.deadline, NaiveDate::from_ymd_opt(2025, 8, 19).unwrap_or_default());
        assert_eq!(referral.alumni_name, "Gana R.");
    }

    #[test]
    fn notify_needs_drive_name() {
        assert!(notify_eligible("  ", 3).is_err());
        let Ok(notice) = notify_eligible("Google SDE-1", 3) else {
            panic!("named drive should notify");
        };
        assert_eq!(
            notice.to_string(),
            "Notification sent to 3 eligible students for Google SDE-1!"
        );
    }

    #[test]
    fn profile_edit_trims_and_blanks_to_none() {
        let form = ProfileForm {
            name: "  Gana Raj ".to_string(),
            phone: " ".to_string(),
            branch: "CSE".to_string(),
            cgpa: "8.2".to_string(),
        };
        let edit = edit_profile(&form);
        assert_eq!(
            edit,
            Ok(ProfileEdit {
                name: "Gana Raj".to_string(),
                phone: None,
                branch: Some("CSE".to_string()),
                cgpa: Some(8.2),
            })
        );

        let mut p = profile();
        p.phone = Some("98765".to_string());
        if let Ok(edit) = edit {
            edit.apply_to(&mut p);
        }
        assert_eq!(p.name, "Gana Raj");
        assert_eq!(p.phone, None);
        assert_eq!(p.branch.as_deref(), Some("CSE"));
        assert_eq!(p.cgpa, Some(8.2));
    }

    #[test]
    fn profile_edit_validation() {
        let blank_name = ProfileForm {
            name: "  ".to_string(),
            ..ProfileForm::from_profile(&profile())
        };
        assert!(matches!(
            edit_profile(&blank_name),
            Err(ValidationError::MissingField(_))
        ));

        for bad in ["eight", "11", "-1"] {
            let form = ProfileForm {
                cgpa: bad.to_string(),
                ..ProfileForm::from_profile(&profile())
            };
            assert_eq!(
                edit_profile(&form),
                Err(ValidationError::InvalidScore {
                    field: "CGPA",
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn profile_edit_serializes_nulls_for_overwrite() {
        let edit = ProfileEdit {
            name: "Asha".to_string(),
            phone: None,
            branch: None,
            cgpa: None,
        };
        let fields = crate::store::to_fields(&edit).unwrap_or_default();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields.get("phone"), Some(&serde_json::Value::Null));
    }
}
