use placers_core::skills::candidate_skills;
use placers_core::{Drive, SkillGap, UserProfile, eligible_drives, skill_gaps};

use super::Context;

#[derive(Debug, Clone)]
pub struct DrivesInput {
    pub user: String,
    /// Comma-separated skills overriding the profile's own list.
    pub skills: Option<String>,
}

/// Drives the student can apply to now, and the skills missing for every open drive.
fn drive_report<'a>(
    profile: &UserProfile,
    drives: &'a [Drive],
    resume_skills: &str,
) -> (Vec<&'a Drive>, Vec<SkillGap>) {
    let have = candidate_skills(resume_skills, &profile.skills);
    (eligible_drives(profile, drives), skill_gaps(drives, &have))
}

/// Strategy for a student's eligible drives and skill gaps.
#[derive(Debug, Clone, Copy)]
pub struct DrivesStrategy;

impl super::CommandStrategy for DrivesStrategy {
    type Input = DrivesInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let profile = ctx.profile(&input.user).await?;
        let drives = ctx.collection::<Drive>().await;
        let (eligible, gaps) = drive_report(
            &profile,
            drives.records(),
            input.skills.as_deref().unwrap_or(""),
        );

        println!("=== Eligible Drives for {} ===\n", profile.name);
        if eligible.is_empty() {
            println!("No drives match your profile yet.");
        }
        for drive in &eligible {
            let applied = profile.applications.iter().any(|a| a.drive_id == drive.id);
            println!(
                "  [{}] {} - {} ({}){}",
                drive.id,
                drive.company,
                drive.role,
                drive.package,
                if applied { "  applied" } else { "" }
            );
            if let Some(date) = drive.date {
                println!("        date: {date}");
            }
        }

        if !gaps.is_empty() {
            println!("\nSkill gaps:");
            for gap in gaps {
                println!(
                    "  {} ({}): missing {}",
                    gap.company,
                    gap.role,
                    gap.missing_skills.join(", ")
                );
            }
            println!("Add these to your resume skills to become eligible.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placers_core::{BranchFilter, UserRole};

    fn student() -> UserProfile {
        UserProfile {
            uid: "u1".to_string(),
            name: "Gana R.".to_string(),
            email: "gana.r@college.edu".to_string(),
            role: UserRole::Student,
            cgpa: Some(7.8),
            branch: Some("MCA".to_string()),
            backlogs: Some(0),
            phone: None,
            skills: vec!["React".to_string()],
            applications: vec![],
            created_at: None,
        }
    }

    fn drive(id: &str, min_cgpa: f64, branch: &str, skills: &[&str]) -> Drive {
        Drive {
            id: id.to_string(),
            company: id.to_string(),
            role: "SDE".to_string(),
            package: String::new(),
            min_cgpa,
            max_backlogs: 0,
            branches: vec![BranchFilter::from(branch)],
            req_skills: skills.iter().map(ToString::to_string).collect(),
            date: None,
        }
    }

    #[test]
    fn gaps_cover_drives_not_yet_eligible() {
        let drives = vec![drive("Google", 8.5, "CSE", &["Python"])];
        let (eligible, gaps) = drive_report(&student(), &drives, "");
        assert!(eligible.is_empty());
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].missing_skills, vec!["Python".to_string()]);
    }

    #[test]
    fn resume_skills_override_profile() {
        let drives = vec![
            drive("TCS", 7.0, "All", &["React"]),
            drive("Google", 8.5, "CSE", &["Python"]),
        ];
        let (eligible, gaps) = drive_report(&student(), &drives, "Python");
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "TCS");
        let companies: Vec<&str> = gaps.iter().map(|g| g.company.as_str()).collect();
        assert_eq!(companies, vec!["TCS"]);
    }
}
