//! Skill normalisation and per-drive skill-gap diff.

use serde::Serialize;

use crate::model::Drive;

/// Split a comma-separated skill list, trimming entries and dropping blanks.
#[must_use]
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lower-case every skill for case-insensitive comparison.
#[must_use]
pub fn normalize_skills<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pick the skill source for gap analysis: the free-text resume list when it
/// has content, otherwise the stored profile skills.
#[must_use]
pub fn candidate_skills(resume_skills: &str, profile_skills: &[String]) -> Vec<String> {
    if resume_skills.trim().is_empty() {
        normalize_skills(profile_skills)
    } else {
        normalize_skills(&parse_skill_list(resume_skills))
    }
}

/// Required skills of one drive that the candidate lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub drive_id: String,
    pub company: String,
    pub role: String,
    pub missing_skills: Vec<String>,
}

/// Required skills missing from `have`, in the drive's own order and spelling.
#[must_use]
pub fn missing_skills(required: &[String], have: &[String]) -> Vec<String> {
    let have = normalize_skills(have);
    required
        .iter()
        .filter(|sk| !have.contains(&sk.trim().to_lowercase()))
        .cloned()
        .collect()
}

/// One gap per drive that is missing at least one skill, preserving drive order.
#[must_use]
pub fn skill_gaps(drives: &[Drive], have: &[String]) -> Vec<SkillGap> {
    drives
        .iter()
        .filter_map(|drive| {
            let missing = missing_skills(&drive.req_skills, have);
            (!missing.is_empty()).then(|| SkillGap {
                drive_id: drive.id.clone(),
                company: drive.company.clone(),
                role: drive.role.clone(),
                missing_skills: missing,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(id: &str, skills: &[&str]) -> Drive {
        Drive {
            id: id.to_string(),
            company: format!("{id} Corp"),
            role: "SDE".to_string(),
            package: String::new(),
            min_cgpa: 0.0,
            max_backlogs: 0,
            branches: vec![],
            req_skills: skills.iter().map(|s| (*s).to_string()).collect(),
            date: None,
        }
    }

    #[test]
    fn missing_is_case_insensitive() {
        let have = candidate_skills("python, java", &[]);
        let required = vec!["Python".to_string(), "SQL".to_string()];
        assert_eq!(missing_skills(&required, &have), vec!["SQL".to_string()]);
    }

    #[test]
    fn no_gap_when_everything_present() {
        let have = candidate_skills("SQL, PYTHON , data structures", &[]);
        let drives = vec![drive("a", &["Python", "SQL"]), drive("b", &["Data Structures"])];
        assert!(skill_gaps(&drives, &have).is_empty());
    }

    #[test]
    fn gaps_preserve_drive_order() {
        let have = vec!["react".to_string()];
        let drives = vec![
            drive("first", &["Java"]),
            drive("covered", &["React"]),
            drive("last", &["SQL", "React", "Azure"]),
        ];
        let gaps = skill_gaps(&drives, &have);
        let ids: Vec<&str> = gaps.iter().map(|g| g.drive_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "last"]);
        assert_eq!(gaps[1].missing_skills, vec!["SQL", "Azure"]);
    }

    #[test]
    fn profile_skills_used_when_resume_blank() {
        let profile = vec!["React".to_string(), "SQL".to_string()];
        assert_eq!(candidate_skills("  ", &profile), vec!["react", "sql"]);
        assert_eq!(candidate_skills("Go", &profile), vec!["go"]);
    }

    #[test]
    fn parse_drops_blank_entries() {
        assert_eq!(parse_skill_list(" Azure, ,SQL,"), vec!["Azure", "SQL"]);
        assert!(parse_skill_list("").is_empty());
    }
}
