use std::path::PathBuf;

use placers_core::state::{Action, ResumeField};
use placers_resume::write_resume;

use super::{Context, apply_actions};

/// Resume wizard fields; every one overrides the value pre-filled from the profile.
#[derive(Debug, Clone, Default)]
pub struct ResumeInput {
    pub user: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<String>,
    pub marks10: Option<String>,
    pub marks12: Option<String>,
    pub skills: Option<String>,
    pub projects: Option<String>,
    pub github: Option<String>,
    pub output: Option<PathBuf>,
}

impl ResumeInput {
    fn edits(self) -> Vec<Action> {
        [
            (ResumeField::Name, self.name),
            (ResumeField::Email, self.email),
            (ResumeField::Phone, self.phone),
            (ResumeField::Branch, self.branch),
            (ResumeField::Cgpa, self.cgpa),
            (ResumeField::Marks10, self.marks10),
            (ResumeField::Marks12, self.marks12),
            (ResumeField::Skills, self.skills),
            (ResumeField::Projects, self.projects),
            (ResumeField::Github, self.github),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| Action::EditResume(field, v)))
        .collect()
    }
}

/// Strategy for generating the one-page resume PDF.
#[derive(Debug, Clone, Copy)]
pub struct ResumeStrategy;

impl super::CommandStrategy for ResumeStrategy {
    type Input = ResumeInput;

    async fn execute(&self, mut input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let state = match input.user.take() {
            Some(uid) => ctx.user_state(&ctx.profile(&uid).await?),
            None => ctx.office_state(),
        };

        let dir = input
            .output
            .take()
            .unwrap_or_else(|| ctx.config.resume.output_dir.clone());
        let state = apply_actions(state, input.edits());

        let path = write_resume(&state.resume, &ctx.config.resume.footer, &dir)?;
        println!("Resume written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_fields_become_edits() {
        let input = ResumeInput {
            name: Some("Asha".to_string()),
            github: Some("github.com/asha".to_string()),
            ..ResumeInput::default()
        };
        assert_eq!(
            input.edits(),
            vec![
                Action::EditResume(ResumeField::Name, "Asha".to_string()),
                Action::EditResume(ResumeField::Github, "github.com/asha".to_string()),
            ]
        );
    }
}
