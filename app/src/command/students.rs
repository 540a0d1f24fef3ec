use placers_core::eligibility::eligible_view;
use placers_core::Student;

use super::{Context, apply_actions, criteria_actions};

/// Criteria panel overrides; unset fields keep the configured defaults.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CriteriaArgs {
    /// Minimum CGPA (0-10)
    #[arg(long)]
    pub min_cgpa: Option<f64>,

    /// Maximum active backlogs
    #[arg(long)]
    pub max_backlogs: Option<u32>,

    /// Branch filter, or "All"
    #[arg(long)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StudentsInput {
    pub criteria: CriteriaArgs,
    /// Show every eligible student instead of the display cap.
    pub all: bool,
}

/// Strategy for the placement-office candidate table.
#[derive(Debug, Clone, Copy)]
pub struct StudentsStrategy;

impl super::CommandStrategy for StudentsStrategy {
    type Input = StudentsInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let state = apply_actions(ctx.office_state(), criteria_actions(&input.criteria));

        let students = ctx.collection::<Student>().await;
        let cap = if input.all {
            usize::MAX
        } else {
            ctx.config.dashboard.display_cap
        };
        let view = eligible_view(students.records(), &state.criteria, cap);

        println!(
            "Criteria: CGPA >= {}, backlogs <= {}, branch {}",
            state.criteria.min_cgpa, state.criteria.max_backlogs, state.criteria.branch
        );
        println!("{:<24} {:<6} {:>5} {:>8}  {}", "Name", "Branch", "CGPA", "Backlogs", "Status");
        for student in &view.shown {
            println!(
                "{:<24} {:<6} {:>5} {:>8}  {}",
                student.name,
                student.branch.as_deref().unwrap_or("-"),
                student.cgpa.map_or_else(|| "-".to_string(), |c| format!("{c:.1}")),
                student
                    .backlogs
                    .map_or_else(|| "-".to_string(), |b| b.to_string()),
                student
                    .status
                    .map_or_else(|| "-".to_string(), |s| s.to_string()),
            );
        }
        println!(
            "\n{} eligible students (showing {})",
            view.total,
            view.shown.len()
        );
        Ok(())
    }
}
