use placers_core::Student;
use placers_core::actions::notify_eligible;
use placers_core::eligibility::filter_eligible;
use placers_core::state::{Action, Notice};
use tracing::info;

use super::{Context, CriteriaArgs, apply_actions, criteria_actions};

#[derive(Debug, Clone)]
pub struct NotifyInput {
    pub drive_name: String,
    pub criteria: CriteriaArgs,
}

/// Strategy for notifying every student that passes the criteria panel.
#[derive(Debug, Clone, Copy)]
pub struct NotifyStrategy;

impl super::CommandStrategy for NotifyStrategy {
    type Input = NotifyInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let state = apply_actions(ctx.office_state(), criteria_actions(&input.criteria));

        let students = ctx.collection::<Student>().await;
        let eligible = filter_eligible(students.records(), &state.criteria);

        let notice = match notify_eligible(&input.drive_name, eligible.len()) {
            Ok(notice) => Notice::Info(notice.to_string()),
            Err(e) => Notice::Error(e.to_string()),
        };
        let state = placers_core::reduce(state, Action::Notify(notice));

        match state.notice {
            Some(Notice::Info(message)) => {
                info!("Notified {} students", eligible.len());
                for student in &eligible {
                    println!("  -> {} <{}>", student.name, student.email);
                }
                println!("{message}");
                Ok(())
            }
            Some(Notice::Error(message)) => anyhow::bail!(message),
            None => Ok(()),
        }
    }
}
