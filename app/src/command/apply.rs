use placers_core::actions::apply_to_drive;
use placers_core::{Drive, UserProfile};
use tracing::info;

use super::{Context, describe};

#[derive(Debug, Clone)]
pub struct ApplyInput {
    pub user: String,
    pub drive: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ApplyStrategy;

impl super::CommandStrategy for ApplyStrategy {
    type Input = ApplyInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let mut profile = ctx.profile(&input.user).await?;
        let drives = ctx.collection::<Drive>().await;
        let drive = drives
            .get(&input.drive)
            .ok_or_else(|| anyhow::anyhow!("No drive with id {}", input.drive))?;

        let update = apply_to_drive(&profile, drive)?;
        let mut users = ctx.collection::<UserProfile>().await;
        let outcome = users.update_with(&profile.uid, &update).await?;

        profile.applications = update.applications;
        ctx.remember_profile(&profile).await;
        info!("{} applied to drive {}", profile.uid, drive.id);
        println!(
            "Applied to {} - {} ({})",
            drive.company,
            drive.role,
            describe(outcome)
        );
        Ok(())
    }
}
