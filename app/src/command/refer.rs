use placers_core::actions::new_referral;
use placers_core::state::{Action, ReferralField};
use placers_core::{Referral, UserRole};
use tracing::{info, warn};

use super::{Context, apply_actions, describe};

#[derive(Debug, Clone)]
pub struct ReferInput {
    pub user: String,
    pub company: String,
    pub role: String,
    pub package: String,
    pub skills: String,
}

/// Strategy for an alumnus posting a referral.
#[derive(Debug, Clone, Copy)]
pub struct ReferStrategy;

impl super::CommandStrategy for ReferStrategy {
    type Input = ReferInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let profile = ctx.profile(&input.user).await?;
        if profile.role != UserRole::Alumni {
            warn!("{} is posting a referral without an alumni profile", profile.uid);
        }

        let state = apply_actions(
            ctx.user_state(&profile),
            vec![
                Action::EditReferral(ReferralField::Company, input.company),
                Action::EditReferral(ReferralField::Role, input.role),
                Action::EditReferral(ReferralField::Package, input.package),
                Action::EditReferral(ReferralField::Skills, input.skills),
            ],
        );

        let referral = new_referral(
            &profile,
            &state.referral,
            chrono::Local::now().date_naive(),
            ctx.config.dashboard.referral_deadline_days,
        )?;

        let mut referrals = ctx.collection::<Referral>().await;
        let receipt = referrals.create_record(&referral).await?;
        info!("Referral {} posted by {}", receipt.id, profile.uid);
        println!(
            "Referral posted: {} - {} (deadline {}, {})",
            referral.company,
            referral.role,
            referral.deadline,
            describe(receipt.outcome)
        );
        Ok(())
    }
}
