use placers_core::UserProfile;
use placers_core::actions::edit_profile;
use placers_core::state::{Action, ProfileField};
use tracing::info;

use super::{Context, apply_actions, describe};

/// Profile editor fields; unset ones keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub user: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<String>,
}

impl ProfileInput {
    fn edits(self) -> Vec<Action> {
        [
            (ProfileField::Name, self.name),
            (ProfileField::Phone, self.phone),
            (ProfileField::Branch, self.branch),
            (ProfileField::Cgpa, self.cgpa),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| Action::EditProfile(field, v)))
        .collect()
    }
}

/// Strategy for editing the signed-in user's own profile.
#[derive(Debug, Clone, Copy)]
pub struct ProfileStrategy;

impl super::CommandStrategy for ProfileStrategy {
    type Input = ProfileInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let mut profile = ctx.profile(&input.user).await?;
        let state = apply_actions(ctx.user_state(&profile), input.edits());

        let edit = edit_profile(&state.profile)?;
        let mut users = ctx.collection::<UserProfile>().await;
        let outcome = users.update_with(&profile.uid, &edit).await?;

        edit.apply_to(&mut profile);
        ctx.remember_profile(&profile).await;
        info!("Profile {} updated", profile.uid);

        println!("Profile updated ({})", describe(outcome));
        println!("  Name:   {}", profile.name);
        println!("  Phone:  {}", profile.phone.as_deref().unwrap_or("-"));
        println!("  Branch: {}", profile.branch.as_deref().unwrap_or("-"));
        println!(
            "  CGPA:   {}",
            profile.cgpa.map_or_else(|| "-".to_string(), |c| c.to_string())
        );
        Ok(())
    }
}
