use placers_core::MentorshipSlot;
use placers_core::actions::book_slot;
use tracing::info;

use super::{Context, describe};

#[derive(Debug, Clone)]
pub struct BookInput {
    pub user: String,
    pub slot: String,
}

/// Strategy for claiming a mentorship slot.
#[derive(Debug, Clone, Copy)]
pub struct BookStrategy;

impl super::CommandStrategy for BookStrategy {
    type Input = BookInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let profile = ctx.profile(&input.user).await?;
        let mut slots = ctx.collection::<MentorshipSlot>().await;
        let slot = slots
            .get(&input.slot)
            .ok_or_else(|| anyhow::anyhow!("No mentorship slot with id {}", input.slot))?;

        let Some(booking) = book_slot(slot, &profile.email) else {
            println!("Slot already booked");
            return Ok(());
        };
        let summary = format!("{} with {} on {} at {}", slot.kind, slot.alumni_name, slot.date, slot.time);

        let outcome = slots.update_with(&input.slot, &booking).await?;
        info!("Slot {} booked by {}", input.slot, profile.email);
        println!("Booked {summary} ({})", describe(outcome));
        Ok(())
    }
}
