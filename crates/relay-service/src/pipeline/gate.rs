//! Reaction gate - fires only on the first application of the trigger

use relay_core::PlatformResult;
use tracing::{debug, instrument};

use crate::services::ServiceContext;

/// Decides from live chat state whether a reaction is the first of its label
///
/// Best-effort: two reactions landing within the same narrow window can
/// both observe a count of one.
pub struct ReactionGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionGate<'a> {
    /// Create a new ReactionGate
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// True iff exactly one `label` reaction currently exists on the message
    #[instrument(skip(self))]
    pub async fn is_first_occurrence(
        &self,
        channel: &str,
        ts: &str,
        label: &str,
    ) -> PlatformResult<bool> {
        let reactions = self.ctx.chat().reactions_on_message(channel, ts).await?;
        let count = reactions
            .iter()
            .find(|r| r.name == label)
            .map_or(0, |r| r.count);

        debug!(count, "Observed trigger reaction count");
        Ok(count == 1)
    }
}
