//! Message resolver - fetches the reacted-to message and resolves identities

use relay_core::{Identity, Message, PlatformResult, ReactionEvent, Reactions};
use tracing::{instrument, warn};

use crate::services::ServiceContext;

/// Assembles a `Message` from the thread root and user profiles
pub struct MessageResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageResolver<'a> {
    /// Create a new MessageResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the message an event points at
    ///
    /// `Ok(None)` when the message no longer exists. Identity lookups that
    /// fail yield an unresolved identity instead of an error.
    #[instrument(skip(self, event), fields(channel = %event.item.channel, ts = %event.item.ts))]
    pub async fn resolve(&self, event: &ReactionEvent) -> PlatformResult<Option<Message>> {
        let channel = event.item.channel.as_str();
        let ts = event.item.ts.as_str();

        let Some(root) = self.ctx.chat().thread_root(channel, ts).await? else {
            return Ok(None);
        };

        // The first user on the trigger entry is whoever applied it first
        let summary = root.reaction(&event.reaction);
        let reactor_id = summary
            .and_then(|s| s.users.first().cloned())
            .unwrap_or_else(|| event.actor_id.clone());
        let count = summary.map_or(1, |s| s.count);

        let author_id = root.author_id.clone().or_else(|| event.item_owner_id.clone());

        let (author, reactor) = tokio::join!(
            self.identity(author_id.as_deref()),
            self.identity(Some(&reactor_id)),
        );

        Ok(Some(Message {
            author_id,
            author,
            text: root.text,
            channel: channel.to_string(),
            ts: event.item.ts.clone(),
            reactions: Reactions {
                label: event.reaction.clone(),
                user_id: reactor_id,
                user: reactor,
                count,
            },
        }))
    }

    async fn identity(&self, user_id: Option<&str>) -> Identity {
        let Some(user_id) = user_id else {
            return Identity::unresolved();
        };
        match self.ctx.chat().user_profile(user_id).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(user_id, error = %e, "User profile lookup failed, continuing unresolved");
                Identity::unresolved()
            }
        }
    }
}
