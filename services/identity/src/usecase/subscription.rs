use uuid::Uuid;

use crate::domain::repository::SubscriptionRepository;
use crate::error::IdentityServiceError;

// ── ToggleSubscription ───────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
pub struct ToggleSubscriptionOutput {
    /// Resulting state of the edge after the toggle.
    pub subscribed: bool,
}

pub struct ToggleSubscriptionUseCase<S: SubscriptionRepository> {
    pub subscriptions: S,
}

impl<S: SubscriptionRepository> ToggleSubscriptionUseCase<S> {
    /// Flip the edge for exactly the (subscriber, channel) pair. The
    /// repository keys on the composite pair — one subscriber toggling a
    /// channel never touches another subscriber's edge to it.
    pub async fn execute(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<ToggleSubscriptionOutput, IdentityServiceError> {
        let subscribed = self.subscriptions.toggle(subscriber_id, channel_id).await?;
        Ok(ToggleSubscriptionOutput { subscribed })
    }
}
