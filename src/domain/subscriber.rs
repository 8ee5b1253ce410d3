use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::SubscriberEmail;

/// A subscription of one email to one newsletter list.
///
/// Subscriber rows are never deleted; leaving a list only flips
/// `is_unsubscribed`, so the subscription history stays auditable.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub newsletter_list_id: Uuid,
    pub user_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub email: SubscriberEmail,
    pub lang: Option<String>,
    pub is_unsubscribed: bool,
    pub subscribed_at: DateTime<Utc>,
}

impl NewsletterSubscriber {
    /// Idempotent: re-subscribing an active subscriber changes nothing.
    /// The mutation is in-memory only; persist it with
    /// [`crate::repository::subscribers::store_subscription_flag`].
    pub fn subscribe(&mut self) {
        self.is_unsubscribed = false;
    }

    /// Idempotent, in-memory only. See [`Self::subscribe`].
    pub fn unsubscribe(&mut self) {
        self.is_unsubscribed = true;
    }

    pub fn is_subscribed(&self) -> bool {
        !self.is_unsubscribed
    }
}
