use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::Type)]
#[sqlx(type_name = "newsletter_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NewsletterStatus {
    Online,
    Draft,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Newsletter {
    pub id: Uuid,
    pub newsletter_list_id: Uuid,
    pub name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub status: NewsletterStatus,
    pub headline: Option<String>,
    pub cover: Option<String>,
    pub languages: Vec<String>,
}

impl Newsletter {
    /// Online visibility requires both the status and a publish timestamp in the past.
    pub fn is_online(&self, now: DateTime<Utc>) -> bool {
        self.status == NewsletterStatus::Online && self.published_at.is_some_and(|t| t < now)
    }
}
